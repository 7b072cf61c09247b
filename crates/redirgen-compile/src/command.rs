//! Command-line formatters for the target policy engine.
//!
//! One function per command type, each a fixed template. The engine's
//! CLI is syntax-sensitive: expressions embedded in a quoted argument
//! must have their inner quotes escaped as `\"`, and nothing else may be
//! rewritten.

/// Escape embedded quotes for placement inside a quoted CLI argument.
fn escape_quoted(expr: &str) -> String {
    expr.replace('"', "\\\"")
}

/// `add responder action <name> redirect "<target>" -responseStatusCode 301`
pub fn add_action(action_name: &str, target_url: &str) -> String {
    format!(
        "add responder action {action_name} redirect \"{}\" -responseStatusCode 301",
        escape_quoted(target_url)
    )
}

/// `add responder policy <name> "<rule>" <action>`
pub fn add_policy(policy_name: &str, rule_expr: &str, action_name: &str) -> String {
    format!(
        "add responder policy {policy_name} \"{}\" {action_name}",
        escape_quoted(rule_expr)
    )
}

/// `bind cs vserver <vserver> -policyName <policy> -priority <n> ...`
pub fn bind_vserver(vserver: &str, policy_name: &str, priority: u32) -> String {
    format!(
        "bind cs vserver {vserver} -policyName {policy_name} -priority {priority} \
         -gotoPriorityExpression END -type REQUEST"
    )
}

/// `unbind cs vserver <vserver> -policyName <policy>`
pub fn unbind_vserver(vserver: &str, policy_name: &str) -> String {
    format!("unbind cs vserver {vserver} -policyName {policy_name}")
}

/// `rm responder policy <policy>`
pub fn rm_policy(policy_name: &str) -> String {
    format!("rm responder policy {policy_name}")
}

/// `rm responder action <action>`
pub fn rm_action(action_name: &str) -> String {
    format!("rm responder action {action_name}")
}
