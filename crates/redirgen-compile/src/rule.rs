//! Single-rule compilation: one input row to one action/policy/bind set.

use tracing::info;

use redirgen_model::{CompileOptions, CompiledRule, RedirectRule, action_name, policy_name};

use crate::command;
use crate::matcher::compile_path_matcher;
use crate::target::build_redirect_target;

/// Case-insensitive exact hostname match for a rule's domain.
fn domain_expr(domain: &str) -> String {
    format!("HTTP.REQ.HOSTNAME.SET_TEXT_MODE(IGNORECASE).EQ(\"{domain}\")")
}

/// Compile one redirect rule with an assigned number and priority.
///
/// Numbering is the orchestrator's concern; this function only derives
/// the expressions and names. Emits one progress line per rule so an
/// operator can follow what each policy will match and where it sends
/// traffic.
pub fn compile_rule(
    rule: &RedirectRule,
    options: &CompileOptions,
    rule_number: u32,
    priority: u32,
) -> CompiledRule {
    let matcher = compile_path_matcher(&rule.request_path);
    let target_url = build_redirect_target(&options.redirect_url_prefix, &rule.redirect_path);
    let policy_name = policy_name(rule_number);
    info!(
        policy = %policy_name,
        matcher = %matcher.expr,
        target = %target_url,
        "compiled redirect rule"
    );
    CompiledRule {
        rule_number,
        priority,
        domain_expr: domain_expr(&rule.domain),
        url_expr: matcher.expr,
        action_name: action_name(rule_number),
        policy_name,
        target_url,
    }
}

/// Serialize a compiled rule into its four configuration commands:
/// add-action, add-policy, and one bind per vserver.
pub fn rule_commands(rule: &CompiledRule, options: &CompileOptions) -> [String; 4] {
    let rule_expr = format!("({}) && {}", rule.domain_expr, rule.url_expr);
    [
        command::add_action(&rule.action_name, &rule.target_url),
        command::add_policy(&rule.policy_name, &rule_expr, &rule.action_name),
        command::bind_vserver(&options.http_vserver, &rule.policy_name, rule.priority),
        command::bind_vserver(&options.https_vserver, &rule.policy_name, rule.priority),
    ]
}
