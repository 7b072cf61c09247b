//! Inverse command generation: unbind and remove sequences.

use tracing::debug;

use redirgen_model::{CompileOptions, action_name, policy_name};

use crate::command;

/// Produce the teardown commands for one rule number.
///
/// Always unbinds the policy from both vservers (HTTP first, HTTPS
/// second, mirroring the bind order). With `unbind_only` false the
/// policy and action objects are removed as well, so the unbind output
/// is a strict prefix of the full rollback output for the same rule.
///
/// The priority is not part of any emitted command; it is carried for
/// symmetry with [`crate::rule::compile_rule`] and traced for debugging.
pub fn rollback_commands(
    rule_number: u32,
    priority: u32,
    options: &CompileOptions,
    unbind_only: bool,
) -> Vec<String> {
    let policy = policy_name(rule_number);
    debug!(policy = %policy, priority, unbind_only, "rollback commands");
    let mut lines = vec![
        command::unbind_vserver(&options.http_vserver, &policy),
        command::unbind_vserver(&options.https_vserver, &policy),
    ];
    if !unbind_only {
        lines.push(command::rm_policy(&policy));
        lines.push(command::rm_action(&action_name(rule_number)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_options() -> CompileOptions {
        CompileOptions::new("https://new.tld/", "vs_http", "vs_https")
    }

    #[test]
    fn unbind_only_emits_two_lines() {
        let lines = rollback_commands(1000, 100, &test_options(), true);
        assert_eq!(
            lines,
            vec![
                "unbind cs vserver vs_http -policyName RespPol_1000",
                "unbind cs vserver vs_https -policyName RespPol_1000",
            ]
        );
    }

    #[test]
    fn full_rollback_emits_four_lines() {
        let lines = rollback_commands(1000, 100, &test_options(), false);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "rm responder policy RespPol_1000");
        assert_eq!(lines[3], "rm responder action RespAct_1000");
    }

    #[test]
    fn unbind_is_strict_prefix_of_rollback() {
        let unbind = rollback_commands(9000, 130, &test_options(), true);
        let rollback = rollback_commands(9000, 130, &test_options(), false);
        assert_eq!(unbind.as_slice(), &rollback[..2]);
    }
}
