//! Batch orchestration: sort, partition, number, compile.

use tracing::info;

use redirgen_model::{CompileOptions, RedirectRule, RuleKind};

use crate::matcher::is_fallback_path;
use crate::rollback::rollback_commands;
use crate::rule::{compile_rule, rule_commands};

/// The three command sequences produced from one input batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    /// add-action / add-policy / bind lines, four per rule.
    pub redirects: Vec<String>,
    /// unbind lines only, two per rule.
    pub unbind: Vec<String>,
    /// unbind plus remove lines, four per rule.
    pub rollback: Vec<String>,
    pub specific_rules: usize,
    pub fallback_rules: usize,
}

/// Compile a batch of redirect rules into command sequences.
///
/// Rules are sorted by `(domain, request_path)` and compiled in two
/// phases: specific rules first, then fallback rules. Each phase numbers
/// its rules from its own configured start, while a single priority
/// counter runs across both phases so fallback policies always evaluate
/// after every specific policy. The counter is deliberately one variable
/// threaded through both loops; it must never reset between phases.
pub fn compile_batch(mut rules: Vec<RedirectRule>, options: &CompileOptions) -> BatchOutput {
    rules.sort_by(|a, b| {
        (a.domain.as_str(), a.request_path.as_str())
            .cmp(&(b.domain.as_str(), b.request_path.as_str()))
    });

    let numbering = options.numbering;
    let mut output = BatchOutput::default();
    let mut priority = numbering.priority_begin;

    for phase in [RuleKind::Specific, RuleKind::Fallback] {
        let mut rule_number = match phase {
            RuleKind::Specific => numbering.specific_rule_number_begin,
            RuleKind::Fallback => numbering.fallback_rule_number_begin,
        };
        for rule in rules
            .iter()
            .filter(|r| (is_fallback_path(&r.request_path)) == (phase == RuleKind::Fallback))
        {
            let compiled = compile_rule(rule, options, rule_number, priority);
            output.redirects.extend(rule_commands(&compiled, options));
            output
                .unbind
                .extend(rollback_commands(rule_number, priority, options, true));
            output
                .rollback
                .extend(rollback_commands(rule_number, priority, options, false));

            rule_number += numbering.rule_number_increment;
            priority += numbering.priority_increment;
            match phase {
                RuleKind::Specific => output.specific_rules += 1,
                RuleKind::Fallback => output.fallback_rules += 1,
            }
        }
    }

    info!(
        specific_rules = output.specific_rules,
        fallback_rules = output.fallback_rules,
        redirect_lines = output.redirects.len(),
        "batch compiled"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(domain: &str, request: &str, redirect: &str) -> RedirectRule {
        RedirectRule {
            domain: domain.to_string(),
            request_path: request.to_string(),
            redirect_path: redirect.to_string(),
        }
    }

    fn test_options() -> CompileOptions {
        CompileOptions::new("https://www.newdomain.tld/", "vs_http", "vs_https")
    }

    /// Bind priorities in emission order, pulled back out of the text.
    fn bind_priorities(lines: &[String]) -> Vec<u32> {
        lines
            .iter()
            .filter(|l| l.starts_with("bind "))
            .map(|l| {
                let after = l.split("-priority ").nth(1).unwrap();
                after.split_whitespace().next().unwrap().parse().unwrap()
            })
            .collect()
    }

    fn policy_numbers(lines: &[String]) -> Vec<u32> {
        lines
            .iter()
            .filter(|l| l.starts_with("add responder policy "))
            .map(|l| {
                let name = l.split_whitespace().nth(3).unwrap();
                name.trim_start_matches("RespPol_").parse().unwrap()
            })
            .collect()
    }

    #[test]
    fn specific_rules_precede_fallback_rules() {
        let rules = vec![
            rule("a.tld", "/catch/*", "catch"),
            rule("a.tld", "/exact", "exact"),
        ];
        let output = compile_batch(rules, &test_options());

        assert_eq!(output.specific_rules, 1);
        assert_eq!(output.fallback_rules, 1);
        assert_eq!(policy_numbers(&output.redirects), vec![1000, 9000]);
    }

    #[test]
    fn rules_are_sorted_by_domain_then_path() {
        let rules = vec![
            rule("b.tld", "/one", "1"),
            rule("a.tld", "/two", "2"),
            rule("a.tld", "/one", "1"),
        ];
        let output = compile_batch(rules, &test_options());

        let policies: Vec<&String> = output
            .redirects
            .iter()
            .filter(|l| l.starts_with("add responder policy "))
            .collect();
        assert!(policies[0].contains("a.tld") && policies[0].contains("/one"));
        assert!(policies[1].contains("a.tld") && policies[1].contains("/two"));
        assert!(policies[2].contains("b.tld") && policies[2].contains("/one"));
    }

    #[test]
    fn rule_numbers_increase_by_increment_within_each_group() {
        let rules = vec![
            rule("a.tld", "/a", "a"),
            rule("a.tld", "/b", "b"),
            rule("a.tld", "/x/*", "x"),
            rule("a.tld", "/y/*", "y"),
        ];
        let output = compile_batch(rules, &test_options());
        assert_eq!(policy_numbers(&output.redirects), vec![1000, 1001, 9000, 9001]);
    }

    #[test]
    fn priorities_continue_across_groups_without_reset() {
        let rules = vec![
            rule("a.tld", "/a", "a"),
            rule("a.tld", "/b", "b"),
            rule("a.tld", "/x/*", "x"),
        ];
        let output = compile_batch(rules, &test_options());

        // two binds per rule, one per vserver
        assert_eq!(
            bind_priorities(&output.redirects),
            vec![100, 100, 110, 110, 120, 120]
        );
    }

    #[test]
    fn fallback_numbering_independent_of_specific_count() {
        let rules = vec![
            rule("a.tld", "/a", "a"),
            rule("a.tld", "/b", "b"),
            rule("a.tld", "/c", "c"),
            rule("a.tld", "/some-old-path/*", "fallback"),
        ];
        let output = compile_batch(rules, &test_options());
        assert_eq!(policy_numbers(&output.redirects), vec![1000, 1001, 1002, 9000]);
    }

    #[test]
    fn line_counts_per_rule() {
        let rules = vec![rule("a.tld", "/a", "a"), rule("a.tld", "/b/*", "b")];
        let output = compile_batch(rules, &test_options());

        assert_eq!(output.redirects.len(), 8);
        assert_eq!(output.unbind.len(), 4);
        assert_eq!(output.rollback.len(), 8);
    }

    #[test]
    fn unbind_lines_prefix_rollback_lines_per_rule() {
        let rules = vec![rule("a.tld", "/a", "a")];
        let output = compile_batch(rules, &test_options());

        assert_eq!(output.unbind.as_slice(), &output.rollback[..2]);
        assert!(output.rollback[2].starts_with("rm responder policy "));
        assert!(output.rollback[3].starts_with("rm responder action "));
    }

    #[test]
    fn duplicate_rules_compile_with_distinct_numbers() {
        let rules = vec![
            rule("a.tld", "/same", "one"),
            rule("a.tld", "/same", "two"),
        ];
        let output = compile_batch(rules, &test_options());
        assert_eq!(policy_numbers(&output.redirects), vec![1000, 1001]);
    }

    #[test]
    fn compilation_is_deterministic() {
        let rules = vec![
            rule("b.tld", "/z", "z"),
            rule("a.tld", "/a/*", "a"),
            rule("a.tld", "/b", "b"),
        ];
        let first = compile_batch(rules.clone(), &test_options());
        let second = compile_batch(rules, &test_options());
        assert_eq!(first, second);
    }

    #[test]
    fn custom_numbering_is_honored() {
        let numbering = redirgen_model::NumberingOptions {
            specific_rule_number_begin: 2000,
            fallback_rule_number_begin: 5000,
            rule_number_increment: 5,
            priority_begin: 10,
            priority_increment: 3,
        };
        let options = test_options().with_numbering(numbering);
        let rules = vec![
            rule("a.tld", "/a", "a"),
            rule("a.tld", "/b", "b"),
            rule("a.tld", "/c/*", "c"),
        ];
        let output = compile_batch(rules, &options);

        assert_eq!(policy_numbers(&output.redirects), vec![2000, 2005, 5000]);
        assert_eq!(bind_priorities(&output.redirects), vec![10, 10, 13, 13, 16, 16]);
    }
}
