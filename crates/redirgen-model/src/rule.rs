//! Input and compiled representations of a single redirect rule.

/// One row of the redirect CSV: where a request arrives and where it goes.
///
/// All three fields are non-empty; the ingest boundary rejects rows that
/// are missing a value, so downstream compilation never checks again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    /// Hostname the rule applies to (e.g. `olddomain.tld`).
    pub domain: String,
    /// Request path pattern; a trailing `*` marks a fallback (prefix) rule.
    pub request_path: String,
    /// Redirect destination, relative to the configured URL prefix.
    pub redirect_path: String,
}

/// Classification of a rule's request path.
///
/// Specific rules are matched exactly (or by an anchored regex) and are
/// numbered and bound before any fallback rule; fallback rules match by
/// prefix and catch whatever the specific rules let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Specific,
    Fallback,
}

/// A fully compiled rule, ready for command serialization.
///
/// Immutable; produced once per input row and consumed immediately by the
/// command formatters. Only the serialized text survives in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub rule_number: u32,
    pub priority: u32,
    pub domain_expr: String,
    pub url_expr: String,
    pub action_name: String,
    pub policy_name: String,
    pub target_url: String,
}

/// Name of the responder action for a rule number, zero-padded to 4 digits.
pub fn action_name(rule_number: u32) -> String {
    format!("RespAct_{rule_number:04}")
}

/// Name of the responder policy for a rule number, zero-padded to 4 digits.
pub fn policy_name(rule_number: u32) -> String {
    format!("RespPol_{rule_number:04}")
}
