//! Configuration threaded explicitly through every compiler call.

/// Numbering scheme for generated rule objects and bind priorities.
///
/// Specific and fallback rules draw from separate rule-number ranges; the
/// caller is responsible for choosing ranges that do not overlap. Bind
/// priorities come from a single sequence shared by both groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingOptions {
    /// First rule number for specific (non-wildcard) rules.
    pub specific_rule_number_begin: u32,
    /// First rule number for fallback (trailing-wildcard) rules.
    pub fallback_rule_number_begin: u32,
    /// Step between consecutive rule numbers within a group.
    pub rule_number_increment: u32,
    /// First bind priority, consumed by the specific group.
    pub priority_begin: u32,
    /// Step between consecutive bind priorities.
    pub priority_increment: u32,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            specific_rule_number_begin: 1000,
            fallback_rule_number_begin: 9000,
            rule_number_increment: 1,
            priority_begin: 100,
            priority_increment: 10,
        }
    }
}

/// Options controlling rule compilation for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Fully qualified URL prefix every redirect target is joined onto.
    pub redirect_url_prefix: String,
    /// Content-switching vserver for plain HTTP traffic.
    pub http_vserver: String,
    /// Content-switching vserver for TLS traffic.
    pub https_vserver: String,
    /// Rule numbering and priority scheme.
    pub numbering: NumberingOptions,
}

impl CompileOptions {
    pub fn new(
        redirect_url_prefix: impl Into<String>,
        http_vserver: impl Into<String>,
        https_vserver: impl Into<String>,
    ) -> Self {
        Self {
            redirect_url_prefix: redirect_url_prefix.into(),
            http_vserver: http_vserver.into(),
            https_vserver: https_vserver.into(),
            numbering: NumberingOptions::default(),
        }
    }

    #[must_use]
    pub fn with_numbering(mut self, numbering: NumberingOptions) -> Self {
        self.numbering = numbering;
        self
    }
}
