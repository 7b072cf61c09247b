//! Redirect target construction.

/// Policy-engine expression appending the original request's URL-safe
/// query string to the redirect target.
pub const QUERY_FORWARD_EXPR: &str = "HTTP.REQ.URL.QUERY.HTTP_URL_SAFE";

/// Build the fully qualified redirect target for a rule.
///
/// The relative path is joined onto the global prefix with exactly one
/// `/` between them, then the original query string is forwarded so
/// incoming parameters survive the redirect. The result is used verbatim
/// as the responder action's target expression.
pub fn build_redirect_target(prefix: &str, redirect_path: &str) -> String {
    let base = prefix.trim_end_matches('/');
    let rel = redirect_path.trim_start_matches('/');
    format!("\"{base}/{rel}?\" + {QUERY_FORWARD_EXPR}")
}
