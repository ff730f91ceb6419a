//! Log sanitization utilities
//!
//! The console answers with whole HTML pages, and the login form carries a
//! password; neither belongs in debug logs unfiltered.

/// Maximum number of bytes of a page body to include in debug output.
const EXCERPT_LIMIT: usize = 512;

/// Form fields whose values are never logged.
const SENSITIVE_FIELDS: &[&str] = &["password"];

/// A bounded excerpt of a page body for debug logging.
///
/// Bodies within the limit are returned whole; longer ones are cut at the
/// nearest char boundary at or below the limit, with the total size noted.
pub(crate) fn excerpt(body: &str) -> String {
    if body.len() <= EXCERPT_LIMIT {
        return body.to_string();
    }
    let mut end = EXCERPT_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{} [+{} bytes]", &body[..end], body.len() - end)
}

/// Render form pairs for debug logging with sensitive values masked.
pub(crate) fn redact_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            if SENSITIVE_FIELDS.contains(&key.as_str()) {
                format!("{key}=***")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
