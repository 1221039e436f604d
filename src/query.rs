//! Query normalization and the encodings each transport needs.

use ldap3::ldap_escape;
use url::form_urlencoded;

/// Strip surrounding whitespace and anything from the first `@` on, so that
/// `jdoe@uci.edu` and `jdoe` are the same query.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let local = trimmed.split('@').next().unwrap_or_default();
    local.trim().to_string()
}

/// Encode a query for a URL query string (spaces become `+`, commas `%2C`).
pub fn url_encode(query: &str) -> String {
    form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

/// `(uid=<id>)` with the identifier escaped
pub fn uid_filter(id: &str) -> String {
    format!("(uid={})", ldap_escape(id))
}

/// `(|(uid=a)(uid=b)...)` for a batch. A single identifier yields the plain filter.
pub fn uid_or_filter<S: AsRef<str>>(ids: &[S]) -> String {
    if ids.len() == 1 {
        return uid_filter(ids[0].as_ref());
    }
    let clauses: String = ids.iter().map(|id| uid_filter(id.as_ref())).collect();
    format!("(|{})", clauses)
}
