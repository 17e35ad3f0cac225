//! Query string repair for pasted share links.

/// Replaces every `?` after the start of a query string with `&`.
///
/// `v=ID?si=TOKEN` becomes `v=ID&si=TOKEN`; a query without stray `?` is
/// returned unchanged.
pub fn normalize_query(query: &str) -> String {
    query.replace('?', "&")
}
