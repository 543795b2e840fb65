//! URL construction for the field and issue endpoints
//!
//! The rest of the shell goes through these helpers so the path layout lives
//! in one place. Only the endpoints the field engine needs are covered.

/// Page size used by the paginated custom-field search
pub const FIELD_SEARCH_PAGE_SIZE: u64 = 50;

/// Paginated custom-field search, filtered to custom fields.
pub fn field_search(base_url: &str, query: &str, start_at: u64) -> String {
    format!(
        "{base_url}/rest/api/3/field/search?type=custom&query={}&startAt={start_at}&maxResults={FIELD_SEARCH_PAGE_SIZE}",
        urlencoding::encode(query)
    )
}

/// The full (system + custom) field list.
pub fn fields(base_url: &str) -> String {
    format!("{base_url}/rest/api/3/field")
}

/// A single issue by key or id.
pub fn issue(base_url: &str, key: &str) -> String {
    format!("{base_url}/rest/api/3/issue/{}", urlencoding::encode(key))
}

/// The watchers sub-resource of an issue.
pub fn watchers(base_url: &str, key: &str) -> String {
    format!("{}/watchers", issue(base_url, key))
}
