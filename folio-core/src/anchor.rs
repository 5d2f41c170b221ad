// In-page link helpers

/// Extract the element id targeted by an in-page link `href`.
///
/// Only hrefs of the form `#id` qualify; a bare `#` or any href that does
/// not start with `#` yields `None`.
#[must_use]
pub fn in_page_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Extract the fragment id from `location.hash`.
///
/// Browsers report an empty string when there is no fragment, and `#id`
/// otherwise; both forms (with or without the leading `#`) are accepted.
#[must_use]
pub fn hash_fragment(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    (!id.is_empty()).then_some(id)
}
