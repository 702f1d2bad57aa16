//! Hash location handling.

/// Reduce a location to the path the route table matches on.
///
/// Accepts `#/path`, full URLs carrying a hash, and bare paths. Query strings
/// are dropped, a leading slash is ensured and a trailing slash removed.
///
/// ```
/// use sitegate_router::normalize_location;
///
/// assert_eq!(normalize_location("https://site.example/#/page/about?ref=nav"), "/page/about");
/// assert_eq!(normalize_location("#/profile/"), "/profile");
/// assert_eq!(normalize_location(""), "/");
/// ```
pub fn normalize_location(raw: &str) -> String {
    let raw = raw.trim();
    let path = match raw.split_once('#') {
        Some((_, fragment)) => fragment,
        None => raw,
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let mut normalized = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(path);

    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Hash URL for a normalized path.
pub fn href(path: &str) -> String {
    format!("#{path}")
}
