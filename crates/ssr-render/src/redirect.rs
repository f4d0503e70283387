//! Redirect normalization.

use std::sync::OnceLock;

use ssr_core::Location;

/// Serialize a redirect target, prefixing `basename` when it is relative.
pub fn normalize_redirect(target: &Location, basename: Option<&str>) -> String {
    target.to_url(basename)
}

/// Parse and normalize a redirect given as a string.
///
/// Unparseable targets that name a scheme or a host are returned unchanged.
/// Any other unparseable target is treated as a bare path.
pub fn normalize_redirect_str(target: &str, basename: Option<&str>) -> String {
    match Location::parse(target) {
        Ok(location) => normalize_redirect(&location, basename),
        Err(_) if target.contains("://") || target.starts_with("//") => target.to_string(),
        Err(_) if target.starts_with('/') => {
            normalize_redirect(&Location::from_path(target), basename)
        }
        Err(_) => normalize_redirect(&Location::from_path(format!("/{}", target)), basename),
    }
}

/// Holds at most one redirect; the first request wins.
#[derive(Debug, Default)]
pub struct RedirectSlot {
    target: OnceLock<String>,
}

impl RedirectSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a redirect. Returns `false` if one was already recorded.
    pub fn request(&self, url: String) -> bool {
        self.target.set(url).is_ok()
    }

    /// The recorded redirect.
    pub fn get(&self) -> Option<&str> {
        self.target.get().map(String::as_str)
    }

    /// Take the recorded redirect.
    pub fn into_inner(self) -> Option<String> {
        self.target.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_prefixed_for_relative_target() {
        let target = Location::from_path("/foo");
        assert_eq!(normalize_redirect(&target, Some("/app")), "/app/foo");
        assert_eq!(normalize_redirect(&target, None), "/foo");
    }

    #[test]
    fn test_query_and_hash_preserved() {
        assert_eq!(
            normalize_redirect_str("/login?next=%2Fcart#form", Some("/app")),
            "/app/login?next=%2Fcart#form"
        );
    }

    #[test]
    fn test_absolute_target_untouched() {
        assert_eq!(
            normalize_redirect_str("https://accounts.example.com/sign-in", Some("/app")),
            "https://accounts.example.com/sign-in"
        );
    }

    #[test]
    fn test_custom_scheme_target_untouched() {
        assert_eq!(
            normalize_redirect_str("myapp://callback/done?x=1", Some("/app")),
            "myapp://callback/done?x=1"
        );
        assert_eq!(normalize_redirect_str("mailto:x@y", Some("/app")), "mailto:x@y");
    }

    #[test]
    fn test_scheme_relative_target_keeps_host() {
        assert_eq!(
            normalize_redirect_str("//other.example.com/x", Some("/app")),
            "//other.example.com/x"
        );
    }

    #[test]
    fn test_unparseable_target() {
        assert_eq!(normalize_redirect_str("http://[::1", Some("/app")), "http://[::1");
        assert_eq!(normalize_redirect_str("//[::1/x", Some("/app")), "//[::1/x");
    }

    #[test]
    fn test_slot_first_redirect_wins() {
        let slot = RedirectSlot::new();
        assert!(slot.get().is_none());
        assert!(slot.request("/login".to_string()));
        assert!(!slot.request("/elsewhere".to_string()));
        assert_eq!(slot.get(), Some("/login"));
        assert_eq!(slot.into_inner(), Some("/login".to_string()));
    }
}
