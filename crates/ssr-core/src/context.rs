//! Request identity and cookie access.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique request identifier for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let seq = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{:x}-{:x}", nanos, seq))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read access to the incoming request's cookies.
pub trait CookieJar: Send + Sync {
    /// Get a cookie value by name.
    fn get(&self, name: &str) -> Option<String>;
}

/// Cookie jar backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MapCookieJar {
    cookies: HashMap<String, String>,
}

impl MapCookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie` request header (`a=1; b=2`).
    ///
    /// Malformed pairs are skipped; the first occurrence of a name wins.
    pub fn from_header(header: &str) -> Self {
        let mut cookies = HashMap::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"');
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self { cookies }
    }

    /// Add a cookie.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Number of cookies in the jar.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar is empty.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieJar for MapCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }
}

/// A cookie the response should set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// Cookie path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Max-Age in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    /// HttpOnly flag.
    #[serde(default)]
    pub http_only: bool,
    /// Secure flag.
    #[serde(default)]
    pub secure: bool,
}

impl SetCookie {
    /// Create a session cookie.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: None,
            max_age: None,
            http_only: false,
            secure: false,
        }
    }

    /// Set the cookie path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set Max-Age in seconds.
    pub fn with_max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Mark the cookie HttpOnly.
    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Mark the cookie Secure.
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Format as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        let mut header = format!("{}={}", self.name, self.value);
        if let Some(path) = &self.path {
            header.push_str(&format!("; Path={}", path));
        }
        if let Some(max_age) = self.max_age {
            header.push_str(&format!("; Max-Age={}", max_age));
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cookie_jar_from_header() {
        let jar = MapCookieJar::from_header("jwt=abc.def; theme=\"dark\"; broken; =x");
        assert_eq!(jar.get("jwt"), Some("abc.def".to_string()));
        assert_eq!(jar.get("theme"), Some("dark".to_string()));
        assert_eq!(jar.get("broken"), None);
        assert_eq!(jar.len(), 2);
    }

    #[test]
    fn test_cookie_jar_first_wins() {
        let jar = MapCookieJar::from_header("a=1; a=2");
        assert_eq!(jar.get("a"), Some("1".to_string()));
    }

    #[test]
    fn test_set_cookie_header_value() {
        let cookie = SetCookie::new("session", "xyz")
            .with_path("/")
            .with_max_age(3600)
            .http_only()
            .secure();
        assert_eq!(
            cookie.to_header_value(),
            "session=xyz; Path=/; Max-Age=3600; HttpOnly; Secure"
        );
        assert_eq!(SetCookie::new("a", "b").to_header_value(), "a=b");
    }
}
