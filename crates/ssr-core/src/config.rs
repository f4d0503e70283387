//! Route and site configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a single route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route pattern (e.g., "/products/:id").
    pub pattern: String,
    /// Route name reported back in render results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteConfig {
    /// Create a new unnamed route configuration.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            name: None,
        }
    }

    /// Set the route name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check the pattern is an absolute path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.starts_with('/') {
            Ok(())
        } else {
            Err(ConfigError::InvalidRoute(self.pattern.clone()))
        }
    }
}

/// Authentication sub-configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationSettings {
    /// Name of the cookie forwarded to the state initializer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_cookie: Option<String>,
}

impl AuthenticationSettings {
    /// Create settings reading the given protected cookie.
    pub fn with_protected_cookie(name: impl Into<String>) -> Self {
        Self {
            protected_cookie: Some(name.into()),
        }
    }

    /// The protected cookie name, if one is configured and non-empty.
    pub fn protected_cookie(&self) -> Option<&str> {
        self.protected_cookie
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

/// Proxy settings passed through to the state initializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Upstream host.
    pub host: String,
    /// Upstream port.
    pub port: u16,
    /// Whether the upstream speaks HTTPS.
    #[serde(default)]
    pub secure: bool,
}

impl ProxyConfig {
    /// Create a plain HTTP proxy configuration.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            secure: false,
        }
    }

    /// Base URL of the upstream.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

/// Normalize a basename: leading slash required, trailing slash stripped.
///
/// An empty basename or `/` means "no basename".
pub fn normalize_basename(basename: &str) -> Result<Option<String>, ConfigError> {
    let trimmed = basename.trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidBasename(basename.to_string()));
    }
    Ok(Some(trimmed.to_string()))
}

/// Structural configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("`routes` setting is required and must not be empty")]
    MissingRoutes,

    #[error("Route pattern must start with '/': {0}")]
    InvalidRoute(String),

    #[error("`basename` must start with '/': {0}")]
    InvalidBasename(String),

    #[error("`assets.entries` array parameter is required when there is no \"main\" javascript entry")]
    MissingAssetEntries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_validate() {
        assert!(RouteConfig::new("/products/:id").validate().is_ok());
        assert_eq!(
            RouteConfig::new("products").validate(),
            Err(ConfigError::InvalidRoute("products".to_string()))
        );
    }

    #[test]
    fn test_protected_cookie_empty_is_absent() {
        let auth = AuthenticationSettings::with_protected_cookie("");
        assert_eq!(auth.protected_cookie(), None);

        let auth = AuthenticationSettings::with_protected_cookie("jwt");
        assert_eq!(auth.protected_cookie(), Some("jwt"));
    }

    #[test]
    fn test_normalize_basename() {
        assert_eq!(normalize_basename("").unwrap(), None);
        assert_eq!(normalize_basename("/").unwrap(), None);
        assert_eq!(normalize_basename("/app/").unwrap(), Some("/app".to_string()));
        assert_eq!(
            normalize_basename("app"),
            Err(ConfigError::InvalidBasename("app".to_string()))
        );
    }

    #[test]
    fn test_proxy_base_url() {
        let mut proxy = ProxyConfig::new("api.internal", 8080);
        assert_eq!(proxy.base_url(), "http://api.internal:8080");
        proxy.secure = true;
        assert_eq!(proxy.base_url(), "https://api.internal:8080");
    }

    #[test]
    fn test_missing_entries_message_names_requirement() {
        assert!(ConfigError::MissingAssetEntries
            .to_string()
            .contains("assets.entries"));
    }
}
