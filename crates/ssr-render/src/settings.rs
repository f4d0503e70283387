//! Render settings and their normalization.

use std::fmt;
use std::sync::Arc;

use ssr_core::{normalize_basename, AuthenticationSettings, ConfigError, RouteConfig};

use crate::error::RenderError;
use crate::error_handler::{ErrorContext, ErrorHandler};
use crate::page::{Container, PassthroughContainer};

/// Site settings as supplied by the application.
///
/// # Example
///
/// ```rust,ignore
/// let settings = Settings::new(routes)
///     .with_container(AppContainer)
///     .with_authentication(AuthenticationSettings::with_protected_cookie("jwt"))
///     .with_error_handler(|error, context| {
///         if error.downcast_ref::<Unauthorized>().is_some() {
///             context.redirect("/login");
///         }
///     });
/// ```
#[derive(Clone, Default)]
pub struct Settings {
    routes: Vec<RouteConfig>,
    container: Option<Arc<dyn Container>>,
    authentication: Option<AuthenticationSettings>,
    basename: Option<String>,
    error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl Settings {
    /// Create settings with the given routes.
    pub fn new(routes: Vec<RouteConfig>) -> Self {
        Self {
            routes,
            ..Default::default()
        }
    }

    /// Add a route.
    pub fn with_route(mut self, route: RouteConfig) -> Self {
        self.routes.push(route);
        self
    }

    /// Set the root container.
    pub fn with_container(mut self, container: impl Container + 'static) -> Self {
        self.container = Some(Arc::new(container));
        self
    }

    /// Set the authentication sub-configuration.
    pub fn with_authentication(mut self, authentication: AuthenticationSettings) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Set the basename prepended to relative redirects.
    pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = Some(basename.into());
        self
    }

    /// Set the error handler from a closure.
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RenderError, &ErrorContext<'_>) + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Set a shared error handler.
    pub fn with_shared_error_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = Some(handler);
        self
    }

    /// The configured routes.
    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    /// Validate and apply defaults.
    pub fn normalize(&self) -> Result<NormalizedSettings, ConfigError> {
        if self.routes.is_empty() {
            return Err(ConfigError::MissingRoutes);
        }
        for route in &self.routes {
            route.validate()?;
        }

        let basename = match &self.basename {
            Some(basename) => normalize_basename(basename)?,
            None => None,
        };

        Ok(NormalizedSettings {
            routes: self.routes.clone(),
            container: self
                .container
                .clone()
                .unwrap_or_else(|| Arc::new(PassthroughContainer)),
            authentication: self.authentication.clone().unwrap_or_default(),
            basename,
            error_handler: self.error_handler.clone(),
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("routes", &self.routes)
            .field("container", &self.container.is_some())
            .field("authentication", &self.authentication)
            .field("basename", &self.basename)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

/// Settings with defaults applied. Immutable for the duration of a render.
#[derive(Clone)]
pub struct NormalizedSettings {
    pub routes: Vec<RouteConfig>,
    pub container: Arc<dyn Container>,
    pub authentication: AuthenticationSettings,
    pub basename: Option<String>,
    pub error_handler: Option<Arc<dyn ErrorHandler>>,
}

impl fmt::Debug for NormalizedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedSettings")
            .field("routes", &self.routes)
            .field("authentication", &self.authentication)
            .field("basename", &self.basename)
            .field("error_handler", &self.error_handler.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Vec<RouteConfig> {
        vec![
            RouteConfig::new("/").with_name("home"),
            RouteConfig::new("/about").with_name("about"),
        ]
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let settings = Settings::new(routes()).normalize().unwrap();

        assert_eq!(settings.routes.len(), 2);
        assert_eq!(settings.authentication, AuthenticationSettings::default());
        assert!(settings.basename.is_none());
        assert!(settings.error_handler.is_none());
    }

    #[test]
    fn test_normalize_requires_routes() {
        assert_eq!(
            Settings::default().normalize().unwrap_err(),
            ConfigError::MissingRoutes
        );
    }

    #[test]
    fn test_normalize_rejects_relative_route() {
        let err = Settings::new(routes())
            .with_route(RouteConfig::new("cart"))
            .normalize()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidRoute("cart".to_string()));
    }

    #[test]
    fn test_normalize_basename() {
        let settings = Settings::new(routes()).with_basename("/shop/").normalize().unwrap();
        assert_eq!(settings.basename.as_deref(), Some("/shop"));

        let err = Settings::new(routes()).with_basename("shop").normalize().unwrap_err();
        assert_eq!(err, ConfigError::InvalidBasename("shop".to_string()));
    }

    #[test]
    fn test_normalize_keeps_error_handler() {
        let settings = Settings::new(routes())
            .with_error_handler(|_, _| {})
            .normalize()
            .unwrap();
        assert!(settings.error_handler.is_some());
    }
}
