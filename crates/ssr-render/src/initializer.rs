//! State initializer seam.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use ssr_core::{CookieJar, ProxyConfig, SetCookie};

use crate::settings::NormalizedSettings;
use crate::store::{state_bootstrap_script, JsonStore, Parameters, Store};

/// Application hook run against a freshly created store (e.g. to preload data).
pub type InitializeHook =
    Arc<dyn Fn(Arc<dyn Store>) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Produces the client bootstrap script once rendering is done.
pub type BootstrapScript = Box<dyn Fn() -> String + Send + Sync>;

/// Request context passed to the state initializer.
pub struct InitializeContext<'a> {
    /// Value of the protected cookie, if configured and present.
    pub protected_cookie: Option<String>,
    /// Proxy settings.
    pub proxy: Option<&'a ProxyConfig>,
    /// Incoming request cookies.
    pub cookies: &'a dyn CookieJar,
    /// Application initialize hook.
    pub initialize: Option<&'a InitializeHook>,
    /// Full request URL.
    pub url: &'a str,
}

/// Result of state initialization.
pub struct Initialized {
    /// Cookies the response should set.
    pub cookies: Vec<SetCookie>,
    /// Client bootstrap script generator.
    pub bootstrap: BootstrapScript,
    /// Parameters for the page renderer.
    pub parameters: Parameters,
}

/// Creates the application state for a request.
#[async_trait]
pub trait StateInitializer: Send + Sync {
    /// Initialize state for one render.
    async fn initialize(
        &self,
        settings: &NormalizedSettings,
        context: InitializeContext<'_>,
    ) -> anyhow::Result<Initialized>;
}

/// Initializer seeding a [`JsonStore`] with a fixed state.
///
/// Runs the request's initialize hook, if any, against the new store and
/// bootstraps the client with the resulting state.
#[derive(Debug, Clone, Default)]
pub struct StaticInitializer {
    state: Value,
    cookies: Vec<SetCookie>,
}

impl StaticInitializer {
    /// Create an initializer with the given initial state.
    pub fn new(state: Value) -> Self {
        Self {
            state,
            cookies: Vec::new(),
        }
    }

    /// Set a cookie on every response.
    pub fn with_cookie(mut self, cookie: SetCookie) -> Self {
        self.cookies.push(cookie);
        self
    }
}

#[async_trait]
impl StateInitializer for StaticInitializer {
    async fn initialize(
        &self,
        _settings: &NormalizedSettings,
        context: InitializeContext<'_>,
    ) -> anyhow::Result<Initialized> {
        let store: Arc<dyn Store> = Arc::new(JsonStore::new(self.state.clone()));

        if let Some(hook) = context.initialize {
            hook(Arc::clone(&store)).await?;
        }

        let bootstrap_store = Arc::clone(&store);
        Ok(Initialized {
            cookies: self.cookies.clone(),
            bootstrap: Box::new(move || state_bootstrap_script(bootstrap_store.as_ref())),
            parameters: Parameters::new(store).with("url", Value::String(context.url.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use futures::FutureExt;
    use serde_json::json;
    use ssr_core::{MapCookieJar, RouteConfig};

    fn settings() -> NormalizedSettings {
        Settings::new(vec![RouteConfig::new("/")]).normalize().unwrap()
    }

    #[tokio::test]
    async fn test_static_initializer_runs_hook() {
        let hook: InitializeHook = Arc::new(|store: Arc<dyn Store>| {
            async move {
                assert_eq!(store.state(), json!({ "count": 1 }));
                Ok::<(), anyhow::Error>(())
            }
            .boxed()
        });
        let cookies = MapCookieJar::new();
        let initializer = StaticInitializer::new(json!({ "count": 1 }))
            .with_cookie(SetCookie::new("visited", "1"));

        let initialized = initializer
            .initialize(
                &settings(),
                InitializeContext {
                    protected_cookie: None,
                    proxy: None,
                    cookies: &cookies,
                    initialize: Some(&hook),
                    url: "/counter",
                },
            )
            .await
            .unwrap();

        assert_eq!(initialized.cookies, vec![SetCookie::new("visited", "1")]);
        assert_eq!((initialized.bootstrap)(), r#"window._state = {"count":1};"#);
        assert_eq!(initialized.parameters.get("url"), Some(&json!("/counter")));
    }

    #[tokio::test]
    async fn test_static_initializer_hook_failure() {
        let hook: InitializeHook = Arc::new(|_: Arc<dyn Store>| {
            async { Err::<(), anyhow::Error>(anyhow::anyhow!("preload failed")) }.boxed()
        });
        let cookies = MapCookieJar::new();

        let result = StaticInitializer::default()
            .initialize(
                &settings(),
                InitializeContext {
                    protected_cookie: None,
                    proxy: None,
                    cookies: &cookies,
                    initialize: Some(&hook),
                    url: "/",
                },
            )
            .await;

        assert_eq!(result.err().unwrap().to_string(), "preload failed");
    }
}
