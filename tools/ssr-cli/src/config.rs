//! Site configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ssr_core::{AuthenticationSettings, MapCookieJar, RouteConfig};
use ssr_render::{Assets, HtmlHooks, RenderRequest, Settings};

/// Site configuration file (`ssr.toml` or `ssr.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Routes table.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    /// Path prefix prepended to relative redirects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basename: Option<String>,

    /// Authentication settings.
    #[serde(default)]
    pub authentication: AuthenticationSettings,

    /// Build asset manifest.
    #[serde(default)]
    pub assets: Assets,

    /// Static head/body fragments.
    #[serde(default)]
    pub html: HtmlConfig,

    /// Locale preference list.
    #[serde(default)]
    pub locales: Vec<String>,

    /// Initial application state.
    #[serde(default)]
    pub state: Map<String, Value>,
}

impl SiteConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Build render settings from the config.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new(self.routes.clone())
            .with_authentication(self.authentication.clone());
        if let Some(basename) = &self.basename {
            settings = settings.with_basename(basename.clone());
        }
        settings
    }

    /// Build a render request for `url` from the config.
    pub fn to_request(&self, url: &str, cookies: MapCookieJar) -> RenderRequest {
        RenderRequest::new(url)
            .with_cookies(cookies)
            .with_assets(self.assets.clone())
            .with_html(self.html.to_hooks())
            .with_locales(self.locales.iter().cloned())
    }

    /// Initial state as a JSON value.
    pub fn initial_state(&self) -> Value {
        Value::Object(self.state.clone())
    }
}

/// Static HTML fragments inserted into the outer HTML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HtmlConfig {
    /// Inserted at the end of `<head>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    /// Inserted right after `<body>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_start: Option<String>,

    /// Inserted right before `</body>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_end: Option<String>,
}

impl HtmlConfig {
    /// Convert to render hooks.
    pub fn to_hooks(&self) -> HtmlHooks {
        let mut hooks = HtmlHooks::new();
        if let Some(head) = &self.head {
            hooks = hooks.with_head(head.clone());
        }
        if let Some(body_start) = &self.body_start {
            hooks = hooks.with_body_start(body_start.clone());
        }
        if let Some(body_end) = &self.body_end {
            hooks = hooks.with_body_end(body_end.clone());
        }
        hooks
    }
}

/// Generate a starter `ssr.toml`.
pub fn generate_default_config() -> String {
    r##"# Server-side rendering site configuration

basename = "/"
locales = ["en"]

[[routes]]
pattern = "/"
name = "home"

[authentication]
protected_cookie = "jwt"

[assets]
icon = "/favicon.ico"

[assets.javascript]
main = "/assets/main.js"

[assets.styles]
main = "/assets/main.css"

[html]
head = '<meta name="theme-color" content="#ffffff">'

[state]
"##
    .to_string()
}
