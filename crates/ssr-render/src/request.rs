//! Per-request render input and output.

use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use ssr_core::{CookieJar, MapCookieJar, ProxyConfig, RenderTime, SetCookie};
use ssr_streaming::ContentStream;

use crate::assets::Assets;
use crate::initializer::InitializeHook;
use crate::resolvable::{HtmlHooks, Resolvable};

/// Input for a single render call.
#[derive(Clone)]
pub struct RenderRequest {
    /// Request URL (path + query, or absolute).
    pub url: String,
    /// Incoming request cookies.
    pub cookies: Arc<dyn CookieJar>,
    /// Asset manifest, literal or per request.
    pub assets: Resolvable<Assets>,
    /// Head/body customization.
    pub html: HtmlHooks,
    /// Render page content between the outer fragments.
    pub render_content: bool,
    /// Locale preference list, most preferred first.
    pub locales: Vec<String>,
    /// Hook passed through to the state initializer.
    pub initialize: Option<InitializeHook>,
    /// Proxy settings passed through to the state initializer.
    pub proxy: Option<ProxyConfig>,
}

impl RenderRequest {
    /// Create a request for the given URL with default options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cookies: Arc::new(MapCookieJar::new()),
            assets: Resolvable::default(),
            html: HtmlHooks::default(),
            render_content: true,
            locales: Vec::new(),
            initialize: None,
            proxy: None,
        }
    }

    /// Set the cookie accessor.
    pub fn with_cookies(mut self, cookies: impl CookieJar + 'static) -> Self {
        self.cookies = Arc::new(cookies);
        self
    }

    /// Set the asset manifest.
    pub fn with_assets(mut self, assets: impl Into<Resolvable<Assets>>) -> Self {
        self.assets = assets.into();
        self
    }

    /// Set head/body customization hooks.
    pub fn with_html(mut self, html: HtmlHooks) -> Self {
        self.html = html;
        self
    }

    /// Enable or disable rendering page content.
    pub fn with_render_content(mut self, render_content: bool) -> Self {
        self.render_content = render_content;
        self
    }

    /// Set the locale preference list.
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initialize hook.
    pub fn with_initialize(mut self, hook: InitializeHook) -> Self {
        self.initialize = Some(hook);
        self
    }

    /// Set proxy settings.
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }
}

impl fmt::Debug for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderRequest")
            .field("url", &self.url)
            .field("assets", &self.assets)
            .field("html", &self.html)
            .field("render_content", &self.render_content)
            .field("locales", &self.locales)
            .field("initialize", &self.initialize.is_some())
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}

/// A rendered page ready to be streamed.
pub struct RenderedContent {
    /// Matched route name.
    pub route: Option<String>,
    /// HTTP status.
    pub status: StatusCode,
    /// Combined output: before-content, page content, after-content.
    pub content: ContentStream,
    /// Timing breakdown including initialization.
    pub time: RenderTime,
    /// Cookies the response should set.
    pub cookies: Vec<SetCookie>,
}

impl fmt::Debug for RenderedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedContent")
            .field("route", &self.route)
            .field("status", &self.status)
            .field("time", &self.time)
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}

/// Result of a render call.
#[derive(Debug)]
pub enum RenderOutcome {
    /// Redirect to the given URL (basename applied).
    Redirect(String),
    /// Page content.
    Content(RenderedContent),
}

impl RenderOutcome {
    /// The redirect URL, if this is a redirect.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            RenderOutcome::Redirect(url) => Some(url),
            RenderOutcome::Content(_) => None,
        }
    }

    /// Whether this is a redirect.
    pub fn is_redirect(&self) -> bool {
        matches!(self, RenderOutcome::Redirect(_))
    }

    /// The rendered content, if this is a content result.
    pub fn into_content(self) -> Option<RenderedContent> {
        match self {
            RenderOutcome::Content(content) => Some(content),
            RenderOutcome::Redirect(_) => None,
        }
    }
}
