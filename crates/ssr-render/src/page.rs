//! Page renderer and container seams.

use std::fmt;

use async_trait::async_trait;
use http::StatusCode;
use ssr_core::{Location, RenderTime, RouteConfig};
use ssr_streaming::{html_chunk, ContentStream, PageMeta};

use crate::store::Parameters;

/// Props handed to the root container.
pub type ContainerProps = serde_json::Map<String, serde_json::Value>;

/// A renderable element of the page tree.
pub trait PageElement: Send {
    /// Render the element to a stream of HTML chunks.
    fn into_stream(self: Box<Self>) -> ContentStream;
}

impl PageElement for String {
    fn into_stream(self: Box<Self>) -> ContentStream {
        html_chunk(*self)
    }
}

/// Root container wrapping the routed page content.
pub trait Container: Send + Sync {
    /// Wrap the page content.
    fn wrap(&self, content: Box<dyn PageElement>, props: &ContainerProps) -> Box<dyn PageElement>;
}

/// Container that renders the content unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughContainer;

impl Container for PassthroughContainer {
    fn wrap(&self, content: Box<dyn PageElement>, _props: &ContainerProps) -> Box<dyn PageElement> {
        content
    }
}

/// A successfully rendered page.
pub struct RenderedPage {
    /// Matched route name.
    pub route: Option<String>,
    /// HTTP status.
    pub status: StatusCode,
    /// Routed page content.
    pub content: Box<dyn PageElement>,
    /// Title and meta tags.
    pub meta: PageMeta,
    /// Props for the root container.
    pub container_props: ContainerProps,
    /// Load/render timing.
    pub time: RenderTime,
}

impl RenderedPage {
    /// Create a 200 page with the given content.
    pub fn new(content: impl PageElement + 'static) -> Self {
        Self {
            route: None,
            status: StatusCode::OK,
            content: Box::new(content),
            meta: PageMeta::default(),
            container_props: ContainerProps::new(),
            time: RenderTime::default(),
        }
    }

    /// Set the route name.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Set the page metadata.
    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Add a container prop.
    pub fn with_container_prop(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.container_props.insert(key.into(), value);
        self
    }

    /// Set the timing breakdown.
    pub fn with_time(mut self, time: RenderTime) -> Self {
        self.time = time;
        self
    }
}

impl fmt::Debug for RenderedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedPage")
            .field("route", &self.route)
            .field("status", &self.status)
            .field("meta", &self.meta)
            .field("container_props", &self.container_props)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

/// Outcome of the page renderer.
#[derive(Debug)]
pub enum PageOutcome {
    /// Route matching or data loading requested a redirect.
    Redirect(Location),
    /// The page was rendered.
    Rendered(RenderedPage),
}

/// Performs data fetching, route matching and the component tree render.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render the page for the initialized state.
    async fn render_page(
        &self,
        parameters: &Parameters,
        routes: &[RouteConfig],
    ) -> anyhow::Result<PageOutcome>;
}
