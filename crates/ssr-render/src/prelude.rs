//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use ssr_render::prelude::*;
//! ```

pub use std::sync::Arc;

pub use serde_json::json;

// Pipeline and its collaborators
pub use crate::{
    Container, ContainerProps, ErrorContext, InitializeContext, Initialized, PageElement,
    PageOutcome, PageRenderer, RenderPipeline, RenderedPage, StateInitializer, StaticInitializer,
};

// Request and result types
pub use crate::{
    Assets, HtmlHooks, RenderError, RenderOutcome, RenderRequest, RenderedContent, Resolvable,
    Settings,
};

// Data model
pub use crate::{
    AuthenticationSettings, CookieJar, Location, MapCookieJar, PageMeta, RouteConfig, SetCookie,
};
