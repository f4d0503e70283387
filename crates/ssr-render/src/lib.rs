//! Server-side page rendering pipeline.
//!
//! Glues an application's state initializer and page renderer into a single
//! render call that produces either a redirect or a stream of HTML.
//!
//! # Architecture
//!
//! A render runs these steps:
//! - Normalize `Settings` (routes, container, authentication, basename)
//! - Read the protected cookie and run the `StateInitializer`
//! - Render `/react-website-base` as a static shell without page content
//! - Otherwise run the `PageRenderer`, honoring its redirects
//! - Wrap the content in the outer HTML and combine the streams
//! - Offer failures to the error handler, which may redirect instead
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ssr_render::prelude::*;
//!
//! let pipeline = RenderPipeline::new(
//!     Arc::new(StaticInitializer::new(json!({ "cart": [] }))),
//!     Arc::new(AppRenderer::new()),
//! );
//!
//! let settings = Settings::new(vec![RouteConfig::new("/").with_name("home")])
//!     .with_authentication(AuthenticationSettings::with_protected_cookie("jwt"))
//!     .with_error_handler(|error, context| {
//!         if error.downcast_ref::<Unauthorized>().is_some() {
//!             context.redirect("/login");
//!         }
//!     });
//!
//! let request = RenderRequest::new("/?ref=mail")
//!     .with_cookies(MapCookieJar::from_header(cookie_header))
//!     .with_assets(Assets::new().with_javascript("main", "/assets/main.js"));
//!
//! match pipeline.render(&settings, request).await? {
//!     RenderOutcome::Redirect(url) => respond_redirect(url),
//!     RenderOutcome::Content(content) => respond_stream(content.status, content.content),
//! }
//! ```

pub mod prelude;
mod assets;
mod error;
mod error_handler;
mod initializer;
mod outer_html;
mod page;
mod pipeline;
mod redirect;
mod request;
mod resolvable;
mod settings;
mod store;

pub use assets::*;
pub use error::*;
pub use error_handler::*;
pub use initializer::*;
pub use outer_html::*;
pub use page::*;
pub use pipeline::*;
pub use redirect::*;
pub use request::*;
pub use resolvable::*;
pub use settings::*;
pub use store::*;

// Re-export the data model and stream primitives
pub use ssr_core::{
    AuthenticationSettings, ConfigError, CookieJar, Location, MapCookieJar, ProxyConfig,
    RenderTime, RouteConfig, SetCookie,
};
pub use ssr_streaming::{collect_string, ContentStream, MetaTag, OuterHtml, PageMeta, StreamError};
