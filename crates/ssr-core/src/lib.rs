//! Core data model for the server-side page rendering pipeline.
//!
//! This crate provides the fundamental types shared by the pipeline crates:
//! - `RouteConfig` / `AuthenticationSettings` - Site configuration records
//! - `Location` - Parsed request URL with basename-aware serialization
//! - `CookieJar` / `SetCookie` - Cookie access and cookies-to-set
//! - `RenderTime` - Timing breakdown of a single render
//! - `ConfigError` - Structural configuration errors

mod config;
mod context;
mod lifecycle;
mod location;

pub use config::*;
pub use context::*;
pub use lifecycle::*;
pub use location::*;
