//! Outer HTML shell and output stream primitives.
//!
//! This crate provides the pieces the render pipeline assembles:
//! - `PageMeta` - Title and meta tags reported by the page renderer
//! - `OuterHtml` - The before-content / after-content fragments
//! - `ContentStream` - Chunked HTML output and the `combine` helper

mod combine;
mod shell;

pub use combine::*;
pub use shell::*;
