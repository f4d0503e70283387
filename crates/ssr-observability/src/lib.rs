//! Observability for the page rendering pipeline.
//!
//! This crate provides:
//! - `RenderLogger` - Structured logging with request context
//! - `MetricsCollector` / `RenderMetrics` - Per-render timing metrics

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;

// Re-export RequestId and RenderTime from ssr-core for convenience
pub use ssr_core::{RenderTime, RequestId};
