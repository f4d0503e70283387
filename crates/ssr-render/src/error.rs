//! Error types for the render pipeline.

use ssr_core::ConfigError;
use ssr_streaming::StreamError;
use thiserror::Error;

/// Errors that can occur while rendering a page.
///
/// Collaborator failures keep the original error object so callers can
/// recover it with [`RenderError::downcast_ref`].
#[derive(Error, Debug)]
pub enum RenderError {
    /// Settings or assets are structurally invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The state initializer failed.
    #[error("State initialization failed: {0:#}")]
    Initialize(anyhow::Error),

    /// The page renderer failed.
    #[error("Page render failed: {0:#}")]
    Page(anyhow::Error),

    /// The request URL could not be parsed.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Streaming error.
    #[error("Streaming error: {0}")]
    Stream(#[from] StreamError),
}

impl RenderError {
    /// The collaborator error wrapped by this error, if any.
    pub fn collaborator_error(&self) -> Option<&anyhow::Error> {
        match self {
            RenderError::Initialize(e) | RenderError::Page(e) => Some(e),
            _ => None,
        }
    }

    /// Downcast the wrapped collaborator error.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        self.collaborator_error()?.downcast_ref::<E>()
    }

    /// Whether this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, RenderError::Config(_))
    }
}
