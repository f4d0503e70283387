//! Render lifecycle tracking.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifecycle phases of a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPhase {
    /// Render call received, settings normalized.
    Start,
    /// State initializer finished.
    Initialized,
    /// Static shell produced without a page render.
    ShellRendered,
    /// Page renderer requested a redirect.
    Redirected,
    /// Page rendered and output stream assembled.
    Completion,
    /// An error occurred.
    Error(String),
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Initialized => write!(f, "initialized"),
            Self::ShellRendered => write!(f, "shell_rendered"),
            Self::Redirected => write!(f, "redirected"),
            Self::Completion => write!(f, "completion"),
            Self::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// Timing breakdown of a single render.
///
/// The page renderer reports `load` and `render`; the pipeline adds
/// `initialize` without touching the other fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTime {
    /// State initializer duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialize: Option<Duration>,
    /// Data loading duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<Duration>,
    /// Component tree render duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<Duration>,
}

impl RenderTime {
    /// Create an empty timing record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initialize duration, keeping other fields.
    pub fn with_initialize(mut self, duration: Duration) -> Self {
        self.initialize = Some(duration);
        self
    }

    /// Set the load duration.
    pub fn with_load(mut self, duration: Duration) -> Self {
        self.load = Some(duration);
        self
    }

    /// Set the render duration.
    pub fn with_render(mut self, duration: Duration) -> Self {
        self.render = Some(duration);
        self
    }

    /// Sum of all recorded durations.
    pub fn total(&self) -> Duration {
        [self.initialize, self.load, self.render]
            .into_iter()
            .flatten()
            .sum()
    }

    /// Recorded fields as milliseconds, keyed by field name.
    pub fn to_millis_map(&self) -> BTreeMap<&'static str, u128> {
        let mut map = BTreeMap::new();
        if let Some(d) = self.initialize {
            map.insert("initialize", d.as_millis());
        }
        if let Some(d) = self.load {
            map.insert("load", d.as_millis());
        }
        if let Some(d) = self.render {
            map.insert("render", d.as_millis());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_initialize_keeps_other_fields() {
        let time = RenderTime::new()
            .with_load(Duration::from_millis(20))
            .with_render(Duration::from_millis(5))
            .with_initialize(Duration::from_millis(7));

        assert_eq!(time.initialize, Some(Duration::from_millis(7)));
        assert_eq!(time.load, Some(Duration::from_millis(20)));
        assert_eq!(time.render, Some(Duration::from_millis(5)));
        assert_eq!(time.total(), Duration::from_millis(32));
    }

    #[test]
    fn test_millis_map_skips_missing() {
        let time = RenderTime::new().with_initialize(Duration::from_millis(3));
        let map = time.to_millis_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("initialize"), Some(&3));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RenderPhase::Initialized.to_string(), "initialized");
        assert_eq!(
            RenderPhase::Error("boom".to_string()).to_string(),
            "error: boom"
        );
    }
}
