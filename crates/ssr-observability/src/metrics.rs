//! Per-render timing metrics.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use ssr_core::{RenderTime, RequestId};

/// Metrics for a single render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderMetrics {
    /// Request ID for correlation.
    pub request_id: String,
    /// Request path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Matched route name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// HTTP status code of a content result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Whether the render ended in a redirect.
    pub redirected: bool,
    /// Whether this was a static-shell render.
    pub shell_only: bool,
    /// State initializer duration (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialize_us: Option<u64>,
    /// Data loading duration (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_us: Option<u64>,
    /// Component render duration (microseconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_us: Option<u64>,
    /// Wall-clock duration of the render call (microseconds).
    pub total_duration_us: u64,
}

/// Collector for render metrics.
#[derive(Debug)]
pub struct MetricsCollector {
    request_id: RequestId,
    path: Option<String>,
    route: Option<String>,
    start: Instant,
    time: RenderTime,
    redirected: bool,
    shell_only: bool,
}

impl MetricsCollector {
    /// Create a new metrics collector.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            path: None,
            route: None,
            start: Instant::now(),
            time: RenderTime::default(),
            redirected: false,
            shell_only: false,
        }
    }

    /// Set the request path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    /// Set the matched route name.
    pub fn set_route(&mut self, route: Option<String>) {
        self.route = route;
    }

    /// Record the render timing breakdown.
    pub fn record_time(&mut self, time: RenderTime) {
        self.time = time;
    }

    /// Record that the render ended in a redirect.
    pub fn record_redirect(&mut self) {
        self.redirected = true;
    }

    /// Record that only the static shell was rendered.
    pub fn record_shell_only(&mut self) {
        self.shell_only = true;
    }

    /// Finalize and return the metrics.
    pub fn finalize(self, status_code: Option<u16>) -> RenderMetrics {
        RenderMetrics {
            request_id: self.request_id.to_string(),
            path: self.path,
            route: self.route,
            status_code,
            redirected: self.redirected,
            shell_only: self.shell_only,
            initialize_us: self.time.initialize.map(as_micros),
            load_us: self.time.load.map(as_micros),
            render_us: self.time.render.map(as_micros),
            total_duration_us: as_micros(self.start.elapsed()),
        }
    }

    /// Get total elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

fn as_micros(duration: Duration) -> u64 {
    duration.as_micros() as u64
}

impl RenderMetrics {
    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Request: {}", self.request_id));

        if let Some(path) = &self.path {
            lines.push(format!("  Path: {}", path));
        }

        if self.redirected {
            lines.push("  Outcome: redirect".to_string());
        } else if let Some(status) = self.status_code {
            let mode = if self.shell_only { " (shell)" } else { "" };
            lines.push(format!("  Outcome: {}{}", status, mode));
        }

        for (label, value) in [
            ("Initialize", self.initialize_us),
            ("Load", self.load_us),
            ("Render", self.render_us),
        ] {
            if let Some(us) = value {
                lines.push(format!("  {}: {}us ({:.2}ms)", label, us, us as f64 / 1000.0));
            }
        }

        lines.push(format!(
            "  Total: {}us ({:.2}ms)",
            self.total_duration_us,
            self.total_duration_us as f64 / 1000.0
        ));

        lines.join("\n")
    }
}
