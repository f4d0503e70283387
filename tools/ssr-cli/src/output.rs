//! Terminal and JSON output for the CLI.
//!
//! In JSON mode only machine-readable documents reach stdout; status lines
//! are suppressed and errors are written to stderr as `{"error": ...}`.

use console::style;
use serde::Serialize;

/// Width of the label column in report fields.
const LABEL_WIDTH: usize = 18;

/// Output handler shared by all commands.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a hint for the next step.
    pub fn hint(&self, msg: &str) {
        if !self.json {
            println!("{} {}", style("hint:").cyan(), msg);
        }
    }

    /// Print the final line of a command that succeeded.
    pub fn done(&self, msg: &str) {
        if !self.json {
            println!("{} {}", style("ok").green().bold(), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        }
    }

    /// Verbose-only diagnostics, written to stderr.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{}", style(msg).dim());
        }
    }

    /// Print a value as pretty JSON on stdout.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to serialize output: {}", e)),
        }
    }

    /// Print the title line of a report.
    pub fn report_title(&self, title: &str) {
        if !self.json {
            println!("{}", style(title).bold());
        }
    }

    /// Print one labelled report field. Missing values show as `(none)`.
    pub fn report_field(&self, label: &str, value: Option<&str>) {
        if !self.json {
            println!(
                "  {}{}",
                style(padded_label(label)).dim(),
                value.unwrap_or("(none)")
            );
        }
    }

    /// Print asset URLs under a label, one per line after the first.
    pub fn report_urls(&self, label: &str, urls: &[String]) {
        if self.json {
            return;
        }
        let mut urls = urls.iter();
        self.report_field(label, urls.next().map(String::as_str));
        for url in urls {
            println!("  {}{}", " ".repeat(LABEL_WIDTH), url);
        }
    }
}

/// `label:` padded to the label column.
fn padded_label(label: &str) -> String {
    format!("{:<width$}", format!("{}:", label), width = LABEL_WIDTH)
}

/// Size of a written file, in bytes below 1 KiB and KiB/MiB above.
pub fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    match bytes {
        0..=1023 => format!("{} bytes", bytes),
        1024..=1_048_575 => format!("{:.1} KiB", bytes as f64 / KIB),
        _ => format!("{:.1} MiB", bytes as f64 / (KIB * KIB)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_label() {
        assert_eq!(padded_label("routes"), format!("routes:{}", " ".repeat(11)));
        assert_eq!(padded_label("protected cookie").len(), LABEL_WIDTH);
        assert_eq!(
            padded_label("a label longer than the column"),
            "a label longer than the column:"
        );
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 bytes");
        assert_eq!(human_size(1023), "1023 bytes");
        assert_eq!(human_size(1536), "1.5 KiB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
