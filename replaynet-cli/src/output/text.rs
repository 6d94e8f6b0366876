//! Text output formatting with colors.

use std::path::Path;

use replaynet_core::ServiceError;
use replaynet_http::FixtureEntry;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a success body. With `pretty`, JSON bodies are re-indented;
    /// anything else is printed as lossy UTF-8.
    pub fn format_body(&self, body: &[u8], pretty: bool) -> String {
        if pretty {
            if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
                if let Ok(indented) = serde_json::to_string_pretty(&value) {
                    return indented;
                }
            }
        }
        String::from_utf8_lossy(body).into_owned()
    }

    /// Formats a service error as its display pair plus kind and code.
    pub fn format_error(&self, error: &ServiceError) -> String {
        let info = error.error_info();
        format!(
            "{}\n{}\n{}",
            self.red(&self.bold(&info.title)),
            info.description,
            self.dim(&format!("{} ({})", error.tag(), error.code()))
        )
    }

    /// Formats a fixture listing.
    pub fn format_fixtures(&self, dir: &Path, entries: &[FixtureEntry]) -> String {
        let mut lines = vec![self.bold(&format!("Fixtures in {}", dir.display()))];

        if entries.is_empty() {
            lines.push(self.dim("  (none)"));
            return lines.join("\n");
        }

        let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in entries {
            lines.push(format!(
                "  {:<width$}  {}",
                entry.name,
                self.dim(&format_size(entry.size))
            ));
        }
        lines.push(format!("{} fixture(s)", entries.len()));
        lines.join("\n")
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.use_colors {
            format!("{RED}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Human-readable byte size.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
