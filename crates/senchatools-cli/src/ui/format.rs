//! Formatting for durations, app listings and build summaries.

use std::path::PathBuf;
use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;

use super::messages::colors_enabled;

/// Format duration in human-readable format.
///
/// Converts to the most appropriate unit (ms, s, m:s).
///
/// # Arguments
///
/// * `duration` - Duration to format
///
/// # Returns
///
/// Formatted string (e.g., "1.50s", "2m 30s")
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use senchatools_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}

/// One line of `senchatools list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRow {
    pub name: String,
    pub output_dir: PathBuf,
    pub url: String,
}

impl AppRow {
    /// Plain rendering, one app per line.
    pub fn render(&self) -> String {
        format!("{}: {} ({})", self.name, self.output_dir.display(), self.url)
    }
}

/// Print discovered apps to stdout.
pub fn print_app_list(rows: &[AppRow]) {
    for row in rows {
        println!("{}", row.render());
    }
}

/// Print how long each app took to build.
pub fn print_build_summary(entries: &[(String, Duration)]) {
    if entries.is_empty() {
        return;
    }

    let width = (Term::stderr().size().1 as usize).min(80);
    let rule = "─".repeat(width);
    let total: Duration = entries.iter().map(|(_, d)| d).sum();

    if colors_enabled() {
        eprintln!("\n{}", "Build Summary".bold().underline());
        eprintln!("{}", rule);
        for (name, duration) in entries {
            eprintln!(
                "  {} {} {}",
                "▸".blue(),
                name.bright_white().bold(),
                format!("({})", format_duration(*duration)).dimmed()
            );
        }
        eprintln!("{}", rule);
        eprintln!(
            "  {} {} app(s) in {}",
            "Total:".bold(),
            entries.len().green(),
            format_duration(total).green()
        );
    } else {
        eprintln!("\nBuild Summary");
        eprintln!("{}", rule);
        for (name, duration) in entries {
            eprintln!("  ▸ {} ({})", name, format_duration(*duration));
        }
        eprintln!("{}", rule);
        eprintln!("  Total: {} app(s) in {}", entries.len(), format_duration(total));
    }
}
