//! Terminal output for people, as opposed to log lines.
//!
//! Status messages go to stderr; listings meant for piping go to stdout.

mod format;
mod messages;

pub use format::{format_duration, print_app_list, print_build_summary, AppRow};
pub use messages::{error, info, success, warning};

/// Whether colored output should be used on stderr.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise they
/// follow terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Turn colors off globally, for `--no-color`.
pub fn init_colors(no_color: bool) {
    if no_color || !should_use_color() {
        console::set_colors_enabled_stderr(false);
        console::set_colors_enabled(false);
    }
}
