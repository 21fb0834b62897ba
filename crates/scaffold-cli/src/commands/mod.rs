pub mod completions;
pub mod doctor;
pub mod man_pages;
pub mod scaffold;

use indicatif::{ProgressBar, ProgressStyle};
use scaffold_schema::Archetype;
use std::time::Duration;

pub const BIN_NAME: &str = "turbo-scaffold";

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_PACKAGE_MANAGER_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Map a command error message to a process exit code.
pub fn exit_code_for(msg: &str) -> u8 {
    if msg.starts_with("invalid unit")
        || msg.starts_with("workspace error:")
        || msg.starts_with("config error:")
    {
        EXIT_USAGE_ERROR
    } else if msg.starts_with("package manager") {
        EXIT_PACKAGE_MANAGER_ERROR
    } else {
        EXIT_FAILURE
    }
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}

fn archetype_style(archetype: Archetype) -> console::Style {
    use console::Style;
    match archetype {
        Archetype::Next => Style::new().cyan(),
        Archetype::Nest => Style::new().red().bold(),
        Archetype::Node => Style::new().green(),
        Archetype::PackageLib => Style::new().yellow(),
    }
}

pub fn colorize_archetype(archetype: Archetype) -> String {
    archetype_style(archetype)
        .apply_to(archetype.as_str())
        .to_string()
}

/// Archetype label padded to `width` columns before styling, so escape
/// codes do not count toward the column width.
pub fn colorize_archetype_padded(archetype: Archetype, width: usize) -> String {
    let padded = format!("{:<width$}", archetype.as_str());
    archetype_style(archetype).apply_to(padded).to_string()
}
