//! Formats scan results into the text shown in the console and saved to disk.

use chrono::{DateTime, Utc};

use super::{FileInfo, ScanMode};

const BANNER_WIDTH: usize = 64;
const BANNER_FIELD_WIDTH: usize = 48;

/// Console text produced by one execution, together with its count label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub count_label: String,
}

/// One file name per line.
pub fn format_file_listing(files: &[FileInfo]) -> Report {
    let text = files
        .iter()
        .map(|file| file.name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Report {
        text,
        count_label: format!("{} files found", files.len()),
    }
}

fn banner_line(text: &str) -> String {
    format!("║  {:<width$}║\n", text, width = BANNER_WIDTH - 2)
}

/// `label` followed by `value` padded to the field width, then two spaces.
/// Longer values overflow the frame.
fn banner_field(label: &str, value: &str) -> String {
    format!("║  {label}: {value:<width$}  ║\n", width = BANNER_FIELD_WIDTH)
}

/// Wraps a rendered hierarchy in a banner naming the directory and the extension filter.
///
/// The directory is cut to the field width. The count label counts the
/// `'\n'`-separated segments, so a trailing newline adds one.
pub fn format_hierarchy_report(folder_path: &str, extension: &str, hierarchy: &str) -> Report {
    let extension = if extension.trim().is_empty() {
        "All"
    } else {
        extension.trim()
    };
    let directory: String = folder_path.chars().take(BANNER_FIELD_WIDTH).collect();
    let rule = "═".repeat(BANNER_WIDTH);

    let mut text = format!("╔{rule}╗\n");
    text.push_str(&banner_line("FILE HIERARCHY"));
    text.push_str(&banner_field("Directory", &directory));
    text.push_str(&banner_field("Extension", extension));
    text.push_str(&format!("╚{rule}╝\n\n"));
    text.push_str(hierarchy);
    text.push_str("\n\n── End of hierarchy ──");

    Report {
        text,
        count_label: format!("{} lines", hierarchy.split('\n').count()),
    }
}

/// `metatron_<mode>_<YYYY-MM-DDTHH-MM-SS>.txt`
pub fn output_filename(mode: ScanMode, timestamp: DateTime<Utc>) -> String {
    format!(
        "metatron_{}_{}.txt",
        mode.as_str(),
        timestamp.format("%Y-%m-%dT%H-%M-%S")
    )
}
