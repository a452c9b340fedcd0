//! CLI utilities for mutseq
//!
//! Testable functions used by the CLI binary. Pure and I/O-abstracted
//! functions live in the library so they can be unit tested without
//! end-to-end CLI tests.

pub mod format;

// Re-export commonly used items
pub use format::{output_error, output_error_with_context, output_result, OutputFormat};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// Common when descriptor lists are exported from Windows applications or
/// spreadsheets.
///
/// # Examples
///
/// ```
/// use mutseq::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}c.3del"), "c.3del");
/// assert_eq!(strip_bom("c.3del"), "c.3del");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Strip inline comments from an input line.
///
/// Comments start with `#` and extend to the end of the line.
/// Leading/trailing whitespace is also trimmed.
///
/// # Examples
///
/// ```
/// use mutseq::cli::strip_inline_comment;
///
/// assert_eq!(strip_inline_comment("c.3del  # my note"), "c.3del");
/// assert_eq!(strip_inline_comment("# full line comment"), "");
/// ```
pub fn strip_inline_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => s[..pos].trim(),
        None => s.trim(),
    }
}

/// Process an input line: trim whitespace, strip BOM (for the first line),
/// and strip inline comments.
///
/// Returns None if the line is empty or comment-only. A UTF-8 BOM only
/// appears at the beginning of a file, so it is only checked on the first
/// line.
///
/// # Examples
///
/// ```
/// use mutseq::cli::process_input_line;
///
/// assert_eq!(process_input_line("c.3del", false), Some("c.3del"));
/// assert_eq!(process_input_line("c.3del  # note", false), Some("c.3del"));
/// assert_eq!(process_input_line("\u{feff}c.3del", true), Some("c.3del"));
/// assert_eq!(process_input_line("", false), None);
/// assert_eq!(process_input_line("# comment", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = strip_inline_comment(line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
