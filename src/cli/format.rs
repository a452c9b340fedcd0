//! Output formatting utilities for CLI operations

use crate::error::MutSeqError;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format (one object per line)
    Json,
    /// FASTA format
    Fasta,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use mutseq::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("fasta").unwrap(), OutputFormat::Fasta));
    /// assert!(matches!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "fasta" => OutputFormat::Fasta,
            _ => OutputFormat::Text,
        })
    }
}

/// Write a successful result to the output
///
/// # Examples
///
/// ```
/// use mutseq::cli::{output_result, OutputFormat};
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// output_result(&mut buffer, "c.3del", "ABDEFG", OutputFormat::Text).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert_eq!(result, "c.3del\tABDEFG\n");
/// ```
pub fn output_result<W: Write>(
    writer: &mut W,
    input: &str,
    output: &str,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(
                writer,
                r#"{{"descriptor": "{}", "sequence": "{}", "status": "ok"}}"#,
                escape_json(input),
                escape_json(output)
            )
        }
        OutputFormat::Fasta => {
            writeln!(writer, ">{}", input)?;
            writeln!(writer, "{}", output)
        }
        OutputFormat::Text => {
            writeln!(writer, "{}\t{}", input, output)
        }
    }
}

/// Write an error to the output
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &MutSeqError,
    format: OutputFormat,
) -> io::Result<()> {
    output_error_with_context(writer, input, error, format, None)
}

/// Write an error to the output with optional line number context
///
/// # Examples
///
/// ```
/// use mutseq::cli::{output_error_with_context, OutputFormat};
/// use mutseq::MutSeqError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = MutSeqError::PositionOutOfBounds { pos: 9, len: 7 };
/// output_error_with_context(&mut buffer, "c.9del", &error, OutputFormat::Text, Some(42)).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("line 42"));
/// ```
pub fn output_error_with_context<W: Write>(
    writer: &mut W,
    input: &str,
    error: &MutSeqError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let code = error
                .code()
                .map(|c| c.as_str())
                .unwrap_or_else(|| "unknown".to_string());
            match line_number {
                Some(line) => writeln!(
                    writer,
                    r#"{{"descriptor": "{}", "error": "{}", "code": "{}", "line": {}, "status": "error"}}"#,
                    escape_json(input),
                    escape_json(&error.to_string()),
                    code,
                    line
                ),
                None => writeln!(
                    writer,
                    r#"{{"descriptor": "{}", "error": "{}", "code": "{}", "status": "error"}}"#,
                    escape_json(input),
                    escape_json(&error.to_string()),
                    code
                ),
            }
        }
        OutputFormat::Text | OutputFormat::Fasta => match line_number {
            Some(line) => writeln!(writer, "ERROR (line {}): {}: {}", line, input, error),
            None => writeln!(writer, "ERROR: {}: {}", input, error),
        },
    }
}

/// Escape a string for embedding in a JSON value
fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
