//! Tabular mutation records and FASTA output
//!
//! The batch driver reads one row per mutation (record id, descriptor,
//! reference sequence) from a delimited file and writes the mutated
//! sequences to a FASTA file.

use crate::error::MutSeqError;
use crate::Result;
use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

/// One row of the tabular input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRecord {
    /// Record identifier, becomes the FASTA header
    pub id: String,
    /// Raw mutation descriptor (e.g., `c.3_6del`)
    pub descriptor: String,
    /// Reference sequence the descriptor positions resolve against
    pub sequence: String,
}

impl MutationRecord {
    pub fn new(
        id: impl Into<String>,
        descriptor: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            descriptor: descriptor.into(),
            sequence: sequence.into(),
        }
    }
}

/// Open an input path for reading, decompressing gzip transparently.
///
/// `-` means stdin. Gzip is detected by the `.gz` extension.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path).map_err(|e| MutSeqError::Io {
        msg: format!("cannot open {}: {}", path.display(), e),
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read mutation records from a delimited reader.
///
/// With `has_headers` set, the header row must name the columns `id`,
/// `descriptor`, and `sequence` (in any order); extra columns are ignored.
/// Without headers the columns are positional: id, descriptor, sequence.
pub fn read_records<R: Read>(
    reader: R,
    delimiter: u8,
    has_headers: bool,
) -> Result<Vec<MutationRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<MutationRecord>() {
        records.push(row?);
    }
    Ok(records)
}

/// Read mutation records from a delimited file (gzip transparently handled)
pub fn read_records_from_path(
    path: &Path,
    delimiter: u8,
    has_headers: bool,
) -> Result<Vec<MutationRecord>> {
    let reader = open_input(path)?;
    read_records(reader, delimiter, has_headers)
}

/// Default FASTA line width
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// FASTA writer with configurable sequence line width
pub struct FastaWriter<W: Write> {
    writer: W,
    line_width: usize,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_line_width(writer, DEFAULT_LINE_WIDTH)
    }

    /// A `line_width` of 0 writes each sequence on a single line.
    pub fn with_line_width(writer: W, line_width: usize) -> Self {
        Self { writer, line_width }
    }

    /// Write one FASTA record
    pub fn write_record(&mut self, id: &str, sequence: &str) -> Result<()> {
        writeln!(self.writer, ">{}", id)?;
        if self.line_width == 0 || sequence.is_empty() {
            writeln!(self.writer, "{}", sequence)?;
        } else {
            for chunk in sequence.as_bytes().chunks(self.line_width) {
                // Sequences are ASCII, chunk boundaries cannot split a char
                self.writer.write_all(chunk)?;
                self.writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the writer, returning the inner sink
    pub fn into_inner(self) -> W {
        self.writer
    }
}
