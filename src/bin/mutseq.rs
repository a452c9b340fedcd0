// SPDX-License-Identifier: MIT

//! mutseq CLI
//!
//! Command-line interface for applying HGVS-style mutation descriptors to
//! reference sequences.

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use mutseq::batch::{BatchConfig, BatchProcessor, ItemResult};
use mutseq::cli::{
    output_error_with_context, output_result, process_input_line, OutputFormat,
};
use mutseq::config::MutSeqConfig;
use mutseq::record::{self, FastaWriter, DEFAULT_LINE_WIDTH};
use mutseq::{classify, mutate, Classification, MutSeqError, Outcome};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "mutseq")]
#[command(author, version, about = "Apply HGVS-style mutation descriptors to reference sequences")]
#[command(
    long_about = "Parse compact coding mutation descriptors and reconstruct mutant sequences.

Examples:
  mutseq parse 'c.3_6delinsXYZ'
  mutseq apply 'c.3del' --sequence ABCDEFG
  echo -e 'c.3del\\tABCDEFG' | mutseq apply --input -
  mutseq batch -i mutations.csv -o mutants.fasta"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and classify a mutation descriptor
    Parse {
        /// Mutation descriptor (e.g., c.3_6del)
        descriptor: String,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Apply a mutation descriptor to a reference sequence
    Apply {
        /// Mutation descriptor (e.g., c.3del)
        descriptor: Option<String>,

        /// Reference sequence the descriptor applies to
        #[arg(short, long, required_unless_present = "input")]
        sequence: Option<String>,

        /// Input file with one descriptor<TAB>sequence pair per line (use - for stdin)
        #[arg(short, long, conflicts_with = "sequence")]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json", "fasta"])]
        format: String,

        /// Unknown-descriptor handling: pass (sequence unchanged) or reject
        #[arg(long, value_parser = ["pass", "reject"])]
        unknown: Option<String>,
    },

    /// Apply a batch of mutation records and write a FASTA file
    Batch {
        /// Input file with one record per row: id, descriptor, sequence
        /// (CSV by default; .gz input is decompressed; use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output FASTA file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (single character)
        #[arg(short, long, default_value = ",")]
        delimiter: String,

        /// Treat the input as headerless (columns are positional)
        #[arg(long)]
        no_header: bool,

        /// Unknown-descriptor handling: pass (sequence unchanged) or reject
        #[arg(long, value_parser = ["pass", "reject"])]
        unknown: Option<String>,

        /// FASTA line width (0 for unwrapped sequences)
        #[arg(long)]
        line_width: Option<usize>,

        /// Log progress every N records
        #[arg(long)]
        progress_interval: Option<usize>,
    },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = MutSeqConfig::load().unwrap_or_default();

    let exit_code = match cli.command {
        Commands::Parse { descriptor, format } => run_parse(&descriptor, &format),
        Commands::Apply {
            descriptor,
            sequence,
            input,
            output,
            format,
            unknown,
        } => run_apply(
            descriptor.as_deref(),
            sequence.as_deref(),
            input.as_deref(),
            output.as_deref(),
            &format,
            unknown.as_deref(),
            &config,
        ),
        Commands::Batch {
            input,
            output,
            delimiter,
            no_header,
            unknown,
            line_width,
            progress_interval,
        } => run_batch(
            &input,
            output.as_deref(),
            &delimiter,
            no_header,
            unknown.as_deref(),
            line_width,
            progress_interval,
            &config,
        ),
    };

    std::process::exit(exit_code);
}

/// Open the output sink, defaulting to stdout.
fn open_output(path: Option<&std::path::Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn run_parse(descriptor: &str, format: &str) -> i32 {
    let format = OutputFormat::from_str(format).unwrap_or_default();
    let mut stdout = io::stdout();

    match classify(descriptor) {
        Classification::Recognized(parsed) => {
            let write_result = match format {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "descriptor": parsed.to_string(),
                        "kind": parsed.edit.kind(),
                        "start": parsed.region.start(),
                        "end": parsed.region.end(),
                        "status": "ok",
                    });
                    writeln!(stdout, "{}", value)
                }
                _ => writeln!(
                    stdout,
                    "{}\t{}\t{}_{}",
                    parsed,
                    parsed.edit.kind(),
                    parsed.region.start(),
                    parsed.region.end()
                ),
            };
            if write_result.is_err() {
                return 1;
            }
            0
        }
        Classification::Unknown => {
            // Show the underlying parse diagnostic on stderr
            if let Err(err) = mutseq::parse_descriptor(descriptor) {
                eprintln!("{}", err.detailed_message());
            }
            match format {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "descriptor": descriptor,
                        "kind": "unknown",
                        "status": "unknown",
                    });
                    let _ = writeln!(stdout, "{}", value);
                }
                _ => {
                    let _ = writeln!(stdout, "{}\tunknown", descriptor);
                }
            }
            1
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_apply(
    descriptor: Option<&str>,
    sequence: Option<&str>,
    input: Option<&std::path::Path>,
    output: Option<&std::path::Path>,
    format: &str,
    unknown: Option<&str>,
    config: &MutSeqConfig,
) -> i32 {
    let format = OutputFormat::from_str(format).unwrap_or_default();
    let policy = config.unknown_policy(unknown);

    let mut writer = match open_output(output) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("ERROR: cannot open output: {}", e);
            return 1;
        }
    };

    // Single descriptor + sequence on the command line
    if let (Some(descriptor), Some(sequence)) = (descriptor, sequence) {
        return match mutate(descriptor, sequence, policy) {
            Ok(outcome) => {
                let unrecognized = outcome.is_unrecognized();
                if unrecognized {
                    warn!("unknown mutation: {}", descriptor);
                }
                let mutated = outcome.into_sequence(sequence);
                if output_result(&mut writer, descriptor, &mutated, format).is_err() {
                    return 1;
                }
                let _ = writer.flush();
                0
            }
            Err(error) => {
                let _ = output_error_with_context(
                    &mut io::stderr(),
                    descriptor,
                    &error,
                    format,
                    None,
                );
                1
            }
        };
    }

    // Input file: one descriptor<TAB>sequence pair per line
    let Some(input) = input else {
        eprintln!("ERROR: provide a descriptor with --sequence, or --input");
        return 1;
    };

    let reader: Box<dyn BufRead> = if input.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        match File::open(input) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                eprintln!("ERROR: cannot open {}: {}", input.display(), e);
                return 1;
            }
        }
    };

    let mut applied = 0usize;
    let mut failed = 0usize;
    let mut unknown_count = 0usize;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("ERROR: read failure: {}", e);
                return 1;
            }
        };
        let Some(line) = process_input_line(&line, line_idx == 0) else {
            continue;
        };

        let Some((descriptor, sequence)) = line.split_once('\t') else {
            let error = MutSeqError::Csv {
                msg: "expected descriptor<TAB>sequence".to_string(),
            };
            let _ = output_error_with_context(
                &mut io::stderr(),
                line,
                &error,
                format,
                Some(line_idx + 1),
            );
            failed += 1;
            continue;
        };

        match mutate(descriptor.trim(), sequence.trim(), policy) {
            Ok(outcome) => {
                if outcome.is_unrecognized() {
                    unknown_count += 1;
                    warn!("unknown mutation: {}", descriptor.trim());
                } else {
                    applied += 1;
                }
                let mutated = outcome.into_sequence(sequence.trim());
                if output_result(&mut writer, descriptor.trim(), &mutated, format).is_err() {
                    return 1;
                }
            }
            Err(error) => {
                failed += 1;
                let _ = output_error_with_context(
                    &mut io::stderr(),
                    descriptor.trim(),
                    &error,
                    format,
                    Some(line_idx + 1),
                );
            }
        }
    }

    let _ = writer.flush();
    info!(
        "processed {} line(s): {} applied, {} unknown, {} failed",
        applied + unknown_count + failed,
        applied,
        unknown_count,
        failed
    );

    if applied + unknown_count == 0 && failed > 0 {
        1
    } else {
        0
    }
}

#[allow(clippy::too_many_arguments)]
fn run_batch(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    delimiter: &str,
    no_header: bool,
    unknown: Option<&str>,
    line_width: Option<usize>,
    progress_interval: Option<usize>,
    config: &MutSeqConfig,
) -> i32 {
    let delimiter = match parse_delimiter(delimiter) {
        Ok(d) => d,
        Err(msg) => {
            eprintln!("ERROR: {}", msg);
            return 1;
        }
    };

    let policy = config.unknown_policy(unknown);
    let line_width = line_width
        .or(config.batch.line_width)
        .unwrap_or(DEFAULT_LINE_WIDTH);
    let progress_interval = progress_interval
        .or(config.batch.progress_interval)
        .unwrap_or(100);

    let records = match record::read_records_from_path(input, delimiter, !no_header) {
        Ok(records) => records,
        Err(error) => {
            eprintln!("ERROR: {}", error);
            return 1;
        }
    };
    info!("read {} record(s) from {}", records.len(), input.display());

    let processor = BatchProcessor::with_config(
        BatchConfig::new()
            .unknown_policy(policy)
            .progress_interval(progress_interval),
    );

    let result = processor.apply_records_with_progress(&records, |progress| {
        info!(
            "progress: {}/{} ({:.1}%), {} mutated, {} unknown, {} failed",
            progress.processed,
            progress.total,
            progress.percent(),
            progress.mutated,
            progress.unknown,
            progress.errors
        );
    });

    let writer = match open_output(output) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("ERROR: cannot open output: {}", e);
            return 1;
        }
    };
    let mut fasta = FastaWriter::with_line_width(writer, line_width);

    for item in &result.results {
        match item {
            ItemResult::Applied(applied) => {
                if let Err(error) = fasta.write_record(&applied.id, &applied.sequence) {
                    eprintln!("ERROR: write failure: {}", error);
                    return 1;
                }
            }
            ItemResult::Failed {
                id,
                descriptor,
                error,
            } => {
                warn!("record {} ({}): {}", id, descriptor, error);
            }
        }
    }
    if let Err(error) = fasta.flush() {
        eprintln!("ERROR: write failure: {}", error);
        return 1;
    }

    info!(
        "processed {} record(s): {} mutated, {} unknown, {} failed ({:.1}% ok)",
        result.total(),
        result.mutated_count(),
        result.unknown_count(),
        result.error_count(),
        result.success_rate()
    );

    if result.total() > 0 && result.error_count() == result.total() {
        1
    } else {
        0
    }
}

/// Parse a delimiter argument into a single byte, accepting `\t` for tabs.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "delimiter must be a single ASCII character or \\t, got {:?}",
            s
        )),
    }
}
