//! Batch processing of mutation records.
//!
//! This module provides a high-level API for applying mutation descriptors
//! to many records, with progress tracking, per-record error isolation, and
//! unknown-descriptor counting.
//!
//! # Examples
//!
//! ```
//! use mutseq::batch::BatchProcessor;
//! use mutseq::MutationRecord;
//!
//! let records = vec![
//!     MutationRecord::new("r1", "c.3del", "ABCDEFG"),
//!     MutationRecord::new("r2", "c.3C>X", "ABCDEFG"),
//! ];
//!
//! let processor = BatchProcessor::new();
//! let result = processor.apply_records(&records);
//! println!("Mutated {}/{} records", result.mutated_count(), result.total());
//! ```
//!
//! A failed record (out-of-range position, inverted range) never aborts the
//! batch; it is reported in the result alongside the successes. Descriptors
//! that match no known mutation kind pass the reference through unchanged
//! and are counted separately.

mod processor;

pub use processor::{
    AppliedRecord, BatchConfig, BatchProcessor, BatchProgress, BatchResult, ItemResult,
};
