// SPDX-License-Identifier: MIT

//! mutseq: HGVS-style mutation descriptor parser and sequence mutator
//!
//! Parses compact coding mutation descriptors (`c.` notation) and applies
//! them to a reference sequence to reconstruct the mutant sequence.
//!
//! # Example
//!
//! ```
//! use mutseq::{parse_descriptor, apply};
//!
//! // Parse a mutation descriptor
//! let descriptor = parse_descriptor("c.3_6delinsXYZ").unwrap();
//!
//! // Apply it to a reference sequence
//! let mutated = apply(&descriptor, "ABCDEFG").unwrap();
//! assert_eq!(mutated, "ABXYZG");
//! ```

pub mod apply;
pub mod batch;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod record;

// Re-export commonly used types
pub use apply::{apply, mutate, Outcome, UnknownPolicy};
pub use descriptor::edit::{Edit, Sequence};
pub use descriptor::parser::{classify, parse_descriptor, Classification, Descriptor};
pub use descriptor::region::Region;
pub use error::MutSeqError;
pub use record::MutationRecord;

/// Result type alias for mutseq operations
pub type Result<T> = std::result::Result<T, MutSeqError>;
