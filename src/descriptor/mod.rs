//! Mutation descriptor types and parser
//!
//! This module contains the type system for representing compact coding
//! mutation descriptors and a nom-based parser for classifying them.

pub mod edit;
pub mod parser;
pub mod region;

// Re-export commonly used types
pub use edit::{Edit, Sequence};
pub use parser::{classify, parse_descriptor, Classification, Descriptor};
pub use region::Region;
