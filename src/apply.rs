//! Applying descriptors to reference sequences
//!
//! This is the core transformation: given a parsed [`Descriptor`] and a
//! reference sequence, produce the mutated sequence. The reference is never
//! modified; every call returns a fresh sequence.
//!
//! Region bounds and ordering are validated once, via [`Region::resolve`],
//! before dispatching on the edit kind.

use crate::descriptor::edit::{is_symbol, Edit};
use crate::descriptor::parser::{classify, Classification, Descriptor};
use crate::descriptor::region::Region;
use crate::error::MutSeqError;
use crate::Result;

/// Policy for descriptors that do not match any known mutation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// Return the reference sequence unchanged and report the descriptor as
    /// unrecognized (the default, matching the lenient batch policy)
    #[default]
    PassThrough,
    /// Fail the record with a typed error
    Reject,
}

/// Outcome of applying a raw descriptor under a pass-through policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The descriptor was recognized and applied
    Mutated(String),
    /// The descriptor was not recognized; the reference passes through unchanged
    Unrecognized,
}

impl Outcome {
    /// The resulting sequence, falling back to the reference for pass-through
    pub fn into_sequence(self, reference: &str) -> String {
        match self {
            Outcome::Mutated(seq) => seq,
            Outcome::Unrecognized => reference.to_string(),
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Outcome::Unrecognized)
    }
}

/// Check that the reference consists of sequence symbols only.
///
/// Position arithmetic is byte-based, so anything outside the ASCII-alphabetic
/// alphabet is rejected up front rather than corrupting downstream indices.
fn validate_reference(reference: &str) -> Result<()> {
    match reference.bytes().position(|b| !is_symbol(b)) {
        None => Ok(()),
        Some(idx) => {
            let b = reference.as_bytes()[idx];
            let found = if b.is_ascii_graphic() {
                format!("'{}'", b as char)
            } else {
                format!("byte 0x{:02X}", b)
            };
            Err(MutSeqError::InvalidSequence {
                pos: idx + 1,
                msg: format!("expected an ASCII-alphabetic symbol, found {}", found),
            })
        }
    }
}

/// Apply a parsed descriptor to a reference sequence.
///
/// Returns the mutated sequence; the reference is left untouched. Fails with
/// a descriptive error when a position falls outside the sequence, a range is
/// inverted, or the edit is inconsistent with the sequence.
///
/// # Example
///
/// ```
/// use mutseq::{apply, parse_descriptor};
///
/// let d = parse_descriptor("c.3_4insXYZ").unwrap();
/// assert_eq!(apply(&d, "ABCDEFG").unwrap(), "ABCXYZDEFG");
/// ```
pub fn apply(descriptor: &Descriptor, reference: &str) -> Result<String> {
    validate_reference(reference)?;

    let (start, end) = descriptor.region.resolve(reference.len())?;
    let bytes = reference.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(reference.len() + 8);

    match &descriptor.edit {
        Edit::Substitution {
            reference: stated,
            alternative,
        } => {
            let found = bytes[start] as char;
            if !found.eq_ignore_ascii_case(stated) {
                return Err(MutSeqError::ReferenceMismatch {
                    pos: descriptor.region.start(),
                    expected: *stated,
                    found,
                });
            }
            out.extend_from_slice(bytes);
            out[start] = *alternative as u8;
        }
        Edit::Deletion => {
            out.extend_from_slice(&bytes[..start]);
            out.extend_from_slice(&bytes[end + 1..]);
        }
        Edit::Delins { sequence } => {
            out.extend_from_slice(&bytes[..start]);
            out.extend_from_slice(sequence.as_bytes());
            out.extend_from_slice(&bytes[end + 1..]);
        }
        Edit::Insertion { sequence } => {
            if let Region::Range { start: a, end: b } = descriptor.region {
                if b != a + 1 {
                    return Err(MutSeqError::NonAdjacentInsertion { start: a, end: b });
                }
            }
            out.extend_from_slice(&bytes[..=start]);
            out.extend_from_slice(sequence.as_bytes());
            out.extend_from_slice(&bytes[end..]);
        }
        Edit::Duplication => {
            out.extend_from_slice(&bytes[..=end]);
            out.extend_from_slice(&bytes[start..=end]);
            out.extend_from_slice(&bytes[end + 1..]);
        }
        Edit::Inversion => {
            out.extend_from_slice(&bytes[..start]);
            out.extend(bytes[start..=end].iter().rev());
            out.extend_from_slice(&bytes[end + 1..]);
        }
    }

    // All inputs were validated as ASCII-alphabetic above
    Ok(out.into_iter().map(char::from).collect())
}

/// Classify a raw descriptor and apply it to a reference sequence.
///
/// Under [`UnknownPolicy::PassThrough`] an unrecognized descriptor yields
/// [`Outcome::Unrecognized`] so callers can count it and keep the reference
/// unchanged. Position and range violations are errors under either policy.
///
/// # Example
///
/// ```
/// use mutseq::{mutate, Outcome, UnknownPolicy};
///
/// let outcome = mutate("c.3del", "ABCDEFG", UnknownPolicy::PassThrough).unwrap();
/// assert_eq!(outcome, Outcome::Mutated("ABDEFG".to_string()));
///
/// let outcome = mutate("c.3oops", "ABCDEFG", UnknownPolicy::PassThrough).unwrap();
/// assert!(outcome.is_unrecognized());
/// ```
pub fn mutate(raw: &str, reference: &str, policy: UnknownPolicy) -> Result<Outcome> {
    match classify(raw) {
        Classification::Recognized(descriptor) => {
            apply(&descriptor, reference).map(Outcome::Mutated)
        }
        Classification::Unknown => match policy {
            UnknownPolicy::PassThrough => Ok(Outcome::Unrecognized),
            UnknownPolicy::Reject => Err(MutSeqError::UnrecognizedDescriptor {
                descriptor: raw.trim().to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parser::parse_descriptor;

    fn run(descriptor: &str, reference: &str) -> Result<String> {
        apply(&parse_descriptor(descriptor).unwrap(), reference)
    }

    #[test]
    fn test_substitution() {
        assert_eq!(run("c.3C>X", "ABCDEFG").unwrap(), "ABXDEFG");
    }

    #[test]
    fn test_substitution_case_insensitive_reference_check() {
        assert_eq!(run("c.3c>X", "ABCDEFG").unwrap(), "ABXDEFG");
    }

    #[test]
    fn test_substitution_reference_mismatch() {
        let err = run("c.3A>X", "ABCDEFG").unwrap_err();
        assert!(matches!(
            err,
            MutSeqError::ReferenceMismatch {
                pos: 3,
                expected: 'A',
                found: 'C'
            }
        ));
    }

    #[test]
    fn test_single_deletion() {
        assert_eq!(run("c.3del", "ABCDEFG").unwrap(), "ABDEFG");
    }

    #[test]
    fn test_range_deletion() {
        assert_eq!(run("c.3_6del", "ABCDEFG").unwrap(), "ABG");
    }

    #[test]
    fn test_single_delins() {
        assert_eq!(run("c.3delinsXYZ", "ABCDEFG").unwrap(), "ABXYZDEFG");
    }

    #[test]
    fn test_range_delins() {
        assert_eq!(run("c.3_6delinsXYZ", "ABCDEFG").unwrap(), "ABXYZG");
    }

    #[test]
    fn test_insertion() {
        assert_eq!(run("c.3_4insXYZ", "ABCDEFG").unwrap(), "ABCXYZDEFG");
    }

    #[test]
    fn test_insertion_non_adjacent_fails() {
        let err = run("c.3_5insXYZ", "ABCDEFG").unwrap_err();
        assert!(matches!(
            err,
            MutSeqError::NonAdjacentInsertion { start: 3, end: 5 }
        ));
    }

    #[test]
    fn test_single_duplication() {
        assert_eq!(run("c.5dup", "ABCDEFG").unwrap(), "ABCDEEFG");
    }

    #[test]
    fn test_range_duplication() {
        assert_eq!(run("c.3_5dup", "ABCDEFG").unwrap(), "ABCDECDEFG");
    }

    #[test]
    fn test_inversion_swaps_adjacent_pair() {
        assert_eq!(run("c.3_4inv", "ABCDEFG").unwrap(), "ABDCEFG");
    }

    #[test]
    fn test_inversion_reverses_longer_run() {
        assert_eq!(run("c.2_5inv", "ABCDEFG").unwrap(), "AEDCBFG");
    }

    #[test]
    fn test_boundary_first_and_last_position() {
        assert_eq!(run("c.1del", "ABCDEFG").unwrap(), "BCDEFG");
        assert_eq!(run("c.7del", "ABCDEFG").unwrap(), "ABCDEF");
        assert_eq!(run("c.1A>Z", "ABCDEFG").unwrap(), "ZBCDEFG");
        assert_eq!(run("c.7G>Z", "ABCDEFG").unwrap(), "ABCDEFZ");
    }

    #[test]
    fn test_whole_sequence_deletion() {
        assert_eq!(run("c.1_7del", "ABCDEFG").unwrap(), "");
    }

    #[test]
    fn test_whole_sequence_duplication() {
        assert_eq!(run("c.1_7dup", "ABCDEFG").unwrap(), "ABCDEFGABCDEFG");
    }

    #[test]
    fn test_position_zero_fails() {
        assert!(matches!(
            run("c.0del", "ABCDEFG").unwrap_err(),
            MutSeqError::PositionOutOfBounds { pos: 0, .. }
        ));
    }

    #[test]
    fn test_position_past_end_fails() {
        assert!(matches!(
            run("c.8del", "ABCDEFG").unwrap_err(),
            MutSeqError::PositionOutOfBounds { pos: 8, len: 7 }
        ));
        assert!(matches!(
            run("c.3_9del", "ABCDEFG").unwrap_err(),
            MutSeqError::PositionOutOfBounds { pos: 9, len: 7 }
        ));
    }

    #[test]
    fn test_inverted_range_fails() {
        assert!(matches!(
            run("c.6_3del", "ABCDEFG").unwrap_err(),
            MutSeqError::InvalidRange { start: 6, end: 3 }
        ));
    }

    #[test]
    fn test_reference_not_mutated_in_place() {
        let reference = "ABCDEFG".to_string();
        let mutated = run("c.3del", &reference).unwrap();
        assert_eq!(reference, "ABCDEFG");
        assert_ne!(mutated, reference);
    }

    #[test]
    fn test_non_alphabetic_reference_rejected() {
        let err = run("c.3del", "AB-DEFG").unwrap_err();
        assert!(matches!(err, MutSeqError::InvalidSequence { pos: 3, .. }));
    }

    #[test]
    fn test_mutate_pass_through() {
        let outcome = mutate("c.3unknowable", "ABCDEFG", UnknownPolicy::PassThrough).unwrap();
        assert!(outcome.is_unrecognized());
        assert_eq!(outcome.into_sequence("ABCDEFG"), "ABCDEFG");
    }

    #[test]
    fn test_mutate_reject_policy() {
        let err = mutate("c.3unknowable", "ABCDEFG", UnknownPolicy::Reject).unwrap_err();
        assert!(matches!(err, MutSeqError::UnrecognizedDescriptor { .. }));
    }

    #[test]
    fn test_mutate_out_of_range_is_error_under_either_policy() {
        assert!(mutate("c.9del", "ABCDEFG", UnknownPolicy::PassThrough).is_err());
        assert!(mutate("c.9del", "ABCDEFG", UnknownPolicy::Reject).is_err());
    }
}
