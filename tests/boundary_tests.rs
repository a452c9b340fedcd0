//! Position boundary tests
//!
//! Positions 1 and len must work without index errors; position 0 and
//! positions past the end must fail with a descriptive error, never
//! silently clip.

use mutseq::{apply, parse_descriptor, MutSeqError};

const REF: &str = "ABCDEFG";

fn run(descriptor: &str, reference: &str) -> Result<String, MutSeqError> {
    apply(&parse_descriptor(descriptor).unwrap(), reference)
}

#[test]
fn first_position_is_addressable() {
    assert_eq!(run("c.1del", REF).unwrap(), "BCDEFG");
    assert_eq!(run("c.1A>Z", REF).unwrap(), "ZBCDEFG");
    assert_eq!(run("c.1dup", REF).unwrap(), "AABCDEFG");
    assert_eq!(run("c.1_2inv", REF).unwrap(), "BACDEFG");
}

#[test]
fn last_position_is_addressable() {
    assert_eq!(run("c.7del", REF).unwrap(), "ABCDEF");
    assert_eq!(run("c.7G>Z", REF).unwrap(), "ABCDEFZ");
    assert_eq!(run("c.7dup", REF).unwrap(), "ABCDEFGG");
    assert_eq!(run("c.6_7inv", REF).unwrap(), "ABCDEGF");
    assert_eq!(run("c.6_7insXY", REF).unwrap(), "ABCDEFXYG");
}

#[test]
fn whole_sequence_operations() {
    assert_eq!(run("c.1_7del", REF).unwrap(), "");
    assert_eq!(run("c.1_7dup", REF).unwrap(), "ABCDEFGABCDEFG");
    assert_eq!(run("c.1_7inv", REF).unwrap(), "GFEDCBA");
    assert_eq!(run("c.1_7delinsX", REF).unwrap(), "X");
}

#[test]
fn single_symbol_sequence() {
    assert_eq!(run("c.1del", "A").unwrap(), "");
    assert_eq!(run("c.1A>T", "A").unwrap(), "T");
    assert_eq!(run("c.1dup", "A").unwrap(), "AA");
}

#[test]
fn position_zero_fails() {
    for descriptor in ["c.0del", "c.0A>G", "c.0dup", "c.0_3del"] {
        let err = run(descriptor, REF).unwrap_err();
        assert!(
            matches!(err, MutSeqError::PositionOutOfBounds { pos: 0, .. }),
            "{} gave {:?}",
            descriptor,
            err
        );
    }
}

#[test]
fn position_past_end_fails() {
    for descriptor in ["c.8del", "c.8A>G", "c.8dup", "c.100_200del"] {
        let err = run(descriptor, REF).unwrap_err();
        assert!(
            matches!(err, MutSeqError::PositionOutOfBounds { .. }),
            "{} gave {:?}",
            descriptor,
            err
        );
    }
}

#[test]
fn range_end_past_end_fails_even_when_start_is_valid() {
    let err = run("c.3_9del", REF).unwrap_err();
    assert!(matches!(
        err,
        MutSeqError::PositionOutOfBounds { pos: 9, len: 7 }
    ));
}

#[test]
fn inverted_range_fails() {
    for descriptor in ["c.6_3del", "c.6_3dup", "c.6_3inv", "c.6_3delinsX"] {
        let err = run(descriptor, REF).unwrap_err();
        assert!(
            matches!(err, MutSeqError::InvalidRange { start: 6, end: 3 }),
            "{} gave {:?}",
            descriptor,
            err
        );
    }
}

#[test]
fn non_adjacent_insertion_fails() {
    let err = run("c.3_6insXYZ", REF).unwrap_err();
    assert!(matches!(
        err,
        MutSeqError::NonAdjacentInsertion { start: 3, end: 6 }
    ));
}

#[test]
fn empty_reference_fails_for_any_position() {
    let err = run("c.1del", "").unwrap_err();
    assert!(matches!(
        err,
        MutSeqError::PositionOutOfBounds { pos: 1, len: 0 }
    ));
}

#[test]
fn errors_carry_both_position_and_length() {
    let err = run("c.42del", REF).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("42"));
    assert!(msg.contains('7'));
}
