//! Descriptor grammar conformance tests
//!
//! Exercises the full grammar: every mutation kind, region form, and the
//! classification of input that matches no kind.

use mutseq::{classify, parse_descriptor, Classification, Edit, Region};

#[test]
fn substitution_single_position() {
    let d = parse_descriptor("c.3C>X").unwrap();
    assert_eq!(d.region, Region::Single(3));
    assert_eq!(
        d.edit,
        Edit::Substitution {
            reference: 'C',
            alternative: 'X'
        }
    );
}

#[test]
fn deletion_single_and_range() {
    assert_eq!(parse_descriptor("c.3del").unwrap().edit, Edit::Deletion);
    let d = parse_descriptor("c.3_6del").unwrap();
    assert_eq!(d.region, Region::Range { start: 3, end: 6 });
    assert_eq!(d.edit, Edit::Deletion);
}

#[test]
fn delins_single_and_range() {
    let d = parse_descriptor("c.3delinsXYZ").unwrap();
    assert_eq!(d.region, Region::Single(3));
    assert!(matches!(d.edit, Edit::Delins { .. }));

    let d = parse_descriptor("c.3_6delinsXYZ").unwrap();
    assert_eq!(d.region, Region::Range { start: 3, end: 6 });
    match d.edit {
        Edit::Delins { sequence } => assert_eq!(sequence.to_string(), "XYZ"),
        other => panic!("expected delins, got {:?}", other),
    }
}

#[test]
fn insertion_requires_two_positions() {
    let d = parse_descriptor("c.3_4insXYZ").unwrap();
    assert_eq!(d.region, Region::Range { start: 3, end: 4 });
    assert!(matches!(d.edit, Edit::Insertion { .. }));

    // A single flanking position is not part of the grammar
    assert!(parse_descriptor("c.3insXYZ").is_err());
}

#[test]
fn duplication_single_and_range() {
    assert_eq!(parse_descriptor("c.5dup").unwrap().edit, Edit::Duplication);
    assert_eq!(
        parse_descriptor("c.3_5dup").unwrap().region,
        Region::Range { start: 3, end: 5 }
    );
}

#[test]
fn inversion_range() {
    let d = parse_descriptor("c.3_4inv").unwrap();
    assert_eq!(d.edit, Edit::Inversion);
}

#[test]
fn display_round_trips_canonical_notation() {
    for input in [
        "c.1A>G",
        "c.42del",
        "c.10_20del",
        "c.7delinsAA",
        "c.10_20delinsATG",
        "c.5_6insTT",
        "c.9dup",
        "c.2_8dup",
        "c.4_5inv",
    ] {
        assert_eq!(parse_descriptor(input).unwrap().to_string(), input);
    }
}

#[test]
fn descriptor_parses_via_from_str() {
    let d: mutseq::Descriptor = "c.3_6del".parse().unwrap();
    assert_eq!(d.region, Region::Range { start: 3, end: 6 });
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    assert!(parse_descriptor(" c.3del ").is_ok());
    assert!(parse_descriptor("\tc.3C>X\n").is_ok());
}

#[test]
fn malformed_input_is_rejected() {
    for input in [
        "",
        "c.",
        "c.del",
        "3del",
        "g.3del",
        "c.3",
        "c.3_",
        "c.3_6",
        "c.3_4ins",
        "c.3_6delins",
        "c.3delx",
        "c.3_6dup9",
        "c.3_4A>G",
        "c.3AA>G",
        "c.3A>GG",
        "c.3>G",
        "c.-3del",
        "c.3.5del",
    ] {
        assert!(
            parse_descriptor(input).is_err(),
            "expected rejection of {:?}",
            input
        );
    }
}

#[test]
fn classification_is_total() {
    assert!(matches!(
        classify("c.3_6del"),
        Classification::Recognized(_)
    ));
    for input in ["c.3frameshift", "p.Val600Glu", "random text", ""] {
        assert!(classify(input).is_unknown(), "expected unknown: {:?}", input);
    }
}

#[test]
fn parse_errors_carry_diagnostics() {
    let err = parse_descriptor("c.3delx").unwrap_err();
    let detailed = err.detailed_message();
    assert!(detailed.contains("c.3delx"));
    assert!(detailed.contains('^'), "diagnostic should highlight the span");
}
