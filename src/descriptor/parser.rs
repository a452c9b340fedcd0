//! Descriptor parsing
//!
//! Parses the compact coding mutation notation (`c.` descriptors) into a
//! [`Region`] plus [`Edit`]. Classification is deliberately total: input that
//! does not match any known mutation kind is reported as [`Classification::Unknown`]
//! rather than an error, so batch callers can apply the pass-through policy.

use crate::descriptor::edit::{is_symbol, Edit, Sequence};
use crate::descriptor::region::Region;
use crate::error::{Diagnostic, ErrorCode, MutSeqError, SourceSpan};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1},
    combinator::opt,
    sequence::preceded,
    IResult, Parser,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fully parsed mutation descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Descriptor {
    /// Addressed portion of the reference (1-based)
    pub region: Region,
    /// The change applied to that region
    pub edit: Edit,
}

impl Descriptor {
    pub fn new(region: Region, edit: Edit) -> Self {
        Self { region, edit }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c.{}{}", self.region, self.edit)
    }
}

impl FromStr for Descriptor {
    type Err = MutSeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_descriptor(s)
    }
}

/// Result of classifying a raw descriptor string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The descriptor matched one of the known mutation kinds
    Recognized(Descriptor),
    /// The descriptor did not match any known kind
    Unknown,
}

impl Classification {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Classification::Unknown)
    }

    /// Get the descriptor if recognized
    pub fn descriptor(&self) -> Option<&Descriptor> {
        match self {
            Classification::Recognized(d) => Some(d),
            Classification::Unknown => None,
        }
    }
}

/// Parse an unsigned position, rejecting values that overflow u64
fn parse_pos(input: &str) -> IResult<&str, u64> {
    let (rest, digits) = digit1(input)?;
    match digits.parse::<u64>() {
        Ok(n) => Ok((rest, n)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        ))),
    }
}

/// Parse the addressed region: `<pos>` or `<start>_<end>`
fn parse_region(input: &str) -> IResult<&str, Region> {
    let (rest, start) = parse_pos(input)?;
    let (rest, end) = opt(preceded(char('_'), parse_pos)).parse(rest)?;
    match end {
        Some(end) => Ok((rest, Region::range(start, end))),
        None => Ok((rest, Region::point(start))),
    }
}

/// Parse a run of sequence symbols (at least one)
fn parse_sequence(input: &str) -> IResult<&str, Sequence> {
    let (rest, s) = take_while1(|c: char| c.is_ascii() && is_symbol(c as u8)).parse(input)?;
    Ok((rest, Sequence::new(s.bytes().collect())))
}

/// Parse a substitution edit: `<ref>><alt>`
///
/// Only single-symbol substitutions are part of the grammar; a run before or
/// after the `>` is rejected so the input falls through to Unknown.
fn parse_substitution(input: &str) -> IResult<&str, Edit> {
    let bytes = input.as_bytes();
    if bytes.len() < 3 || !is_symbol(bytes[0]) || bytes[1] != b'>' || !is_symbol(bytes[2]) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    if bytes.len() > 3 && is_symbol(bytes[3]) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((
        &input[3..],
        Edit::Substitution {
            reference: bytes[0] as char,
            alternative: bytes[2] as char,
        },
    ))
}

/// Parse a delins edit: `delins<seq>`
fn parse_delins(input: &str) -> IResult<&str, Edit> {
    let (rest, _) = tag("delins").parse(input)?;
    let (rest, sequence) = parse_sequence(rest)?;
    Ok((rest, Edit::Delins { sequence }))
}

/// Parse a plain deletion: `del`
fn parse_deletion(input: &str) -> IResult<&str, Edit> {
    let (rest, _) = tag("del").parse(input)?;
    Ok((rest, Edit::Deletion))
}

/// Parse an insertion edit: `ins<seq>`
fn parse_insertion(input: &str) -> IResult<&str, Edit> {
    let (rest, _) = tag("ins").parse(input)?;
    let (rest, sequence) = parse_sequence(rest)?;
    Ok((rest, Edit::Insertion { sequence }))
}

/// Parse a duplication: `dup`
fn parse_duplication(input: &str) -> IResult<&str, Edit> {
    let (rest, _) = tag("dup").parse(input)?;
    Ok((rest, Edit::Duplication))
}

/// Parse an inversion: `inv`
fn parse_inversion(input: &str) -> IResult<&str, Edit> {
    let (rest, _) = tag("inv").parse(input)?;
    Ok((rest, Edit::Inversion))
}

/// Parse the edit part of a descriptor.
///
/// `delins` must be tried before `del`, otherwise `del` would match the
/// prefix and leave `ins<seq>` as trailing garbage.
fn parse_edit(input: &str, single: bool) -> IResult<&str, Edit> {
    if single {
        alt((
            parse_delins,
            parse_deletion,
            parse_duplication,
            parse_inversion,
            parse_substitution,
        ))
        .parse(input)
    } else {
        alt((
            parse_delins,
            parse_deletion,
            parse_insertion,
            parse_duplication,
            parse_inversion,
        ))
        .parse(input)
    }
}

/// Parse a raw descriptor string into a [`Descriptor`].
///
/// Returns a parse error with a highlighted span for input that does not
/// match the grammar. Callers implementing the lenient pass-through policy
/// should use [`classify`] instead.
///
/// # Example
///
/// ```
/// use mutseq::parse_descriptor;
///
/// let descriptor = parse_descriptor("c.3_6del").unwrap();
/// assert_eq!(descriptor.to_string(), "c.3_6del");
/// ```
pub fn parse_descriptor(input: &str) -> Result<Descriptor, MutSeqError> {
    let trimmed = input.trim();

    let rest = trimmed.strip_prefix("c.").ok_or_else(|| {
        MutSeqError::parse_with_diagnostic(
            0,
            "expected 'c.' prefix",
            Diagnostic::new()
                .with_code(ErrorCode::UnexpectedChar)
                .with_span(SourceSpan::new(0, trimmed.len().clamp(1, 2)))
                .with_source(trimmed)
                .with_hint("descriptors look like c.3A>G, c.3_6del, or c.3_4insXYZ"),
        )
    })?;

    let (rest, region) = parse_region(rest).map_err(|_| {
        MutSeqError::parse_with_diagnostic(
            2,
            "expected a 1-based position",
            Diagnostic::new()
                .with_code(ErrorCode::InvalidPosition)
                .with_span(SourceSpan::point(2))
                .with_source(trimmed)
                .with_hint("positions are unsigned integers, e.g. c.3del or c.3_6del"),
        )
    })?;

    let edit_offset = trimmed.len() - rest.len();
    let (rest, edit) = parse_edit(rest, region.is_single()).map_err(|_| {
        MutSeqError::parse_with_diagnostic(
            edit_offset,
            "unrecognized edit",
            Diagnostic::new()
                .with_code(ErrorCode::InvalidEdit)
                .with_span(SourceSpan::new(edit_offset, trimmed.len()))
                .with_source(trimmed)
                .with_hint("expected <ref>><alt>, del, delins<seq>, ins<seq>, dup, or inv"),
        )
    })?;

    if !rest.is_empty() {
        let offset = trimmed.len() - rest.len();
        return Err(MutSeqError::parse_with_diagnostic(
            offset,
            "trailing characters after edit",
            Diagnostic::new()
                .with_code(ErrorCode::UnexpectedChar)
                .with_span(SourceSpan::new(offset, trimmed.len()))
                .with_source(trimmed),
        ));
    }

    Ok(Descriptor::new(region, edit))
}

/// Classify a raw descriptor string.
///
/// Input that does not match any known mutation kind yields
/// [`Classification::Unknown`] instead of an error.
///
/// # Example
///
/// ```
/// use mutseq::{classify, Classification};
///
/// assert!(matches!(classify("c.3del"), Classification::Recognized(_)));
/// assert!(classify("c.3frameshift").is_unknown());
/// ```
pub fn classify(input: &str) -> Classification {
    match parse_descriptor(input) {
        Ok(descriptor) => Classification::Recognized(descriptor),
        Err(_) => Classification::Unknown,
    }
}
