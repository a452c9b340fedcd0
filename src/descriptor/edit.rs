//! Edit types for mutation descriptors
//!
//! Edits describe the actual change (substitution, deletion, insertion, etc.)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Check whether a byte is a valid sequence symbol.
///
/// The transformer is alphabet-agnostic: any ASCII letter is accepted, which
/// covers the IUPAC nucleotide codes (A, C, G, T, N, ambiguity codes) as well
/// as placeholder alphabets used in testing.
#[inline]
pub const fn is_symbol(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Sequence of ASCII-alphabetic symbols (an inserted or replacement run)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence(Vec<u8>);

impl Sequence {
    pub fn new(symbols: Vec<u8>) -> Self {
        Self(symbols)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Sequence {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.bytes().all(is_symbol) {
            Ok(Self(s.bytes().collect()))
        } else {
            Err("Invalid sequence symbol")
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

/// Mutation edit kinds
///
/// Represents the change a descriptor applies to the reference sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edit {
    /// Substitution: single symbol change (e.g., A>G)
    Substitution {
        /// Symbol the descriptor states the reference holds at the position
        reference: char,
        /// Replacement symbol
        alternative: char,
    },

    /// Deletion: removal of the addressed run (del)
    Deletion,

    /// Deletion-insertion: replacement of the addressed run (e.g., delinsATG)
    Delins { sequence: Sequence },

    /// Insertion: addition of symbols between two adjacent positions (e.g., insATG)
    Insertion { sequence: Sequence },

    /// Duplication: copy of the addressed run immediately after itself (dup)
    Duplication,

    /// Inversion: reversal of the addressed run (inv)
    Inversion,
}

impl Edit {
    /// Human-readable kind name, used in reports and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Edit::Substitution { .. } => "substitution",
            Edit::Deletion => "deletion",
            Edit::Delins { .. } => "delins",
            Edit::Insertion { .. } => "insertion",
            Edit::Duplication => "duplication",
            Edit::Inversion => "inversion",
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Substitution {
                reference,
                alternative,
            } => write!(f, "{}>{}", reference, alternative),
            Edit::Deletion => write!(f, "del"),
            Edit::Delins { sequence } => write!(f, "delins{}", sequence),
            Edit::Insertion { sequence } => write!(f, "ins{}", sequence),
            Edit::Duplication => write!(f, "dup"),
            Edit::Inversion => write!(f, "inv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_symbol() {
        assert!(is_symbol(b'A'));
        assert!(is_symbol(b'n'));
        assert!(is_symbol(b'X'));
        assert!(!is_symbol(b'1'));
        assert!(!is_symbol(b'>'));
        assert!(!is_symbol(b'_'));
    }

    #[test]
    fn test_sequence_from_str() {
        let seq: Sequence = "ATG".parse().unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.as_bytes(), b"ATG");
    }

    #[test]
    fn test_sequence_from_str_rejects_non_alphabetic() {
        assert!("AT-G".parse::<Sequence>().is_err());
        assert!("AT G".parse::<Sequence>().is_err());
        assert!("A1G".parse::<Sequence>().is_err());
    }

    #[test]
    fn test_sequence_display() {
        let seq: Sequence = "XYZ".parse().unwrap();
        assert_eq!(seq.to_string(), "XYZ");
    }

    #[test]
    fn test_empty_sequence() {
        let seq: Sequence = "".parse().unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_edit_display() {
        assert_eq!(
            Edit::Substitution {
                reference: 'A',
                alternative: 'G'
            }
            .to_string(),
            "A>G"
        );
        assert_eq!(Edit::Deletion.to_string(), "del");
        assert_eq!(
            Edit::Delins {
                sequence: "XYZ".parse().unwrap()
            }
            .to_string(),
            "delinsXYZ"
        );
        assert_eq!(
            Edit::Insertion {
                sequence: "ATG".parse().unwrap()
            }
            .to_string(),
            "insATG"
        );
        assert_eq!(Edit::Duplication.to_string(), "dup");
        assert_eq!(Edit::Inversion.to_string(), "inv");
    }

    #[test]
    fn test_edit_kind() {
        assert_eq!(Edit::Deletion.kind(), "deletion");
        assert_eq!(Edit::Duplication.kind(), "duplication");
        assert_eq!(
            Edit::Substitution {
                reference: 'A',
                alternative: 'G'
            }
            .kind(),
            "substitution"
        );
    }
}
