//! Validated RBS core sequences and single-level wildcard expansion.

use std::fmt;
use std::str::FromStr;

use crate::alphabet::{is_valid_symbol, CORE_LENGTH, NUCLEOTIDES, WILDCARD};
use crate::errors::{TreeError, TreeResult};

/// Fixed-length RBS core sequence over {A, C, G, T, _}.
///
/// Wildcard positions mark unresolved symbols; a sequence without wildcards
/// is fully specified and becomes a leaf in the expansion tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoreSequence(String);

impl CoreSequence {
    /// Validate length and alphabet before constructing.
    pub fn new(sequence: &str) -> TreeResult<Self> {
        let length = sequence.chars().count();
        if length != CORE_LENGTH {
            return Err(TreeError::InvalidLength {
                sequence: sequence.to_string(),
                actual: length,
                expected: CORE_LENGTH,
            });
        }
        for (position, symbol) in sequence.chars().enumerate() {
            if !is_valid_symbol(symbol) {
                return Err(TreeError::InvalidSymbol {
                    sequence: sequence.to_string(),
                    symbol,
                    position,
                });
            }
        }
        Ok(Self(sequence.to_string()))
    }

    /// The fully-wildcarded root sequence.
    pub fn root() -> Self {
        Self(std::iter::repeat(WILDCARD).take(CORE_LENGTH).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff no wildcard remains, i.e. the sequence is a leaf.
    pub fn is_specific(&self) -> bool {
        !self.0.contains(WILDCARD)
    }

    pub fn wildcard_count(&self) -> usize {
        self.0.chars().filter(|&c| c == WILDCARD).count()
    }

    /// Resolve the first wildcard into each nucleotide, in alphabet order.
    ///
    /// Returns exactly 4 sequences, each with one fewer wildcard, or an
    /// empty vector when the sequence is already specific. One wildcard
    /// level is resolved per call; later positions stay untouched.
    pub fn expansions(&self) -> Vec<CoreSequence> {
        let Some(position) = self.0.chars().position(|c| c == WILDCARD) else {
            return Vec::new();
        };

        NUCLEOTIDES
            .iter()
            .map(|&letter| {
                let child: String = self
                    .0
                    .chars()
                    .enumerate()
                    .map(|(i, c)| if i == position { letter } else { c })
                    .collect();
                CoreSequence(child)
            })
            .collect()
    }
}

impl fmt::Display for CoreSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CoreSequence {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_valid_sequence_when_constructing_then_succeeds() {
        let seq = CoreSequence::new("AC_GT_").unwrap();
        assert_eq!(seq.as_str(), "AC_GT_");
        assert_eq!(seq.wildcard_count(), 2);
        assert!(!seq.is_specific());
    }

    #[test]
    fn given_wrong_length_when_constructing_then_fails() {
        let err = CoreSequence::new("ACGT").unwrap_err();
        assert!(matches!(
            err,
            TreeError::InvalidLength {
                actual: 4,
                expected: 6,
                ..
            }
        ));
    }

    #[test]
    fn given_foreign_symbol_when_constructing_then_fails_with_position() {
        let err = CoreSequence::new("ACGXTA").unwrap_err();
        match err {
            TreeError::InvalidSymbol {
                symbol, position, ..
            } => {
                assert_eq!(symbol, 'X');
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_specific_sequence_when_expanding_then_returns_empty() {
        let seq = CoreSequence::new("ACGTAC").unwrap();
        assert!(seq.is_specific());
        assert!(seq.expansions().is_empty());
    }

    #[test]
    fn given_wildcards_when_expanding_then_resolves_first_position_only() {
        let seq = CoreSequence::new("A_C_TA").unwrap();
        let children = seq.expansions();

        assert_eq!(children.len(), 4);
        assert_eq!(children[0].as_str(), "AAC_TA");
        assert_eq!(children[1].as_str(), "ACC_TA");
        assert_eq!(children[2].as_str(), "AGC_TA");
        assert_eq!(children[3].as_str(), "ATC_TA");
        assert!(children
            .iter()
            .all(|c| c.wildcard_count() == seq.wildcard_count() - 1));
    }

    #[test]
    fn given_root_when_constructed_then_all_wildcards() {
        let root = CoreSequence::root();
        assert_eq!(root.as_str(), "______");
        assert_eq!(root.wildcard_count(), 6);
    }

    #[test]
    fn given_string_when_parsing_then_roundtrips_through_display() {
        let seq: CoreSequence = "AC_GTA".parse().unwrap();
        assert_eq!(seq.to_string(), "AC_GTA");
    }
}
