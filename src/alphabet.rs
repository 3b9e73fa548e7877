//! Alphabet constants and exhaustive sequence enumeration.

use itertools::Itertools;

/// Concrete nucleotide symbols, in expansion order.
pub const NUCLEOTIDES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Marker for an unresolved position in a partially-specified sequence.
pub const WILDCARD: char = '_';

/// Full symbol set: nucleotides followed by the wildcard.
pub const POSSIBLE_SYMBOLS: [char; 5] = ['A', 'C', 'G', 'T', WILDCARD];

/// Fixed length of an RBS core sequence.
pub const CORE_LENGTH: usize = 6;

pub fn is_valid_symbol(symbol: char) -> bool {
    POSSIBLE_SYMBOLS.contains(&symbol)
}

/// Lazily enumerates every sequence of the given length over {A,C,G,T,_}.
///
/// Cartesian-product order with [`POSSIBLE_SYMBOLS`] as digit order, the
/// last position varying fastest; 5^length sequences in total. Each call
/// returns a fresh iterator, so enumeration is restartable.
pub fn generate_all_sequences(length: usize) -> impl Iterator<Item = String> {
    (0..length)
        .map(|_| POSSIBLE_SYMBOLS.iter().copied())
        .multi_cartesian_product()
        .map(|symbols| symbols.into_iter().collect())
}
