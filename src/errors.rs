use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("invalid symbol '{symbol}' at position {position} in sequence '{sequence}'")]
    InvalidSymbol {
        sequence: String,
        symbol: char,
        position: usize,
    },

    #[error("sequence '{sequence}' has length {actual}, expected {expected}")]
    InvalidLength {
        sequence: String,
        actual: usize,
        expected: usize,
    },

    #[error("no mean supplied for leaf sequence: {0}")]
    MissingLeafMean(String),

    #[error("child mean not yet computed for sequence: {0}")]
    UnaggregatedChild(String),

    #[error("sequence contains wildcards but node has no children: {0}")]
    UnexpandedNode(String),

    #[error("internal tree operation failed: {0}")]
    InternalError(String),
}

pub type TreeResult<T> = Result<T, TreeError>;
