use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Column length mismatch: {column} has {actual} rows, expected {expected}")]
    ColumnMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Embedding matrix size {len} is not a multiple of dimension {dim}")]
    RaggedMatrix { len: usize, dim: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
