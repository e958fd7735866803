use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("row has {found} values, expected {expected}")]
    RowWidth { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
