use thiserror::Error;

/// Rejections raised before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty message")]
    EmptyText,

    #[error("message id is missing")]
    MissingId,

    #[error("no data")]
    NoData,

    #[error("malformed payload: {0}")]
    Malformed(String),
}
