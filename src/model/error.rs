use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// Collector error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CollectorError {
    /// The page size must be strictly positive
    #[error("Invalid page size: {0}")]
    InvalidPageSize(u16),

    /// The total count field is present but is not a non-negative integer
    #[error("Invalid total repositories count for account {account}: {reason}")]
    InvalidTotalCount { account: String, reason: String },

    /// The listing page body could not be decoded into repository records
    #[error("Invalid repositories page: {0}")]
    InvalidPage(String),
}
