use advent_core::error::CoreError;

/// Failure of a store operation that can fail for domain reasons as well as
/// database ones.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
