/// Domain failures shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup that the caller expected to succeed matched nothing.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Caller input or configuration outside the accepted range.
    #[error("Validation failed: {0}")]
    Validation(String),
}
