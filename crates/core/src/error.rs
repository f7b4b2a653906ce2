use crate::types::DbId;

/// Domain-level error shared by the gate, the stores and the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity is absent, or exists but is hidden from the caller.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The entity is visible but the requested action is not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn journal_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "Journal",
            id,
        }
    }

    pub fn issue_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "Issue",
            id,
        }
    }
}
