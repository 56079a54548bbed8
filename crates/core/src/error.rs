use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is a string because embedded chapters use string ids while every
    /// table row uses a [`crate::types::DbId`].
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by any displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_accepts_numeric_and_string_ids() {
        let numeric = CoreError::not_found("Book", 42);
        assert_eq!(numeric.to_string(), "Entity not found: Book with id 42");

        let chapter = CoreError::not_found("Chapter", "chapter-1700000000000");
        assert_eq!(
            chapter.to_string(),
            "Entity not found: Chapter with id chapter-1700000000000"
        );
    }
}
