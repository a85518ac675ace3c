use thiserror::Error;

use crate::core::types::BlueprintKey;

#[derive(Error, Debug)]
pub enum BlueprintError {
    #[error("{0}")]
    NotFound(String),

    #[error("The given blueprint already exists: {0}")]
    AlreadyExists(BlueprintKey),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlueprintError {
    pub fn not_found(author: &str, name: &str) -> Self {
        Self::NotFound(format!(
            "Blueprint not found for author: {} and name: {}",
            author, name
        ))
    }

    pub fn author_not_found(author: &str) -> Self {
        Self::NotFound(format!("No blueprints found for author: {}", author))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

pub type Result<T> = std::result::Result<T, BlueprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlueprintError::not_found("john", "thepaint");
        assert_eq!(
            err.to_string(),
            "Blueprint not found for author: john and name: thepaint"
        );

        let err = BlueprintError::author_not_found("nobody");
        assert_eq!(err.to_string(), "No blueprints found for author: nobody");

        let err = BlueprintError::AlreadyExists(BlueprintKey::new("john", "thepaint"));
        assert_eq!(
            err.to_string(),
            "The given blueprint already exists: john/thepaint"
        );
    }

    #[test]
    fn test_error_kind_helpers() {
        assert!(BlueprintError::author_not_found("x").is_not_found());
        assert!(!BlueprintError::InvalidState("bad".into()).is_not_found());
        assert!(BlueprintError::AlreadyExists(BlueprintKey::new("a", "b")).is_already_exists());
    }
}
