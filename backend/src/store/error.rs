//! Error types for the dataset store and everything that feeds it.

use crate::models::DatasetError;

/// Result type for store, pipeline and export operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Configuration file missing, unreadable or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dataset failed validation while being staged.
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// Export snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No dataset has been published yet.
    #[error("No dataset has been published")]
    NotPublished,

    /// Map or overlay identifier not in the registry.
    #[error("Unknown layer '{0}'")]
    UnknownLayer(String),
}

impl StoreError {
    /// Whether the error stems from missing data rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotPublished | StoreError::UnknownLayer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndexKind;

    #[test]
    fn test_dataset_error_conversion() {
        let err: StoreError = DatasetError::LengthMismatch {
            index: IndexKind::Savi,
            expected: 4,
            actual: 3,
        }
        .into();
        assert!(err.to_string().contains("SAVI has 3 values"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(StoreError::NotPublished.is_not_found());
        assert!(StoreError::UnknownLayer("evi".into()).is_not_found());
        assert!(!StoreError::Configuration("bad".into()).is_not_found());
    }
}
