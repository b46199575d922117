//! Error types shared across the engine
//!
//! `Display` texts double as the messages shown to the user.

/// Rejected session request, raised before anything is generated
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Days per week must be between 1 and 6.")]
    DaysOutOfRange(u32),
    #[error("Time must be at least 20 minutes (max 180).")]
    TimeOutOfRange(u32),
    #[error("Custom sets must be between 1 and 6.")]
    SetsOutOfRange(u32),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("No workout to save. Generate a workout first.")]
    NoSession,
    #[error("Enter weight/reps for at least one exercise before saving.")]
    EmptySubmission,
}

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("Import failed. Please upload a valid firstrep-export.json file.")]
    Read(#[source] std::io::Error),
    #[error("Import failed. Please upload a valid firstrep-export.json file.")]
    Parse(#[source] serde_json::Error),
    #[error("Import failed. Please upload a valid firstrep-export.json file.")]
    NotAnObject,
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}

#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    #[error("cannot read exercise library: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid exercise library: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::DaysOutOfRange(7).to_string(),
            "Days per week must be between 1 and 6."
        );
        assert_eq!(
            ValidationError::SetsOutOfRange(0).to_string(),
            "Custom sets must be between 1 and 6."
        );
    }

    #[test]
    fn test_import_errors_share_one_message() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ImportError::Parse(parse).to_string(),
            ImportError::NotAnObject.to_string()
        );
    }
}
