//! Error types shared by the views, controllers and collaborators

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BilledError {
    /// The bill list could not be loaded. Carries the upstream message verbatim.
    #[error("{0}")]
    FetchFailed(String),

    /// Upload or record creation failed. Carries the upstream message verbatim.
    #[error("{0}")]
    CreateFailed(String),

    #[error("Unsupported receipt file '{0}'. Accepted formats: jpg, jpeg, png")]
    InvalidFileType(String),

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("No user session found. Run 'billed login' first")]
    MissingSession,

    #[error("Missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("No bill row at index {0}")]
    RowNotFound(usize),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = BilledError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_errors_keep_message_verbatim() {
        assert_eq!(BilledError::FetchFailed("Erreur 404".into()).to_string(), "Erreur 404");
        assert_eq!(BilledError::CreateFailed("Erreur 500".into()).to_string(), "Erreur 500");
    }

    #[test]
    fn test_source_errors_convert() {
        let err: BilledError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(matches!(err, BilledError::Json(_)));

        let err: BilledError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
