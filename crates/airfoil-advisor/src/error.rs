//! Error types for airfoil-advisor.
//!
//! This module defines all error types used throughout the crate. Validation
//! failures and unavailable stores are distinct variants so callers can tell
//! "nothing matched" apart from "the store could not be reached".

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for airfoil-advisor operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A backing store could not be reached.
    #[error("{store} store unavailable: {message}")]
    StoreUnavailable {
        /// Which store failed (catalog, history, accounts).
        store: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Validation Errors ===
    /// A user-supplied value is malformed or out of range.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the validation failure.
        message: String,
    },

    /// An airfoil with the same case-insensitive name is already cataloged.
    #[error("airfoil '{name}' already exists")]
    DuplicateAirfoil {
        /// The rejected name.
        name: String,
    },

    /// No airfoil with the given name or index exists.
    #[error("airfoil not found: {0}")]
    AirfoilNotFound(String),

    /// A comparison needs at least two catalog entries.
    #[error("need at least two airfoils to compare, catalog has {available}")]
    InsufficientAirfoils {
        /// Number of airfoils currently cataloged.
        available: usize,
    },

    // === Account Errors ===
    /// The username is already registered.
    #[error("username '{0}' already exists")]
    DuplicateUsername(String),

    /// The email address is already registered.
    #[error("email '{0}' already registered")]
    DuplicateEmail(String),

    /// Username/password pair did not match an account.
    #[error("invalid username or password")]
    InvalidCredentials,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for airfoil-advisor operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a store unavailable error.
    #[must_use]
    pub fn store_unavailable(store: &'static str, message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            store,
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means a backing store could not be used.
    #[must_use]
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable { .. }
                | Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
        )
    }

    /// Check if this error is a uniqueness violation.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateAirfoil { .. } | Self::DuplicateUsername(_) | Self::DuplicateEmail(_)
        )
    }

    /// Check if this error was caused by caller input rather than the environment.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.is_duplicate()
            || matches!(
                self,
                Self::Validation { .. }
                    | Self::AirfoilNotFound(_)
                    | Self::InsufficientAirfoils { .. }
                    | Self::InvalidCredentials
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCredentials;
        assert_eq!(err.to_string(), "invalid username or password");

        let err = Error::validation("speed", "must be positive");
        assert_eq!(err.to_string(), "invalid speed: must be positive");
    }

    #[test]
    fn test_duplicate_airfoil_display() {
        let err = Error::DuplicateAirfoil {
            name: "Clark-Y".to_string(),
        };
        assert_eq!(err.to_string(), "airfoil 'Clark-Y' already exists");
        assert!(err.is_duplicate());
        assert!(err.is_validation());
    }

    #[test]
    fn test_store_unavailable_is_distinct() {
        let err = Error::store_unavailable("catalog", "disk gone");
        assert!(err.is_store_unavailable());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "catalog store unavailable: disk gone");
    }

    #[test]
    fn test_validation_is_not_unavailable() {
        let err = Error::InsufficientAirfoils { available: 1 };
        assert!(err.is_validation());
        assert!(!err.is_store_unavailable());
        assert!(err.to_string().contains("catalog has 1"));
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_account_errors() {
        assert!(Error::DuplicateUsername("pilot".to_string()).is_duplicate());
        assert!(Error::DuplicateEmail("a@b.c".to_string()).is_duplicate());
        assert!(!Error::InvalidCredentials.is_duplicate());
        assert!(Error::InvalidCredentials.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
            assert!(err.is_store_unavailable());
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "top_k must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_airfoil_not_found_display() {
        let err = Error::AirfoilNotFound("NACA 9999".to_string());
        assert_eq!(err.to_string(), "airfoil not found: NACA 9999");
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
