//! Store-side constructors for `ExError`

use snipx_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// An applied migration whose embedded SQL has since changed
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// A stored value that cannot be mapped back onto the model
pub fn corrupt_row(table: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(format!("decode_{}", table))
        .with_message(reason.to_string())
}

/// Map a rusqlite error; unique and primary-key violations become `AlreadyExists`
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    if let rusqlite::Error::SqliteFailure(ref failure, _) = err {
        let unique = matches!(
            failure.extended_code,
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        );
        if unique {
            return ExError::new(ExErrorKind::AlreadyExists)
                .with_op("sqlite")
                .with_message(err.to_string());
        }
    }
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
