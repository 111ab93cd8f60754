// sqlx::Error -> CollaboratorError

use usecase_core::port::CollaboratorError;

/// Convert sqlx::Error to CollaboratorError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> CollaboratorError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let Some(code) = db_err.code() else {
                return CollaboratorError::Database(format!("Database error: {}", db_err.message()));
            };

            // SQLite error codes: https://www.sqlite.org/rescode.html
            match code.as_ref() {
                "2067" | "1555" => CollaboratorError::Rejected(format!(
                    "Unique constraint violation: {}",
                    db_err.message()
                )),
                "787" | "3850" => CollaboratorError::Rejected(format!(
                    "Foreign key constraint violation: {}",
                    db_err.message()
                )),
                "5" => CollaboratorError::Unavailable(format!(
                    "Database locked (SQLITE_BUSY): {}",
                    db_err.message()
                )),
                "13" => CollaboratorError::Database(format!("Database full: {}", db_err.message())),
                other => CollaboratorError::Database(format!(
                    "Database error [{}]: {}",
                    other,
                    db_err.message()
                )),
            }
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            CollaboratorError::Unavailable(err.to_string())
        }
        sqlx::Error::RowNotFound => CollaboratorError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            CollaboratorError::Database(format!("Column not found: {}", col))
        }
        _ => CollaboratorError::Database(err.to_string()),
    }
}
