// src/common/db_utils.rs

use crate::common::error::AppError;

// ---
// Driver error classification
// ---

/// Failure of a read (SELECT). "No rows" is a lookup miss, anything else is
/// an internal failure whose message is handed back to the caller.
pub(crate) fn read_failure(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::RowNotFound => AppError::NotFound,
        other => {
            tracing::error!("query failed: {}", other);
            AppError::Internal(other.to_string())
        }
    }
}

/// Failure of an INSERT/UPDATE. Errors raised by the database while running
/// the statement are execution failures; pool and I/O trouble stay internal.
pub(crate) fn write_failure(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db_err) => {
            tracing::error!("statement failed: {}", db_err);
            AppError::Execution(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => AppError::NotFound,
        other => {
            tracing::error!("statement could not run: {}", other);
            AppError::Internal(other.to_string())
        }
    }
}

// ---
// Optimistic concurrency
// ---

/// Outcome of a version-checked UPDATE: exactly one row means the caller's
/// version matched and the row moved to `expected + 1`.
pub(crate) fn next_version(expected: i32, rows_affected: u64) -> Result<i32, AppError> {
    if rows_affected == 1 {
        Ok(expected + 1)
    } else {
        Err(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_bumps_version() {
        assert_eq!(next_version(1, 1), Ok(2));
        assert_eq!(next_version(41, 1), Ok(42));
    }

    #[test]
    fn no_row_is_not_found() {
        assert_eq!(next_version(3, 0), Err(AppError::NotFound));
    }

    #[test]
    fn row_not_found_is_a_lookup_miss() {
        assert_eq!(read_failure(sqlx::Error::RowNotFound), AppError::NotFound);
    }

    #[test]
    fn pool_failures_are_internal() {
        let err = write_failure(sqlx::Error::PoolTimedOut);
        assert_eq!(err.code(), 500);
    }
}
