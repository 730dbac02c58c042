//! Typed path parameter helpers.

use explorer_core::error::AppError;
use explorer_core::types::{FileId, FolderId};

/// Parse a positive integer id from a path segment.
fn parse_positive(raw: &str, what: &str) -> Result<i32, AppError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation(format!("Invalid {what} ID: {raw}")).with_code("INVALID_ID")),
    }
}

/// Parses a folder id from a path segment.
pub fn parse_folder_id(raw: &str) -> Result<FolderId, AppError> {
    parse_positive(raw, "folder").map(FolderId)
}

/// Parses a file id from a path segment.
pub fn parse_file_id(raw: &str) -> Result<FileId, AppError> {
    parse_positive(raw, "file").map(FileId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_positive_ids() {
        assert_eq!(parse_folder_id("12").unwrap(), FolderId(12));
        assert_eq!(parse_file_id("1").unwrap(), FileId(1));
    }

    #[test]
    fn test_rejects_non_positive_and_garbage() {
        for raw in ["0", "-3", "abc", "1.5", "", "99999999999"] {
            let err = parse_folder_id(raw).unwrap_err();
            assert_eq!(err.code(), "INVALID_ID", "input {raw:?}");
        }
    }
}
