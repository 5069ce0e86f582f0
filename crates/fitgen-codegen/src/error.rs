//! Error types for workbook interpretation

use thiserror::Error;

/// Result type for workbook parsing and source generation
pub type Result<T> = std::result::Result<T, WorkbookError>;

/// Errors that can occur while turning a workbook into sources
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// Bytes are an OLE2 `.xls` workbook, which cannot be read
    #[error("legacy .xls workbooks are not supported, convert the profile to .xlsx")]
    LegacyFormat,

    /// Bytes are not a spreadsheet at all
    #[error("input is not an .xlsx workbook")]
    UnknownFormat,

    /// The spreadsheet library rejected the workbook
    #[error("failed to read workbook: {0}")]
    Read(String),

    /// A required sheet is absent
    #[error("workbook has no sheet named {0:?}")]
    MissingSheet(&'static str),

    /// A row could not be interpreted
    #[error("sheet {sheet:?} row {row}: {message}")]
    InvalidRow {
        /// Sheet name
        sheet: &'static str,
        /// 1-based row number
        row: u32,
        /// Error description
        message: String,
    },

    /// A base or field type has no known mapping
    #[error("unknown type {type_name:?} referenced by {context}")]
    UnknownType {
        /// The unresolved type name
        type_name: String,
        /// Where it was referenced
        context: String,
    },
}

impl From<WorkbookError> for fitgen_core::Error {
    fn from(err: WorkbookError) -> Self {
        fitgen_core::Error::generation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_generation_error() {
        let err: fitgen_core::Error = WorkbookError::MissingSheet("Types").into();
        assert_eq!(err.kind(), fitgen_core::ErrorKind::Generation);
        assert!(err.to_string().contains("\"Types\""));
    }

    #[test]
    fn test_invalid_row_message() {
        let err = WorkbookError::InvalidRow {
            sheet: "Messages",
            row: 12,
            message: "field number \"x\" is not a byte".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "sheet \"Messages\" row 12: field number \"x\" is not a byte"
        );
    }
}
