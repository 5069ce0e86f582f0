//! Error types for fitgen-core

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ArtifactKind;
use crate::input::{WORKBOOK_NAME_XLS, WORKBOOK_NAME_XLSX};

/// Result type alias for fitgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure domain of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unreadable input, unrecognized extension, missing workbook entry
    Input,
    /// Malformed SDK version string
    VersionParse,
    /// Failure reported by the profile generator
    Generation,
    /// Filesystem failure persisting a primary artifact
    Write,
    /// Failure while producing the string-representation artifact
    SecondaryCodegen,
    /// Failure listing or testing packages
    Test,
    /// Unusable configuration or flag combination
    Config,
}

/// Errors that can occur while running the generation pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Input extension is not one of the recognized types
    #[error("input file must be of type [.zip | .xls | .xlsx], got: {extension:?}")]
    UnsupportedInput {
        /// Extension found on the input path (with leading dot, may be empty)
        extension: String,
    },

    /// A direct spreadsheet input was given without an explicit SDK version
    #[error("--sdk flag required if input is .xls(x)")]
    MissingVersionOverride,

    /// Input file could not be read
    #[error("error reading input file {path}: {source}")]
    InputRead {
        /// Input path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// SDK archive could not be opened
    #[error("error opening sdk zip file {path}: {source}")]
    ArchiveOpen {
        /// Archive path
        path: PathBuf,
        /// Underlying archive error
        source: zip::result::ZipError,
    },

    /// Neither recognized workbook name is present in the archive
    #[error(
        "no file named {:?} or {:?} found in zip archive",
        WORKBOOK_NAME_XLS,
        WORKBOOK_NAME_XLSX
    )]
    WorkbookNotFound,

    /// The workbook entry could not be opened or read
    #[error("error reading {name:?} from archive: {message}")]
    ArchiveEntry {
        /// Entry name
        name: String,
        /// Error description
        message: String,
    },

    /// SDK version string could not be split into major and minor parts
    #[error("could not parse {part} version from input: {input:?}")]
    VersionParse {
        /// Which part failed: "major/minor", "major" or "minor"
        part: &'static str,
        /// The offending input
        input: String,
    },

    /// Opaque failure from the profile generator
    #[error("profile generation failed: {0}")]
    Generation(String),

    /// A primary artifact could not be written
    #[error("typegen: error writing {artifact} output file {path}: {source}")]
    Write {
        /// Which artifact failed
        artifact: ArtifactKind,
        /// Target path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The string-representation stage failed
    #[error("stringer: {message}\n{output}")]
    SecondaryCodegen {
        /// Error description
        message: String,
        /// Combined output captured from the tool, empty if none
        output: String,
    },

    /// Package listing, installation or test execution failed
    #[error("{stage}: fail: {message}\n{output}")]
    Test {
        /// Stage label, e.g. "go list"
        stage: String,
        /// Error description
        message: String,
        /// Combined output captured from the tool, empty if none
        output: String,
    },

    /// Toolchain configuration could not be loaded
    #[error("invalid configuration {path}: {message}")]
    Config {
        /// Config file path
        path: PathBuf,
        /// Error description
        message: String,
    },
}

impl Error {
    /// Taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedInput { .. }
            | Error::InputRead { .. }
            | Error::ArchiveOpen { .. }
            | Error::WorkbookNotFound
            | Error::ArchiveEntry { .. } => ErrorKind::Input,
            Error::MissingVersionOverride | Error::Config { .. } => ErrorKind::Config,
            Error::VersionParse { .. } => ErrorKind::VersionParse,
            Error::Generation(_) => ErrorKind::Generation,
            Error::Write { .. } => ErrorKind::Write,
            Error::SecondaryCodegen { .. } => ErrorKind::SecondaryCodegen,
            Error::Test { .. } => ErrorKind::Test,
        }
    }

    /// Build a generation error from any displayable cause
    pub fn generation(message: impl std::fmt::Display) -> Self {
        Error::Generation(message.to_string())
    }

    /// Build a string-representation stage error
    pub fn stringer(message: impl Into<String>, output: impl Into<String>) -> Self {
        Error::SecondaryCodegen {
            message: message.into(),
            output: output.into(),
        }
    }

    /// Build a package listing/install/test stage error
    pub fn test_stage(
        stage: impl Into<String>,
        message: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Error::Test {
            stage: stage.into(),
            message: message.into(),
            output: output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::WorkbookNotFound.kind(), ErrorKind::Input);
        assert_eq!(Error::MissingVersionOverride.kind(), ErrorKind::Config);
        assert_eq!(Error::generation("bad sheet").kind(), ErrorKind::Generation);
        assert_eq!(
            Error::stringer("exit status 1", "boom").kind(),
            ErrorKind::SecondaryCodegen
        );
        assert_eq!(
            Error::test_stage("go test", "exit status 1", "").kind(),
            ErrorKind::Test
        );
    }

    #[test]
    fn test_not_found_message_names_both_entries() {
        let msg = Error::WorkbookNotFound.to_string();
        assert!(msg.contains("\"Profile.xls\""));
        assert!(msg.contains("\"Profile.xlsx\""));
    }

    #[test]
    fn test_captured_output_is_displayed() {
        let err = Error::stringer("error running on types: exit status 2", "undefined: Foo");
        assert!(err.to_string().contains("undefined: Foo"));
    }
}
