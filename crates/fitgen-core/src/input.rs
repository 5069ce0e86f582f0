//! Workbook input resolution
//!
//! The workbook arrives either packed inside an SDK release archive or as a
//! bare spreadsheet. Which one is decided by the file extension alone.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// Workbook entry name used by older SDK releases
pub const WORKBOOK_NAME_XLS: &str = "Profile.xls";

/// Workbook entry name used by current SDK releases
pub const WORKBOOK_NAME_XLSX: &str = "Profile.xlsx";

/// Input type derived from the path's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// SDK release archive (`.zip`)
    Archive,
    /// Bare spreadsheet (`.xls` or `.xlsx`)
    Spreadsheet,
}

impl InputKind {
    /// Classify a path by its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension {
            "zip" => Ok(InputKind::Archive),
            "xls" | "xlsx" => Ok(InputKind::Spreadsheet),
            other => Err(Error::UnsupportedInput {
                extension: if other.is_empty() {
                    String::new()
                } else {
                    format!(".{other}")
                },
            }),
        }
    }
}

/// Read the raw workbook bytes behind `path`
///
/// A bare spreadsheet carries no version in its name, so `sdk_override` must
/// be present (and non-empty) for one; this is checked before touching the
/// filesystem.
pub fn resolve_input(path: &Path, sdk_override: Option<&str>) -> Result<Vec<u8>> {
    match InputKind::from_path(path)? {
        InputKind::Archive => read_workbook_from_archive(path),
        InputKind::Spreadsheet => {
            if sdk_override.is_none_or(str::is_empty) {
                return Err(Error::MissingVersionOverride);
            }
            std::fs::read(path).map_err(|source| Error::InputRead {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Extract the workbook entry from an SDK release archive
///
/// Entries are scanned in directory order and the first one named
/// [`WORKBOOK_NAME_XLS`] or [`WORKBOOK_NAME_XLSX`] is returned unmodified.
pub fn read_workbook_from_archive(path: &Path) -> Result<Vec<u8>> {
    let file = std::fs::File::open(path).map_err(|e| Error::ArchiveOpen {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| Error::ArchiveOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let name = workbook_entry_name(&mut archive, path)?.ok_or(Error::WorkbookNotFound)?;

    let mut entry = archive.by_name(&name).map_err(|e| Error::ArchiveEntry {
        name: name.clone(),
        message: e.to_string(),
    })?;

    let mut data = Vec::new();
    entry
        .read_to_end(&mut data)
        .map_err(|e| Error::ArchiveEntry {
            name: name.clone(),
            message: e.to_string(),
        })?;

    Ok(data)
}

// `file_names()` iterates a hash map, so walk the central directory by index.
fn workbook_entry_name<R: std::io::Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    path: &Path,
) -> Result<Option<String>> {
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|source| Error::ArchiveOpen {
                path: path.to_path_buf(),
                source,
            })?;
        let name = entry.name();
        if name == WORKBOOK_NAME_XLS || name == WORKBOOK_NAME_XLSX {
            return Ok(Some(name.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;

    fn write_zip(dir: &TempDir, name: &str, entries: &[(&str, &[u8])]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let file = std::fs::File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        for (entry, content) in entries {
            zip.start_file(*entry, FileOptions::default()).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
        path
    }

    #[rstest]
    #[case("FitSDKRelease_21.47.zip", InputKind::Archive)]
    #[case("Profile.xls", InputKind::Spreadsheet)]
    #[case("dir/Profile.xlsx", InputKind::Spreadsheet)]
    fn test_input_kind_from_extension(#[case] path: &str, #[case] expected: InputKind) {
        assert_eq!(InputKind::from_path(Path::new(path)).unwrap(), expected);
    }

    #[rstest]
    #[case("profile.csv", ".csv")]
    #[case("profile", "")]
    #[case("archive.ZIP", ".ZIP")]
    fn test_unsupported_extension(#[case] path: &str, #[case] ext: &str) {
        match InputKind::from_path(Path::new(path)) {
            Err(Error::UnsupportedInput { extension }) => assert_eq!(extension, ext),
            other => panic!("expected UnsupportedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_input_attempts_no_io() {
        // The path does not exist; the extension alone decides.
        let err = resolve_input(Path::new("/no/such/dir/sdk.tar.gz"), None).unwrap_err();
        assert!(matches!(err, Error::UnsupportedInput { .. }));
    }

    #[test]
    fn test_archive_with_current_entry() {
        let dir = TempDir::new().unwrap();
        let payload: &[u8] = b"PK\x03\x04 workbook bytes \x00\xff";
        let path = write_zip(
            &dir,
            "FitSDKRelease_21.47.zip",
            &[("c/fit_sdk.h", b"header"), (WORKBOOK_NAME_XLSX, payload)],
        );

        let data = resolve_input(&path, None).unwrap();
        assert_eq!(data, payload);
    }

    #[test]
    fn test_archive_with_legacy_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            &dir,
            "FitSDKRelease_16.10.zip",
            &[(WORKBOOK_NAME_XLS, b"legacy")],
        );
        assert_eq!(read_workbook_from_archive(&path).unwrap(), b"legacy");
    }

    #[test]
    fn test_archive_first_recognized_entry_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(
            &dir,
            "sdk.zip",
            &[
                (WORKBOOK_NAME_XLS, b"first"),
                (WORKBOOK_NAME_XLSX, b"second"),
            ],
        );
        assert_eq!(read_workbook_from_archive(&path).unwrap(), b"first");
    }

    #[test]
    fn test_archive_entries_in_subdirectories_do_not_match() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, "sdk.zip", &[("docs/Profile.xlsx", b"nested")]);
        assert!(matches!(
            read_workbook_from_archive(&path),
            Err(Error::WorkbookNotFound)
        ));
    }

    #[test]
    fn test_archive_without_workbook() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, "sdk.zip", &[("readme.txt", b"nothing here")]);
        let err = resolve_input(&path, Some("21.47")).unwrap_err();
        assert!(matches!(err, Error::WorkbookNotFound));
    }

    #[test]
    fn test_archive_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = resolve_input(&dir.path().join("absent.zip"), None).unwrap_err();
        assert!(matches!(err, Error::ArchiveOpen { .. }));
    }

    #[test]
    fn test_archive_not_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.zip");
        std::fs::write(&path, b"definitely not a zip").unwrap();
        assert!(matches!(
            resolve_input(&path, None),
            Err(Error::ArchiveOpen { .. })
        ));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn test_spreadsheet_requires_override(#[case] sdk: Option<&str>) {
        // Nonexistent path: the override check must fire before any read.
        let err = resolve_input(Path::new("/no/such/Profile.xlsx"), sdk).unwrap_err();
        assert!(matches!(err, Error::MissingVersionOverride));
    }

    #[test]
    fn test_spreadsheet_read_fully() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Profile.xlsx");
        std::fs::write(&path, b"raw spreadsheet").unwrap();
        assert_eq!(
            resolve_input(&path, Some("21.47")).unwrap(),
            b"raw spreadsheet"
        );
    }

    #[test]
    fn test_spreadsheet_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = resolve_input(&dir.path().join("Profile.xls"), Some("5.0")).unwrap_err();
        assert!(matches!(err, Error::InputRead { .. }));
    }
}
