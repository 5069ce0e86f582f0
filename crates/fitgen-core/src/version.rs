//! SDK version derivation

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Suffix stripped from an SDK archive name before parsing
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Prefix stripped from an SDK archive name before parsing
pub const RELEASE_PREFIX: &str = "FitSDKRelease_";

/// Major and minor SDK version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SdkVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
}

impl SdkVersion {
    /// Create a version from its parts
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Resolve the version for a run
    ///
    /// A non-empty `sdk_override` always wins; otherwise the version is taken
    /// from the input's file name.
    pub fn resolve(sdk_override: Option<&str>, input: &Path) -> Result<Self> {
        match sdk_override.filter(|s| !s.is_empty()) {
            Some(sdk) => sdk.parse(),
            None => version_string_from_path(input).parse(),
        }
    }
}

impl FromStr for SdkVersion {
    type Err = Error;

    /// Parse `major.minor[.anything]`; components past the second are ignored
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('.');
        let (Some(major), Some(minor)) = (parts.next(), parts.next()) else {
            return Err(Error::VersionParse {
                part: "major/minor",
                input: s.to_string(),
            });
        };

        let major = major.parse().map_err(|_| Error::VersionParse {
            part: "major",
            input: major.to_string(),
        })?;
        let minor = minor.parse().map_err(|_| Error::VersionParse {
            part: "minor",
            input: minor.to_string(),
        })?;

        Ok(Self { major, minor })
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Bare version string embedded in an SDK archive's file name
///
/// `dir/FitSDKRelease_21.47.00.zip` yields `21.47.00`. Names that do not
/// follow the release convention are returned with only whatever matching
/// suffix/prefix was present removed.
pub fn version_string_from_path(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = file.strip_suffix(ARCHIVE_SUFFIX).unwrap_or(&file);
    file.strip_prefix(RELEASE_PREFIX)
        .unwrap_or(file)
        .to_string()
}
