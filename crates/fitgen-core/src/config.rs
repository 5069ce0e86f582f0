//! Configuration for a generation run
//!
//! # Configuration sources
//!
//! - Command line flags, turned into [`GeneratorOptions`] and the pipeline options
//! - An optional YAML toolchain file, loaded into [`ToolchainConfig`]
//!
//! Output file names are fixed and described by [`OutputLayout`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::logging::Logger;

/// External toolchain settings from an optional `fitgen.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Go binary used for stringer, list, test and install invocations
    #[serde(default = "default_go_binary")]
    pub go_binary: String,

    /// Import path of the package tree the artifacts are generated into
    #[serde(default = "default_package_path")]
    pub package_path: String,

    /// Stringer source file, relative to the output directory
    #[serde(default = "default_stringer_source")]
    pub stringer_source: PathBuf,

    /// Substring marking vendored packages excluded from test runs
    #[serde(default = "default_vendor_marker")]
    pub vendor_marker: String,
}

fn default_go_binary() -> String {
    "go".to_string()
}

fn default_package_path() -> String {
    "github.com/tormoder/fit".to_string()
}

fn default_stringer_source() -> PathBuf {
    PathBuf::from("cmd/stringer/stringer.go")
}

fn default_vendor_marker() -> String {
    "/vendor/".to_string()
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            go_binary: default_go_binary(),
            package_path: default_package_path(),
            stringer_source: default_stringer_source(),
            vendor_marker: default_vendor_marker(),
        }
    }
}

impl ToolchainConfig {
    /// Load toolchain settings from a YAML file
    ///
    /// Every key is optional; an empty document yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            Error::Config { message, .. } => Error::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse toolchain settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| Error::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Load from `path` if given, otherwise return the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Package pattern covering every package below [`Self::package_path`]
    pub fn package_pattern(&self) -> String {
        format!("{}/...", self.package_path)
    }
}

/// One generated source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Enumerated and base types
    Types,
    /// Message structs
    Messages,
    /// Profile index and version constants
    Profile,
    /// String representations for enumerated types
    TypesString,
}

impl ArtifactKind {
    /// The three artifacts written straight from the generator, in write order
    pub const PRIMARY: [ArtifactKind; 3] = [
        ArtifactKind::Types,
        ArtifactKind::Messages,
        ArtifactKind::Profile,
    ];

    /// Fixed file name within the output directory
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Types => "types.go",
            ArtifactKind::Messages => "messages.go",
            ArtifactKind::Profile => "profile.go",
            ArtifactKind::TypesString => "types_string.go",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::Types => "types",
            ArtifactKind::Messages => "messages",
            ArtifactKind::Profile => "profile",
            ArtifactKind::TypesString => "types string",
        };
        f.write_str(label)
    }
}

/// Paths of every artifact below an output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory itself
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of one artifact
    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.file_name())
    }
}

/// Options handed to the profile generator
///
/// Built once per run and never mutated by the pipeline afterwards.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    embed_timestamp: bool,
    debug_output: bool,
    logger: Logger,
}

impl GeneratorOptions {
    /// Default options logging through `tracing`
    pub fn new() -> Self {
        Self::default()
    }

    /// Include a generation-time comment in generated sources
    pub fn with_timestamp(mut self, embed: bool) -> Self {
        self.embed_timestamp = embed;
        self
    }

    /// Emit verbose tracing while generating
    pub fn with_debug_output(mut self, debug: bool) -> Self {
        self.debug_output = debug;
        self
    }

    /// Route progress and diagnostics through `logger`
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Whether a generation timestamp is embedded
    pub fn embed_timestamp(&self) -> bool {
        self.embed_timestamp
    }

    /// Whether verbose debug output is enabled
    pub fn debug_output(&self) -> bool {
        self.debug_output
    }

    /// The logger every stage writes through
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}
