//! Capability interfaces for external tools
//!
//! The pipeline never spawns processes itself. It talks to these traits, and
//! the binary plugs in process-backed implementations. Tests plug in fakes.
//!
//! Every method returns `Err` only when the tool could not be run at all
//! (missing binary, spawn failure). A tool that ran and failed is reported
//! through [`ToolOutput::success`].

use std::borrow::Cow;
use std::path::Path;

use async_trait::async_trait;

/// Exit state and captured output of one tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the tool exited successfully
    pub success: bool,
    /// Exit code, if the tool exited normally
    pub code: Option<i32>,
    /// Standard output followed by standard error
    pub combined: Vec<u8>,
}

impl ToolOutput {
    /// Successful invocation with the given output
    pub fn ok(combined: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            code: Some(0),
            combined: combined.into(),
        }
    }

    /// Failed invocation with the given exit code and output
    pub fn failed(code: i32, combined: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            code: Some(code),
            combined: combined.into(),
        }
    }

    /// Captured output as text
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.combined)
    }

    /// Human readable exit status, e.g. `exit status 2`
    pub fn status(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Arguments for one string-representation generation
#[derive(Debug, Clone, Copy)]
pub struct StringerRequest<'a> {
    /// Type names to generate string methods for
    pub type_names: &'a [String],
    /// File the tool must write its output into
    pub output: &'a Path,
    /// Directory the tool scans for the type declarations
    pub scan_dir: &'a Path,
    /// Strip the common type-name prefix from generated strings
    pub trim_prefix: bool,
}

impl StringerRequest<'_> {
    /// Type names joined with commas, as passed on the command line
    pub fn joined_type_names(&self) -> String {
        self.type_names.join(",")
    }
}

/// Generates string-representation source for enumerated types
#[async_trait]
pub trait SecondaryCodegenInvoker: Send + Sync {
    /// Run the tool for `request`, blocking until it exits
    async fn generate_strings(&self, request: &StringerRequest<'_>) -> std::io::Result<ToolOutput>;
}

/// Lists and tests packages
#[async_trait]
pub trait TestExecutor: Send + Sync {
    /// List every package matching `pattern`, one per output line
    async fn list_packages(&self, pattern: &str) -> std::io::Result<ToolOutput>;

    /// Run the test suite of exactly `packages`
    async fn run_tests(&self, packages: &[String]) -> std::io::Result<ToolOutput>;
}

/// Installs packages ahead of string-representation generation
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Install every package matching `pattern`
    async fn install(&self, pattern: &str) -> std::io::Result<ToolOutput>;
}
