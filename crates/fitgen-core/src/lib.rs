//! fitgen core library
//!
//! This crate holds the pieces of the generation pipeline that do not depend
//! on how a workbook is interpreted or which toolchain is installed:
//! - Input resolution from SDK archives and bare spreadsheets
//! - SDK version derivation
//! - The profile generator contract
//! - The message-number consistency report
//! - Capability traits for external tools, and the test stage built on them
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Input    │────▶│   Version   │────▶│   Profile   │────▶│  Artifacts  │
//! │ (zip/xlsx)  │     │  (major.mn) │     │  Generator  │     │ + stringer  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use fitgen_core::{SdkVersion, resolve_input};
//!
//! let path = Path::new("FitSDKRelease_21.47.zip");
//! let workbook = resolve_input(path, None)?;
//! let sdk = SdkVersion::resolve(None, path)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod profile;
pub mod report;
pub mod toolchain;
pub mod verify;
pub mod version;

pub use config::{ArtifactKind, GeneratorOptions, OutputLayout, ToolchainConfig};
pub use error::{Error, ErrorKind, Result};
pub use input::{InputKind, resolve_input};
pub use logging::{LogSink, Logger, MemorySink, TracingSink};
pub use profile::{GenerationRequest, ProfileArtifacts, ProfileGenerator};
pub use report::report_mesg_nums_without_message;
pub use toolchain::{
    PackageInstaller, SecondaryCodegenInvoker, StringerRequest, TestExecutor, ToolOutput,
};
pub use verify::{TestRunner, install_packages};
pub use version::SdkVersion;
