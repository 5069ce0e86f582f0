//! fitgen toolchain
//!
//! Process-backed implementations of the capability traits in `fitgen-core`.
//! Every tool is a subcommand of the configured Go binary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fitgen_toolchain::GoToolchain;
//!
//! let go = GoToolchain::new(ToolchainConfig::default());
//! let toolchain = Toolchain { stringer: &go, tests: &go, installer: &go };
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod go;
pub mod process;

pub use go::GoToolchain;
pub use process::run_combined;
