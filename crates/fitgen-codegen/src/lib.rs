//! fitgen code generation
//!
//! This crate turns a profile workbook into Go sources and drives the full
//! generation pipeline.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌──────────┐     ┌─────────┐     ┌─────────┐     ┌──────────┐     ┌──────────┐
//! │ Workbook │────▶│   IR    │────▶│   Go    │────▶│ Artifact │────▶│ Stringer │
//! │  (xlsx)  │     │ (Parse) │     │  (Gen)  │     │ (Write)  │     │ (Splice) │
//! └──────────┘     └─────────┘     └─────────┘     └──────────┘     └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use fitgen_codegen::{Pipeline, PipelineOptions, Toolchain, WorkbookProfileGenerator};
//!
//! let options = PipelineOptions::new("FitSDKRelease_21.47.zip", "../fit");
//! let pipeline = Pipeline::new(WorkbookProfileGenerator::new(), options);
//! let summary = pipeline.run(toolchain).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod generator;
pub mod ir;
pub mod parser;
pub mod pipeline;
pub mod stringer;
pub mod writer;

pub use error::WorkbookError;
pub use generator::{SourceGenerator, WorkbookProfileGenerator};
pub use ir::ProfileIr;
pub use parser::WorkbookParser;
pub use pipeline::{Pipeline, PipelineOptions, PipelineSummary, Toolchain};
pub use stringer::{SecondaryCodegenRunner, TYPES_STRING_HEADER};
pub use writer::{ArtifactWriter, WrittenArtifact};
