//! End-to-end generation pipeline
//!
//! ```text
//! input ─▶ workbook bytes ─▶ sdk version ─▶ generator ─▶ types/messages/profile
//!                                                          │
//!          go test ◀─ consistency report ◀─ stringer ◀─ (go install)
//! ```
//!
//! Stages run strictly one after another and the first failure ends the run.

use std::path::PathBuf;

use fitgen_core::{
    GenerationRequest, GeneratorOptions, OutputLayout, PackageInstaller, ProfileGenerator, Result,
    SdkVersion, SecondaryCodegenInvoker, TestExecutor, TestRunner, ToolchainConfig,
    install_packages, report_mesg_nums_without_message, resolve_input,
};

use crate::stringer::SecondaryCodegenRunner;
use crate::writer::{ArtifactWriter, WrittenArtifact};

/// Options for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// SDK archive or workbook path
    pub input: PathBuf,

    /// Directory the artifacts are written into
    pub output_dir: PathBuf,

    /// Explicit SDK version; empty or `None` derives it from the input name
    pub sdk_override: Option<String>,

    /// Install packages before running the stringer
    pub run_install: bool,

    /// Run the full test suite after generation
    pub run_tests: bool,

    /// Options forwarded to the profile generator
    pub generator: GeneratorOptions,

    /// External toolchain settings
    pub toolchain: ToolchainConfig,
}

impl PipelineOptions {
    /// Options with every optional stage disabled
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            sdk_override: None,
            run_install: false,
            run_tests: false,
            generator: GeneratorOptions::default(),
            toolchain: ToolchainConfig::default(),
        }
    }

    fn sdk_override(&self) -> Option<&str> {
        self.sdk_override.as_deref().filter(|s| !s.is_empty())
    }
}

/// External tools used by the pipeline
#[derive(Clone, Copy)]
pub struct Toolchain<'a> {
    /// String-representation generator
    pub stringer: &'a dyn SecondaryCodegenInvoker,
    /// Package lister and test runner
    pub tests: &'a dyn TestExecutor,
    /// Package installer
    pub installer: &'a dyn PackageInstaller,
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    /// SDK version the sources were generated for
    pub sdk: SdkVersion,

    /// The three primary artifacts
    pub written: Vec<WrittenArtifact>,

    /// Path of the string-representation artifact
    pub types_string: PathBuf,

    /// Number of types passed to the stringer
    pub stringer_types: usize,

    /// Number of message numbers without a generated message
    pub mesg_nums_without_message: usize,

    /// Packages tested, if the test stage ran
    pub tested_packages: Option<usize>,
}

/// The generation pipeline
pub struct Pipeline<G> {
    generator: G,
    options: PipelineOptions,
}

impl<G: ProfileGenerator> Pipeline<G> {
    /// Create a pipeline around `generator`
    pub fn new(generator: G, options: PipelineOptions) -> Self {
        Self { generator, options }
    }

    /// Run every stage in order
    pub async fn run(&self, tools: Toolchain<'_>) -> Result<PipelineSummary> {
        let options = &self.options;
        let logger = options.generator.logger();
        let layout = OutputLayout::new(&options.output_dir);

        logger.info(format!(
            "fit source output directory: {}",
            options.output_dir.display()
        ));

        let raw_input = resolve_input(&options.input, options.sdk_override())?;
        let sdk = SdkVersion::resolve(options.sdk_override(), &options.input)?;
        logger.info(format!("sdk version: {sdk}"));

        let request = GenerationRequest::new(sdk, raw_input, options.generator.clone());
        let artifacts = self.generator.generate(&request)?;

        let written = ArtifactWriter::new(layout.clone(), logger.clone()).write_all(&artifacts)?;

        if options.run_install {
            install_packages(
                tools.installer,
                &options.toolchain.package_pattern(),
                logger,
            )
            .await?;
        }

        logger.info("running stringer");
        let types_string = SecondaryCodegenRunner::new(tools.stringer, layout, logger.clone())
            .run(&artifacts.stringer_input)
            .await?;
        logger.info("stringer: types done");

        report_mesg_nums_without_message(logger, &artifacts.mesg_nums_without_message);

        let tested_packages = if options.run_tests {
            let runner = TestRunner::new(
                tools.tests,
                &options.toolchain.vendor_marker,
                logger.clone(),
            );
            let tested = runner.run_all(&options.toolchain.package_pattern()).await?;
            Some(tested.len())
        } else {
            None
        };

        logger.info("done");

        Ok(PipelineSummary {
            sdk,
            written,
            types_string,
            stringer_types: artifacts.stringer_input.len(),
            mesg_nums_without_message: artifacts.mesg_nums_without_message.len(),
            tested_packages,
        })
    }
}
