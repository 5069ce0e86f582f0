//! Generate command

use anyhow::{Context, Result};
use fitgen_codegen::{Pipeline, PipelineOptions, Toolchain, WorkbookProfileGenerator};
use fitgen_core::{GeneratorOptions, ToolchainConfig};
use fitgen_toolchain::GoToolchain;

use crate::Cli;

/// Run the full generation pipeline for `cli`
pub async fn run(cli: &Cli) -> Result<()> {
    let toolchain = ToolchainConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load toolchain configuration")?;
    tracing::debug!(?toolchain, "Toolchain configuration");

    let mut options = PipelineOptions::new(&cli.input, &cli.output_dir);
    options.sdk_override = Some(cli.sdk.clone());
    options.run_install = cli.install;
    options.run_tests = cli.test;
    options.generator = GeneratorOptions::new()
        .with_timestamp(cli.timestamp)
        .with_debug_output(cli.verbose);
    options.toolchain = toolchain.clone();

    let go = GoToolchain::new(toolchain);
    let tools = Toolchain {
        stringer: &go,
        tests: &go,
        installer: &go,
    };

    let summary = Pipeline::new(WorkbookProfileGenerator::new(), options)
        .run(tools)
        .await
        .with_context(|| format!("Failed to generate from {}", cli.input.display()))?;

    tracing::debug!(
        sdk = %summary.sdk,
        artifacts = summary.written.len() + 1,
        stringer_types = summary.stringer_types,
        tested_packages = ?summary.tested_packages,
        "Generation finished"
    );
    Ok(())
}
