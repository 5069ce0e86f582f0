//! Child process execution

use fitgen_core::ToolOutput;
use tokio::process::Command;

/// Run `command` to completion, capturing stdout followed by stderr
///
/// Returns `Err` only if the process could not be started.
pub async fn run_combined(mut command: Command) -> std::io::Result<ToolOutput> {
    tracing::debug!(command = ?command.as_std(), "Running tool");

    let output = command.kill_on_drop(true).output().await?;

    let mut combined = output.stdout;
    combined.extend_from_slice(&output.stderr);

    tracing::debug!(status = %output.status, bytes = combined.len(), "Tool exited");

    Ok(ToolOutput {
        success: output.status.success(),
        code: output.status.code(),
        combined,
    })
}
