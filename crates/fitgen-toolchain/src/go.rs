//! Go toolchain
//!
//! | Capability                  | Invocation                                                    |
//! |-----------------------------|---------------------------------------------------------------|
//! | `SecondaryCodegenInvoker`   | `go run <dir>/<stringer> -trimprefix -type A,B -output F <dir>` |
//! | `TestExecutor`              | `go list <pattern>`, `go test <pkg>...`                       |
//! | `PackageInstaller`          | `go install <pattern>`                                        |

use async_trait::async_trait;
use fitgen_core::{
    PackageInstaller, SecondaryCodegenInvoker, StringerRequest, TestExecutor, ToolOutput,
    ToolchainConfig,
};
use tokio::process::Command;

use crate::process::run_combined;

/// Runs every external tool through the Go binary
#[derive(Debug, Clone)]
pub struct GoToolchain {
    config: ToolchainConfig,
}

impl GoToolchain {
    /// Create a toolchain from settings
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    /// Settings this toolchain runs with
    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    fn go(&self) -> Command {
        Command::new(&self.config.go_binary)
    }

    fn stringer_command(&self, request: &StringerRequest<'_>) -> Command {
        let mut command = self.go();
        command
            .arg("run")
            .arg(request.scan_dir.join(&self.config.stringer_source));
        if request.trim_prefix {
            command.arg("-trimprefix");
        }
        command
            .arg("-type")
            .arg(request.joined_type_names())
            .arg("-output")
            .arg(request.output)
            .arg(request.scan_dir);
        command
    }

    fn list_command(&self, pattern: &str) -> Command {
        let mut command = self.go();
        command.args(["list", pattern]);
        command
    }

    fn test_command(&self, packages: &[String]) -> Command {
        let mut command = self.go();
        command.arg("test").args(packages);
        command
    }

    fn install_command(&self, pattern: &str) -> Command {
        let mut command = self.go();
        command.args(["install", pattern]);
        command
    }
}

#[async_trait]
impl SecondaryCodegenInvoker for GoToolchain {
    async fn generate_strings(&self, request: &StringerRequest<'_>) -> std::io::Result<ToolOutput> {
        run_combined(self.stringer_command(request)).await
    }
}

#[async_trait]
impl TestExecutor for GoToolchain {
    async fn list_packages(&self, pattern: &str) -> std::io::Result<ToolOutput> {
        run_combined(self.list_command(pattern)).await
    }

    async fn run_tests(&self, packages: &[String]) -> std::io::Result<ToolOutput> {
        run_combined(self.test_command(packages)).await
    }
}

#[async_trait]
impl PackageInstaller for GoToolchain {
    async fn install(&self, pattern: &str) -> std::io::Result<ToolOutput> {
        run_combined(self.install_command(pattern)).await
    }
}
