//! Optional post-generation stages: package install and full test run

use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::toolchain::{PackageInstaller, TestExecutor};

/// Lists and tests every non-vendored package below a root pattern
pub struct TestRunner<'a> {
    executor: &'a dyn TestExecutor,
    vendor_marker: String,
    logger: Logger,
}

impl<'a> TestRunner<'a> {
    /// Create a runner that skips packages containing `vendor_marker`
    pub fn new(
        executor: &'a dyn TestExecutor,
        vendor_marker: impl Into<String>,
        logger: Logger,
    ) -> Self {
        Self {
            executor,
            vendor_marker: vendor_marker.into(),
            logger,
        }
    }

    /// List the packages matching `pattern`, then test exactly those
    ///
    /// Returns the tested package list.
    pub async fn run_all(&self, pattern: &str) -> Result<Vec<String>> {
        let packages = self.list(pattern).await?;
        self.logger
            .debug(format!("go test: {} package(s)", packages.len()));

        let output = self
            .executor
            .run_tests(&packages)
            .await
            .map_err(|e| Error::test_stage("go test", e.to_string(), ""))?;
        if !output.success {
            return Err(Error::test_stage("go test", output.status(), output.text()));
        }

        self.logger.info("go test: pass");
        Ok(packages)
    }

    async fn list(&self, pattern: &str) -> Result<Vec<String>> {
        let output = self
            .executor
            .list_packages(pattern)
            .await
            .map_err(|e| Error::test_stage("go list", e.to_string(), ""))?;
        if !output.success {
            return Err(Error::test_stage("go list", output.status(), output.text()));
        }

        let packages = filter_packages(&output.text(), &self.vendor_marker);
        if packages.is_empty() {
            return Err(Error::test_stage(
                "go list",
                "no packages to test",
                output.text(),
            ));
        }
        Ok(packages)
    }
}

/// Package lines from a listing, minus blanks and vendored subtrees
pub fn filter_packages(listing: &str, vendor_marker: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(vendor_marker))
        .map(str::to_string)
        .collect()
}

/// Install every package matching `pattern`
pub async fn install_packages(
    installer: &dyn PackageInstaller,
    pattern: &str,
    logger: &Logger,
) -> Result<()> {
    logger.info("running go install (for go/types in stringer)");
    let output = installer
        .install(pattern)
        .await
        .map_err(|e| Error::test_stage("go install", e.to_string(), ""))?;
    if !output.success {
        return Err(Error::test_stage(
            "go install",
            output.status(),
            output.text(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::ToolOutput;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeGo {
        listing: Option<ToolOutput>,
        test_result: Option<ToolOutput>,
        tested: Mutex<Vec<String>>,
        test_runs: AtomicUsize,
    }

    #[async_trait]
    impl TestExecutor for FakeGo {
        async fn list_packages(&self, _pattern: &str) -> std::io::Result<ToolOutput> {
            self.listing
                .clone()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "go: not found"))
        }

        async fn run_tests(&self, packages: &[String]) -> std::io::Result<ToolOutput> {
            self.test_runs.fetch_add(1, Ordering::SeqCst);
            self.tested.lock().unwrap().extend_from_slice(packages);
            Ok(self
                .test_result
                .clone()
                .unwrap_or_else(|| ToolOutput::ok("ok")))
        }
    }

    #[async_trait]
    impl PackageInstaller for FakeGo {
        async fn install(&self, _pattern: &str) -> std::io::Result<ToolOutput> {
            Ok(self
                .test_result
                .clone()
                .unwrap_or_else(|| ToolOutput::ok("")))
        }
    }

    #[test]
    fn test_filter_packages_drops_vendor_and_blanks() {
        let listing = "github.com/tormoder/fit\n\
                       github.com/tormoder/fit/vendor/golang.org/x/tools\n\
                       github.com/tormoder/fit/dyncrc16\n\n";
        assert_eq!(
            filter_packages(listing, "/vendor/"),
            vec!["github.com/tormoder/fit", "github.com/tormoder/fit/dyncrc16"]
        );
    }

    #[tokio::test]
    async fn test_runs_exactly_listed_packages() {
        let go = FakeGo {
            listing: Some(ToolOutput::ok(
                "example.com/fit\nexample.com/fit/vendor/x\nexample.com/fit/cmd/fitgen\n",
            )),
            ..Default::default()
        };
        let (logger, sink) = Logger::memory();

        let tested = TestRunner::new(&go, "/vendor/", logger)
            .run_all("example.com/fit/...")
            .await
            .unwrap();

        assert_eq!(
            tested,
            vec!["example.com/fit", "example.com/fit/cmd/fitgen"]
        );
        assert_eq!(*go.tested.lock().unwrap(), tested);
        assert!(sink.lines().contains(&"go test: pass".to_string()));
    }

    #[tokio::test]
    async fn test_only_vendored_packages_listed() {
        let go = FakeGo {
            listing: Some(ToolOutput::ok("example.com/fit/vendor/a\n\n")),
            ..Default::default()
        };
        let (logger, sink) = Logger::memory();

        let err = TestRunner::new(&go, "/vendor/", logger)
            .run_all("example.com/fit/...")
            .await
            .unwrap_err();

        match err {
            Error::Test {
                stage,
                message,
                output,
            } => {
                assert_eq!(stage, "go list");
                assert_eq!(message, "no packages to test");
                assert_eq!(output, "example.com/fit/vendor/a\n\n");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(go.test_runs.load(Ordering::SeqCst), 0);
        assert!(!sink.lines().contains(&"go test: pass".to_string()));
    }

    #[tokio::test]
    async fn test_listing_failure_surfaces_output() {
        let go = FakeGo {
            listing: Some(ToolOutput::failed(1, "malformed import path")),
            ..Default::default()
        };
        let err = TestRunner::new(&go, "/vendor/", Logger::memory().0)
            .run_all("bad/...")
            .await
            .unwrap_err();

        match err {
            Error::Test { stage, output, .. } => {
                assert_eq!(stage, "go list");
                assert_eq!(output, "malformed import path");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(go.tested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_test_failure_surfaces_output() {
        let go = FakeGo {
            listing: Some(ToolOutput::ok("example.com/fit\n")),
            test_result: Some(ToolOutput::failed(1, "--- FAIL: TestDecode")),
            ..Default::default()
        };
        let err = TestRunner::new(&go, "/vendor/", Logger::memory().0)
            .run_all("example.com/fit/...")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--- FAIL: TestDecode"));
        assert!(err.to_string().starts_with("go test: fail"));
    }

    #[tokio::test]
    async fn test_missing_tool_is_test_error() {
        let go = FakeGo::default();
        let err = TestRunner::new(&go, "/vendor/", Logger::memory().0)
            .run_all("example.com/fit/...")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Test);
    }

    #[tokio::test]
    async fn test_install_failure() {
        let go = FakeGo {
            test_result: Some(ToolOutput::failed(2, "cannot find package")),
            ..Default::default()
        };
        let err = install_packages(&go, "example.com/fit/...", &Logger::memory().0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("cannot find package"));
    }
}
