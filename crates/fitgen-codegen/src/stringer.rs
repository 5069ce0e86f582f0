//! String-representation artifact generation
//!
//! The external tool writes into a scratch file; only after it succeeds is
//! the final artifact created, starting with [`TYPES_STRING_HEADER`] followed
//! by the scratch file's content byte for byte. The scratch file is removed on
//! every path out of [`SecondaryCodegenRunner::run`].

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fitgen_core::{
    ArtifactKind, Error, Logger, OutputLayout, Result, SecondaryCodegenInvoker, StringerRequest,
};
use tempfile::NamedTempFile;

/// First line of the string-representation artifact
pub const TYPES_STRING_HEADER: &str =
    "//lint:file-ignore SA4003 Ignore checks of unsigned types >= 0. stringer generates these.\n";

/// Runs the string-representation tool and splices its output into place
pub struct SecondaryCodegenRunner<'a> {
    invoker: &'a dyn SecondaryCodegenInvoker,
    layout: OutputLayout,
    logger: Logger,
}

impl<'a> SecondaryCodegenRunner<'a> {
    /// Create a runner writing into `layout`
    pub fn new(
        invoker: &'a dyn SecondaryCodegenInvoker,
        layout: OutputLayout,
        logger: Logger,
    ) -> Self {
        Self {
            invoker,
            layout,
            logger,
        }
    }

    /// Generate string methods for `type_names` and return the artifact path
    pub async fn run(&self, type_names: &[String]) -> Result<PathBuf> {
        let mut scratch = tempfile::Builder::new()
            .prefix("stringer")
            .tempfile()
            .map_err(|e| Error::stringer(format!("error getting temporary file: {e}"), ""))?;

        let result = self.generate(&mut scratch, type_names).await;

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            self.logger.warn(format!(
                "stringer: error removing temporary file {}: {e}",
                scratch_path.display()
            ));
        }

        result
    }

    async fn generate(
        &self,
        scratch: &mut NamedTempFile,
        type_names: &[String],
    ) -> Result<PathBuf> {
        let request = StringerRequest {
            type_names,
            output: scratch.path(),
            scan_dir: self.layout.root(),
            trim_prefix: true,
        };
        self.logger
            .debug(format!("stringer: types {}", request.joined_type_names()));

        let output = self
            .invoker
            .generate_strings(&request)
            .await
            .map_err(|e| Error::stringer(format!("error running on types: {e}"), ""))?;
        if !output.success {
            return Err(Error::stringer(
                format!("error running on types: {}", output.status()),
                output.text(),
            ));
        }

        let target = self.layout.path(ArtifactKind::TypesString);
        splice(scratch.as_file_mut(), &target)
            .map_err(|e| Error::stringer(format!("error creating output file: {e}"), ""))?;
        Ok(target)
    }
}

fn splice(scratch: &mut File, target: &Path) -> io::Result<()> {
    let mut out = File::create(target)?;
    out.write_all(TYPES_STRING_HEADER.as_bytes())?;
    scratch.seek(SeekFrom::Start(0))?;
    io::copy(scratch, &mut out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fitgen_core::ToolOutput;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Writes `content` to the requested output and reports `result`
    struct FakeStringer {
        content: &'static [u8],
        result: ToolOutput,
        seen_output: Mutex<Option<PathBuf>>,
        seen_types: Mutex<Option<String>>,
    }

    impl FakeStringer {
        fn new(content: &'static [u8], result: ToolOutput) -> Self {
            Self {
                content,
                result,
                seen_output: Mutex::new(None),
                seen_types: Mutex::new(None),
            }
        }

        fn seen_output(&self) -> PathBuf {
            self.seen_output.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl SecondaryCodegenInvoker for FakeStringer {
        async fn generate_strings(&self, request: &StringerRequest<'_>) -> io::Result<ToolOutput> {
            assert!(request.trim_prefix);
            *self.seen_output.lock().unwrap() = Some(request.output.to_path_buf());
            *self.seen_types.lock().unwrap() = Some(request.joined_type_names());
            std::fs::write(request.output, self.content)?;
            Ok(self.result.clone())
        }
    }

    struct MissingTool;

    #[async_trait]
    impl SecondaryCodegenInvoker for MissingTool {
        async fn generate_strings(&self, _request: &StringerRequest<'_>) -> io::Result<ToolOutput> {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                "go: executable file not found",
            ))
        }
    }

    fn types() -> Vec<String> {
        vec!["File".to_string(), "MesgNum".to_string()]
    }

    fn runner<'a>(tool: &'a dyn SecondaryCodegenInvoker, dir: &Path) -> SecondaryCodegenRunner<'a> {
        SecondaryCodegenRunner::new(tool, OutputLayout::new(dir), Logger::memory().0)
    }

    #[tokio::test]
    async fn test_success_prepends_header() {
        let dir = TempDir::new().unwrap();
        let generated: &[u8] =
            b"// Code generated by \"stringer\"; DO NOT EDIT.\n\npackage fit\n\x00\xff";
        let tool = FakeStringer::new(generated, ToolOutput::ok(""));

        let path = runner(&tool, dir.path()).run(&types()).await.unwrap();

        assert_eq!(path, dir.path().join("types_string.go"));
        let mut expected = TYPES_STRING_HEADER.as_bytes().to_vec();
        expected.extend_from_slice(generated);
        assert_eq!(std::fs::read(&path).unwrap(), expected);
        assert_eq!(
            tool.seen_types.lock().unwrap().as_deref(),
            Some("File,MesgNum")
        );
        assert!(!tool.seen_output().exists(), "scratch file must be removed");
    }

    #[tokio::test]
    async fn test_success_replaces_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("types_string.go");
        std::fs::write(&target, vec![b'x'; 4096]).unwrap();
        let tool = FakeStringer::new(b"short\n", ToolOutput::ok(""));

        runner(&tool, dir.path()).run(&types()).await.unwrap();

        let content = std::fs::read_to_string(&target).unwrap();
        assert_eq!(content, format!("{TYPES_STRING_HEADER}short\n"));
    }

    #[tokio::test]
    async fn test_failure_leaves_no_artifact_and_no_scratch() {
        let dir = TempDir::new().unwrap();
        let tool = FakeStringer::new(
            b"partial",
            ToolOutput::failed(1, "stringer: no values defined for type Foo"),
        );

        let err = runner(&tool, dir.path()).run(&types()).await.unwrap_err();

        match err {
            Error::SecondaryCodegen { output, .. } => {
                assert_eq!(output, "stringer: no values defined for type Foo");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!dir.path().join("types_string.go").exists());
        assert!(!tool.seen_output().exists());
    }

    #[tokio::test]
    async fn test_failure_does_not_modify_existing_artifact() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("types_string.go");
        std::fs::write(&target, b"previous run").unwrap();
        let tool = FakeStringer::new(b"", ToolOutput::failed(2, "boom"));

        runner(&tool, dir.path()).run(&types()).await.unwrap_err();

        assert_eq!(std::fs::read(&target).unwrap(), b"previous run");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_secondary_codegen_error() {
        let dir = TempDir::new().unwrap();
        let err = runner(&MissingTool, dir.path())
            .run(&types())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), fitgen_core::ErrorKind::SecondaryCodegen);
        assert!(!dir.path().join("types_string.go").exists());
    }

    #[tokio::test]
    async fn test_unwritable_target_still_removes_scratch() {
        let dir = TempDir::new().unwrap();
        let layout = OutputLayout::new(dir.path().join("missing-dir"));
        let tool = FakeStringer::new(b"package fit\n", ToolOutput::ok(""));

        let err = SecondaryCodegenRunner::new(&tool, layout, Logger::memory().0)
            .run(&types())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("error creating output file"));
        assert!(!tool.seen_output().exists());
    }
}
