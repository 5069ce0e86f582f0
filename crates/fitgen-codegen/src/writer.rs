//! Primary artifact persistence

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fitgen_core::{ArtifactKind, Error, Logger, OutputLayout, ProfileArtifacts, Result};
use sha2::{Digest, Sha256};

/// Permission bits applied to every written artifact
pub const ARTIFACT_MODE: u32 = 0o644;

/// Result of persisting one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    /// Which artifact
    pub kind: ArtifactKind,
    /// Where it was written
    pub path: PathBuf,
    /// Size in bytes
    pub size: usize,
    /// Leading hex digits of the content's SHA-256
    pub fingerprint: String,
}

/// Writes the generator's three primary artifacts into the output directory
pub struct ArtifactWriter {
    layout: OutputLayout,
    logger: Logger,
}

impl ArtifactWriter {
    /// Create a writer for `layout`
    pub fn new(layout: OutputLayout, logger: Logger) -> Self {
        Self { layout, logger }
    }

    /// Write types, messages and profile sources, in that order
    ///
    /// Each file is replaced atomically through a scratch file in the output
    /// directory. Symlinked artifacts, and directories the scratch file cannot
    /// be created or renamed in, are written in place instead. The first
    /// failure stops the sequence; files already written stay in place.
    pub fn write_all(&self, artifacts: &ProfileArtifacts) -> Result<Vec<WrittenArtifact>> {
        let mut written = Vec::with_capacity(ArtifactKind::PRIMARY.len());

        for kind in ArtifactKind::PRIMARY {
            let content = artifacts.source(kind).unwrap_or_default();
            let path = self.layout.path(kind);

            replace_file(self.layout.root(), &path, content).map_err(|source| Error::Write {
                artifact: kind,
                path: path.clone(),
                source,
            })?;

            let artifact = WrittenArtifact {
                kind,
                size: content.len(),
                fingerprint: fingerprint(content),
                path,
            };
            self.logger.info(format!(
                "wrote {} ({} bytes, sha256: {}...)",
                artifact.path.display(),
                artifact.size,
                artifact.fingerprint
            ));
            written.push(artifact);
        }

        Ok(written)
    }
}

fn replace_file(dir: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    // A rename would swap the link itself for a regular file.
    if path.is_symlink() {
        return write_in_place(path, content);
    }
    match replace_atomically(dir, path, content) {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => write_in_place(path, content),
        result => result,
    }
}

fn replace_atomically(dir: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut scratch = tempfile::NamedTempFile::new_in(dir)?;
    scratch.write_all(content)?;
    scratch.flush()?;
    set_mode(scratch.as_file())?;
    scratch.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_in_place(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content)?;
    file.flush()?;
    set_mode(&file)
}

#[cfg(unix)]
fn set_mode(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(ARTIFACT_MODE))
}

#[cfg(not(unix))]
fn set_mode(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}

fn fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    hex::encode(&digest[..6])
}
