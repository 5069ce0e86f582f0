//! Contract with the schema-to-source profile generator
//!
//! The pipeline only sees [`ProfileGenerator`]. How a workbook is interpreted
//! is entirely up to the implementation.

use crate::config::{ArtifactKind, GeneratorOptions};
use crate::error::Result;
use crate::version::SdkVersion;

/// Everything a generator needs for one run
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// SDK version printed into the generated sources
    pub sdk: SdkVersion,
    /// Raw workbook bytes as resolved from the input
    pub raw_input: Vec<u8>,
    /// Generator options
    pub options: GeneratorOptions,
}

impl GenerationRequest {
    /// Bundle a request
    pub fn new(sdk: SdkVersion, raw_input: Vec<u8>, options: GeneratorOptions) -> Self {
        Self {
            sdk,
            raw_input,
            options,
        }
    }
}

/// Generated sources plus the data later stages consume
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileArtifacts {
    /// Types source text
    pub types_source: Vec<u8>,
    /// Messages source text
    pub messages_source: Vec<u8>,
    /// Profile index source text
    pub profile_source: Vec<u8>,
    /// Type names that need a string representation, in generation order
    pub stringer_input: Vec<String>,
    /// Message-number identifiers with no generated message, in enumeration order
    pub mesg_nums_without_message: Vec<String>,
}

impl ProfileArtifacts {
    /// Source bytes for one of the primary artifacts
    ///
    /// Returns `None` for [`ArtifactKind::TypesString`], which the generator
    /// does not produce.
    pub fn source(&self, kind: ArtifactKind) -> Option<&[u8]> {
        match kind {
            ArtifactKind::Types => Some(&self.types_source),
            ArtifactKind::Messages => Some(&self.messages_source),
            ArtifactKind::Profile => Some(&self.profile_source),
            ArtifactKind::TypesString => None,
        }
    }
}

/// Turns a workbook into generated sources
///
/// Implementations may log through `request.options.logger()` but must not
/// touch the filesystem or spawn processes. Any failure interpreting the
/// workbook is reported as [`Error::Generation`](crate::Error::Generation).
pub trait ProfileGenerator {
    /// Generate every artifact for `request`
    fn generate(&self, request: &GenerationRequest) -> Result<ProfileArtifacts>;
}

impl<G: ProfileGenerator + ?Sized> ProfileGenerator for &G {
    fn generate(&self, request: &GenerationRequest) -> Result<ProfileArtifacts> {
        (**self).generate(request)
    }
}

impl<G: ProfileGenerator + ?Sized> ProfileGenerator for Box<G> {
    fn generate(&self, request: &GenerationRequest) -> Result<ProfileArtifacts> {
        (**self).generate(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lookup() {
        let artifacts = ProfileArtifacts {
            types_source: b"types".to_vec(),
            messages_source: b"messages".to_vec(),
            profile_source: b"profile".to_vec(),
            ..Default::default()
        };
        assert_eq!(artifacts.source(ArtifactKind::Types), Some(&b"types"[..]));
        assert_eq!(
            artifacts.source(ArtifactKind::Profile),
            Some(&b"profile"[..])
        );
        assert_eq!(artifacts.source(ArtifactKind::TypesString), None);
    }

    struct Fixed;

    impl ProfileGenerator for Fixed {
        fn generate(&self, request: &GenerationRequest) -> Result<ProfileArtifacts> {
            Ok(ProfileArtifacts {
                types_source: request.sdk.to_string().into_bytes(),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_boxed_generator_delegates() {
        let generator: Box<dyn ProfileGenerator> = Box::new(Fixed);
        let request =
            GenerationRequest::new(SdkVersion::new(1, 2), Vec::new(), GeneratorOptions::new());
        let artifacts = generator.generate(&request).unwrap();
        assert_eq!(artifacts.types_source, b"1.2");
    }
}
