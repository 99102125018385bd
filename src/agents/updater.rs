use crate::agents::report::UpdateOutcome;
use crate::agents::{
    DocumentationUpdater, PlainMarkerUpdater, ScriptReferenceUpdater, StructuredManifestUpdater,
};
use crate::config::{Artifact, ArtifactKind, ArtifactRule};
use crate::error::Result;
use crate::store::ArtifactStore;
use crate::version::CanonicalVersion;
use std::path::Path;

/// Rewrites the version inside one artifact format.
pub trait ArtifactUpdater {
    fn path(&self) -> &Path;

    fn kind(&self) -> ArtifactKind;

    /// Reads the artifact (if present), rewrites it and reports what happened.
    fn update(&self, store: &dyn ArtifactStore, version: &CanonicalVersion)
    -> Result<UpdateOutcome>;
}

/// Builds the updater matching an artifact's configured format.
pub struct UpdaterFactory;

impl UpdaterFactory {
    /// Fails on rules that do not compile, so nothing is written for a bad
    /// configuration.
    pub fn create(artifact: &Artifact) -> Result<Box<dyn ArtifactUpdater>> {
        let path = artifact.path.clone();
        let updater: Box<dyn ArtifactUpdater> = match &artifact.rule {
            ArtifactRule::Plain => Box::new(PlainMarkerUpdater::new(path)),
            ArtifactRule::Manifest { field, format } => {
                Box::new(StructuredManifestUpdater::new(path, field, *format))
            }
            ArtifactRule::Script {
                directive,
                indirection,
            } => Box::new(ScriptReferenceUpdater::new(path, directive, indirection)?),
            ArtifactRule::Documentation { rules } => {
                Box::new(DocumentationUpdater::new(path, rules)?)
            }
        };
        Ok(updater)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ManifestFormat, RuleSpec};
    use crate::error::SyncError;

    #[test]
    fn creates_updater_for_each_kind() {
        let artifacts = [
            Artifact::plain("VERSION"),
            Artifact::manifest("vcpkg.json", "version-string", ManifestFormat::Json),
            Artifact::script("portfile.cmake", "REF", "REF v${VERSION}"),
            Artifact::documentation("README.md", vec![RuleSpec::new(r"v\d+", "v{version}")]),
        ];

        for artifact in &artifacts {
            let updater = UpdaterFactory::create(artifact).unwrap();
            assert_eq!(updater.kind(), artifact.kind());
            assert_eq!(updater.path(), artifact.path.as_path());
        }
    }

    #[test]
    fn rejects_documents_with_invalid_patterns() {
        let artifact = Artifact::documentation("README.md", vec![RuleSpec::new("v(", "x")]);
        let err = UpdaterFactory::create(&artifact).err().unwrap();
        assert!(matches!(err, SyncError::InvalidRule { .. }));
    }
}
