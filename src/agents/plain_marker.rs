use crate::agents::report::UpdateOutcome;
use crate::agents::updater::ArtifactUpdater;
use crate::config::ArtifactKind;
use crate::error::Result;
use crate::store::ArtifactStore;
use crate::version::CanonicalVersion;
use std::path::{Path, PathBuf};

/// Writes the bare version into a marker file such as `VERSION`.
///
/// Package recipes read this file verbatim, so it holds the version and
/// nothing else: no trailing newline. The file is created when absent.
pub struct PlainMarkerUpdater {
    path: PathBuf,
}

impl PlainMarkerUpdater {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ArtifactUpdater for PlainMarkerUpdater {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Plain
    }

    fn update(
        &self,
        store: &dyn ArtifactStore,
        version: &CanonicalVersion,
    ) -> Result<UpdateOutcome> {
        store.write(&self.path, version.as_str())?;
        Ok(UpdateOutcome::updated(
            &self.path,
            format!("Updated {}: {}", self.path.display(), version),
        ))
    }
}
