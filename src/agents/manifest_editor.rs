use crate::agents::report::UpdateOutcome;
use crate::agents::updater::ArtifactUpdater;
use crate::config::{ArtifactKind, ManifestFormat};
use crate::error::{Result, SyncError};
use crate::store::ArtifactStore;
use crate::utils::manifest::ManifestUtils;
use crate::version::CanonicalVersion;
use std::path::{Path, PathBuf};

/// Sets the version field of a package-manager manifest (`vcpkg.json`,
/// `Cargo.toml`, ...).
///
/// A manifest that exists but does not parse is a hard error: rewriting it
/// blindly could drop unrelated fields.
pub struct StructuredManifestUpdater {
    path: PathBuf,
    field: String,
    format: ManifestFormat,
}

impl StructuredManifestUpdater {
    pub fn new<P: AsRef<Path>>(path: P, field: &str, format: ManifestFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            field: field.to_string(),
            format,
        }
    }

    fn malformed(&self, reason: String) -> SyncError {
        SyncError::MalformedManifest {
            path: self.path.clone(),
            reason,
        }
    }
}

impl ArtifactUpdater for StructuredManifestUpdater {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Manifest
    }

    fn update(
        &self,
        store: &dyn ArtifactStore,
        version: &CanonicalVersion,
    ) -> Result<UpdateOutcome> {
        if !store.exists(&self.path) {
            return Ok(UpdateOutcome::missing(&self.path));
        }

        let content = store.read(&self.path)?;

        let (previous, rendered) = match self.format {
            ManifestFormat::Json => {
                let (previous, rendered) =
                    ManifestUtils::set_json_field(&content, &self.field, version.as_str())
                        .map_err(|reason| self.malformed(reason))?;
                (previous.map(|value| value.to_string()), rendered)
            }
            ManifestFormat::Toml => {
                ManifestUtils::set_toml_field(&content, &self.field, version.as_str())
                    .map_err(|reason| self.malformed(reason))?
            }
        };

        store.write(&self.path, &rendered)?;

        let detail = match previous {
            Some(old) => format!("{}: {} → {}", self.field, old, version),
            None => format!("{}: added {}", self.field, version),
        };

        Ok(UpdateOutcome::updated(
            &self.path,
            format!("Updated {}: {}", self.path.display(), version),
        )
        .with_details(vec![detail]))
    }
}
