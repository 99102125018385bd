use crate::agents::report::{OutcomeKind, UpdateOutcome};
use crate::agents::updater::ArtifactUpdater;
use crate::config::ArtifactKind;
use crate::error::Result;
use crate::store::ArtifactStore;
use crate::utils::substitution::{RuleSet, SubstitutionRule};
use crate::version::CanonicalVersion;
use std::path::{Path, PathBuf};

/// Patches the version reference of a build script such as a vcpkg
/// `portfile.cmake`, where the version sits on a directive line
/// (`REF v1.2.3`).
///
/// A script that already references the version through a variable
/// (the indirection marker, e.g. `REF v${VERSION}`) is left untouched.
pub struct ScriptReferenceUpdater {
    path: PathBuf,
    directive: String,
    indirection: String,
    rules: RuleSet,
}

impl ScriptReferenceUpdater {
    pub fn new<P: AsRef<Path>>(path: P, directive: &str, indirection: &str) -> Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            directive: directive.to_string(),
            indirection: indirection.to_string(),
            rules: RuleSet::new(vec![SubstitutionRule::directive_line(directive)?]),
        })
    }

    fn uses_indirection(&self, content: &str) -> bool {
        content.split('\n').any(|line| line.contains(&self.indirection))
    }
}

impl ArtifactUpdater for ScriptReferenceUpdater {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Script
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

        if self.uses_indirection(&content) {
            return Ok(UpdateOutcome::new(
                &self.path,
                OutcomeKind::SkippedAlreadyCorrect,
                format!(
                    "{} already uses {} (good!)",
                    self.path.display(),
                    self.indirection
                ),
            ));
        }

        let substitution = self.rules.apply(&content, version);

        // A script without a directive line is still written back, unchanged.
        store.write(&self.path, &substitution.content)?;

        if substitution.matched() {
            Ok(UpdateOutcome::updated(
                &self.path,
                format!(
                    "Updated {} {}: {}",
                    self.path.display(),
                    self.directive,
                    version.tag()
                ),
            ))
        } else {
            Ok(UpdateOutcome::new(
                &self.path,
                OutcomeKind::NoOpNoMatch,
                format!(
                    "{} has no {} line, nothing to update",
                    self.path.display(),
                    self.directive
                ),
            ))
        }
    }
}
