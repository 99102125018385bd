use crate::agents::report::{OutcomeKind, UpdateOutcome};
use crate::agents::updater::ArtifactUpdater;
use crate::config::{ArtifactKind, RuleSpec};
use crate::error::Result;
use crate::store::ArtifactStore;
use crate::utils::substitution::{RuleSet, SubstitutionRule};
use crate::version::CanonicalVersion;
use std::path::{Path, PathBuf};

/// Refreshes version mentions in a documentation file using that file's own
/// substitution rules. The file is only written when its text changes.
pub struct DocumentationUpdater {
    path: PathBuf,
    rules: RuleSet,
}

impl DocumentationUpdater {
    pub fn new<P: AsRef<Path>>(path: P, specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(|spec| SubstitutionRule::global(&spec.pattern, &spec.replacement))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            rules: RuleSet::new(rules),
        })
    }
}

impl ArtifactUpdater for DocumentationUpdater {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Documentation
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
        let substitution = self.rules.apply(&content, version);

        let details = substitution
            .matches
            .iter()
            .map(|(pattern, count)| format!("{pattern}: {count} match(es)"))
            .collect();

        let outcome = if substitution.content != content {
            store.write(&self.path, &substitution.content)?;
            UpdateOutcome::updated(&self.path, format!("Updated {}", self.path.display()))
        } else if substitution.matched() {
            UpdateOutcome::new(
                &self.path,
                OutcomeKind::SkippedAlreadyCorrect,
                format!("{} already mentions {}", self.path.display(), version),
            )
        } else {
            UpdateOutcome::new(
                &self.path,
                OutcomeKind::NoOpNoMatch,
                format!("{} has no version references", self.path.display()),
            )
        };

        Ok(outcome.with_details(details))
    }
}
