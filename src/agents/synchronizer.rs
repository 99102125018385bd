use crate::agents::report::{SyncReport, UpdateOutcome};
use crate::agents::updater::{ArtifactUpdater, UpdaterFactory};
use crate::config::{Artifact, ArtifactKind};
use crate::error::Result;
use crate::store::ArtifactStore;
use crate::version::CanonicalVersion;
use std::path::Path;

/// Drives the artifact updaters of one run.
///
/// Artifacts run in stage order (plain marker, manifests, scripts, docs);
/// within a stage the configured order is kept. The first hard error stops
/// the run and leaves already-updated artifacts as they are.
pub struct VersionSynchronizer {
    updaters: Vec<Box<dyn ArtifactUpdater>>,
}

impl VersionSynchronizer {
    pub fn from_artifacts(artifacts: &[Artifact]) -> Result<Self> {
        let mut ordered: Vec<&Artifact> = artifacts.iter().collect();
        ordered.sort_by_key(|artifact| artifact.kind());

        let updaters = ordered
            .into_iter()
            .map(UpdaterFactory::create)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { updaters })
    }

    pub fn len(&self) -> usize {
        self.updaters.len()
    }

    /// The artifacts in the order they will be processed.
    pub fn plan(&self) -> impl Iterator<Item = (ArtifactKind, &Path)> {
        self.updaters
            .iter()
            .map(|updater| (updater.kind(), updater.path()))
    }

    /// Runs every updater, handing each outcome to `on_outcome` as soon as it
    /// is known.
    pub fn run<F>(
        &self,
        store: &dyn ArtifactStore,
        version: &CanonicalVersion,
        mut on_outcome: F,
    ) -> Result<SyncReport>
    where
        F: FnMut(&UpdateOutcome),
    {
        let mut report = SyncReport::new();

        for updater in &self.updaters {
            let outcome = updater.update(store, version)?;
            on_outcome(&outcome);
            report.push(outcome);
        }

        Ok(report)
    }
}
