use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to a single artifact during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Updated,
    SkippedMissing,
    SkippedAlreadyCorrect,
    NoOpNoMatch,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutcomeKind::Updated => "updated",
            OutcomeKind::SkippedMissing => "skipped-missing",
            OutcomeKind::SkippedAlreadyCorrect => "skipped-already-correct",
            OutcomeKind::NoOpNoMatch => "no-op-no-match",
        };
        f.write_str(label)
    }
}

/// Result of running one updater, with a message for the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub path: PathBuf,
    pub kind: OutcomeKind,
    pub message: String,
    /// Extra lines shown in verbose mode.
    pub details: Vec<String>,
}

impl UpdateOutcome {
    pub fn new(path: &Path, kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn updated(path: &Path, message: impl Into<String>) -> Self {
        Self::new(path, OutcomeKind::Updated, message)
    }

    pub fn missing(path: &Path) -> Self {
        Self::new(
            path,
            OutcomeKind::SkippedMissing,
            format!("{} not found, skipping", path.display()),
        )
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

/// Tracks the outcome of every artifact in one run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    outcomes: Vec<UpdateOutcome>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: UpdateOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind == kind).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

#[cfg(test)]
impl SyncReport {
    pub fn outcomes(&self) -> &[UpdateOutcome] {
        &self.outcomes
    }

    pub fn outcome_for(&self, path: &str) -> Option<&UpdateOutcome> {
        self.outcomes.iter().find(|o| o.path == Path::new(path))
    }
}
