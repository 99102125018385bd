pub mod doc_updater;
pub mod manifest_editor;
pub mod plain_marker;
pub mod report;
pub mod script_patcher;
pub mod synchronizer;
pub mod updater;

pub use doc_updater::DocumentationUpdater;
pub use manifest_editor::StructuredManifestUpdater;
pub use plain_marker::PlainMarkerUpdater;
pub use report::{OutcomeKind, SyncReport, UpdateOutcome};
pub use script_patcher::ScriptReferenceUpdater;
pub use synchronizer::VersionSynchronizer;
