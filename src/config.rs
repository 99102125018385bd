use crate::error::{Result, SyncError};
use crate::utils::path_validator::PathValidator;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "vsync.toml";

/// Package name used by the built-in artifact set in `<name>/X.Y.Z` references.
pub const DEFAULT_PROJECT_NAME: &str = "cnanolog";

const DEFAULT_DIRECTIVE: &str = "REF";
const DEFAULT_INDIRECTION: &str = "REF v${VERSION}";

/// Format family of an artifact. The declaration order is the order in
/// which artifacts are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactKind {
    Plain,
    Manifest,
    Script,
    Documentation,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::Plain => "plain",
            ArtifactKind::Manifest => "manifest",
            ArtifactKind::Script => "script",
            ArtifactKind::Documentation => "documentation",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    #[default]
    Json,
    Toml,
}

/// One `(pattern, replacement)` pair of a documentation artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    pub replacement: String,
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Format-specific rules used to locate and rewrite the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactRule {
    Plain,
    Manifest {
        field: String,
        format: ManifestFormat,
    },
    Script {
        directive: String,
        indirection: String,
    },
    Documentation {
        rules: Vec<RuleSpec>,
    },
}

/// A file whose content encodes the release version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub rule: ArtifactRule,
}

impl Artifact {
    pub fn plain(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rule: ArtifactRule::Plain,
        }
    }

    pub fn manifest(path: impl Into<PathBuf>, field: &str, format: ManifestFormat) -> Self {
        Self {
            path: path.into(),
            rule: ArtifactRule::Manifest {
                field: field.to_string(),
                format,
            },
        }
    }

    pub fn script(path: impl Into<PathBuf>, directive: &str, indirection: &str) -> Self {
        Self {
            path: path.into(),
            rule: ArtifactRule::Script {
                directive: directive.to_string(),
                indirection: indirection.to_string(),
            },
        }
    }

    pub fn documentation(path: impl Into<PathBuf>, rules: Vec<RuleSpec>) -> Self {
        Self {
            path: path.into(),
            rule: ArtifactRule::Documentation { rules },
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self.rule {
            ArtifactRule::Plain => ArtifactKind::Plain,
            ArtifactRule::Manifest { .. } => ArtifactKind::Manifest,
            ArtifactRule::Script { .. } => ArtifactKind::Script,
            ArtifactRule::Documentation { .. } => ArtifactKind::Documentation,
        }
    }
}

/// Where the artifact list of a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

/// The artifact set of one project.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub project_name: String,
    pub artifacts: Vec<Artifact>,
    pub source: ConfigSource,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    project: ProjectSection,
    #[serde(default, rename = "artifact")]
    artifacts: Vec<ArtifactEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectSection {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ArtifactEntry {
    Plain {
        path: PathBuf,
    },
    Manifest {
        path: PathBuf,
        field: String,
        #[serde(default)]
        format: ManifestFormat,
    },
    Script {
        path: PathBuf,
        #[serde(default = "default_directive")]
        directive: String,
        #[serde(default = "default_indirection")]
        indirection: String,
    },
    Documentation {
        path: PathBuf,
        #[serde(default)]
        rules: Vec<RuleSpec>,
    },
}

fn default_directive() -> String {
    DEFAULT_DIRECTIVE.to_string()
}

fn default_indirection() -> String {
    DEFAULT_INDIRECTION.to_string()
}

impl From<ArtifactEntry> for Artifact {
    fn from(entry: ArtifactEntry) -> Self {
        match entry {
            ArtifactEntry::Plain { path } => Artifact::plain(path),
            ArtifactEntry::Manifest {
                path,
                field,
                format,
            } => Artifact::manifest(path, &field, format),
            ArtifactEntry::Script {
                path,
                directive,
                indirection,
            } => Artifact::script(path, &directive, &indirection),
            ArtifactEntry::Documentation { path, rules } => Artifact::documentation(path, rules),
        }
    }
}

impl SyncConfig {
    /// Loads the configuration for `project_root`.
    ///
    /// An explicit file wins, then `vsync.toml` in the project root, then the
    /// built-in artifact set.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let candidate = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(SyncError::Config(format!(
                        "Configuration file '{}' not found",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => {
                let default_path = project_root.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        match candidate {
            Some(path) => {
                let content = fs::read_to_string(&path).map_err(|source| {
                    SyncError::ArtifactIo {
                        path: path.clone(),
                        source,
                    }
                })?;
                let mut config =
                    Self::from_toml_str(&content, &Self::directory_name(project_root))?;
                config.source = ConfigSource::File(path);
                Ok(config)
            }
            // The checkout directory name says nothing about the package name.
            None => Ok(Self::builtin(DEFAULT_PROJECT_NAME)),
        }
    }

    /// Parses and validates a configuration document. `default_name` only
    /// labels the run when `[project].name` is absent.
    pub fn from_toml_str(content: &str, default_name: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;

        let project_name = file
            .project
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_name.to_string());

        let config = Self {
            project_name,
            artifacts: file.artifacts.into_iter().map(Artifact::from).collect(),
            source: ConfigSource::BuiltIn,
        };
        config.validate()?;
        Ok(config)
    }

    /// The artifact set of a project publishing through vcpkg and Conan.
    pub fn builtin(project_name: &str) -> Self {
        let name_pattern = format!(r"{}/\d+\.\d+\.\d+", regex::escape(project_name));
        let name_replacement = format!("{project_name}/{{version}}");
        let tag_rule = RuleSpec::new(r"v\d+\.\d+\.\d+", "v{version}");

        Self {
            project_name: project_name.to_string(),
            artifacts: vec![
                Artifact::plain("VERSION"),
                Artifact::manifest("vcpkg.json", "version-string", ManifestFormat::Json),
                Artifact::script("portfile.cmake", DEFAULT_DIRECTIVE, DEFAULT_INDIRECTION),
                Artifact::documentation(
                    "README.md",
                    vec![
                        RuleSpec::new(name_pattern.clone(), name_replacement.clone()),
                        tag_rule.clone(),
                    ],
                ),
                Artifact::documentation(
                    "CONAN.md",
                    vec![RuleSpec::new(name_pattern, name_replacement)],
                ),
                Artifact::documentation("VCPKG.md", vec![tag_rule]),
            ],
            source: ConfigSource::BuiltIn,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.artifacts.is_empty() {
            return Err(SyncError::Config(
                "At least one [[artifact]] entry is required".to_string(),
            ));
        }

        for artifact in &self.artifacts {
            PathValidator::validate_artifact_path(&artifact.path)?;

            match &artifact.rule {
                ArtifactRule::Plain => {}
                ArtifactRule::Manifest { field, .. } => {
                    if field.trim().is_empty() {
                        return Err(SyncError::Config(format!(
                            "Manifest '{}' needs a non-empty field name",
                            artifact.path.display()
                        )));
                    }
                }
                ArtifactRule::Script {
                    directive,
                    indirection,
                } => {
                    if directive.trim().is_empty() || indirection.is_empty() {
                        return Err(SyncError::Config(format!(
                            "Script '{}' needs a directive and an indirection marker",
                            artifact.path.display()
                        )));
                    }
                }
                ArtifactRule::Documentation { rules } => {
                    if rules.is_empty() {
                        return Err(SyncError::Config(format!(
                            "Document '{}' has no substitution rules",
                            artifact.path.display()
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn directory_name(project_root: &Path) -> String {
        project_root
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "project".to_string())
    }
}
