use crate::agents::{OutcomeKind, SyncReport, UpdateOutcome, VersionSynchronizer};
use crate::config::{ConfigSource, SyncConfig};
use crate::error::Result;
use crate::store::DiskStore;
use crate::utils::path_validator::PathValidator;
use crate::version::CanonicalVersion;
use colored::Colorize;
use std::path::Path;

const RULE: &str = "==================================================";

/// Execute the sync workflow: validate, load the artifact set, update every
/// artifact and print guidance for the release.
pub fn execute_sync<P: AsRef<Path>>(
    project_path: P,
    raw_version: &str,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<SyncReport> {
    // Nothing may be touched before the version is known to be well formed.
    let version = CanonicalVersion::parse(raw_version)?;

    println!(
        "{}",
        format!("Synchronizing release version {}...", version)
            .cyan()
            .bold()
    );

    // Step 1: Validate project structure
    println!("\n{}", "1. Validating project structure...".yellow());
    let project_root = PathValidator::validate_project_path(project_path.as_ref())?;
    println!("{}", "✓ Project structure is valid".green());

    // Step 2: Load artifact configuration
    println!("\n{}", "2. Loading artifact configuration...".yellow());
    let config = SyncConfig::load(&project_root, config_path)?;
    let synchronizer = VersionSynchronizer::from_artifacts(&config.artifacts)?;
    match &config.source {
        ConfigSource::File(path) => println!("   Using {}", path.display().to_string().bright_cyan()),
        ConfigSource::BuiltIn => println!("   Using built-in artifact set"),
    }
    println!(
        "   {} artifact(s) for {}",
        synchronizer.len(),
        config.project_name.bright_cyan()
    );
    if verbose {
        for (kind, path) in synchronizer.plan() {
            println!("   • {} ({})", path.display(), kind.to_string().dimmed());
        }
    }

    // Step 3: Update artifacts
    println!(
        "\n{}",
        format!("3. Updating {} to {}...", config.project_name, version).yellow()
    );
    println!("{}", RULE);
    let store = DiskStore::new(&project_root);
    let report = synchronizer.run(&store, &version, |outcome| {
        print_outcome(outcome, verbose)
    })?;
    println!("{}", RULE);

    // Step 4: Display summary
    print_summary(&report, &version);
    print_next_steps(&version);

    Ok(report)
}

fn print_outcome(outcome: &UpdateOutcome, verbose: bool) {
    match outcome.kind {
        OutcomeKind::Updated | OutcomeKind::SkippedAlreadyCorrect => {
            println!("{}", format!("✓ {}", outcome.message).green())
        }
        OutcomeKind::SkippedMissing => println!("{}", format!("⚠ {}", outcome.message).yellow()),
        OutcomeKind::NoOpNoMatch => println!("{}", format!("• {}", outcome.message).dimmed()),
    }

    if verbose {
        for detail in &outcome.details {
            println!("    {}", detail.dimmed());
        }
    }
}

fn print_summary(report: &SyncReport, version: &CanonicalVersion) {
    let updated = report.count(OutcomeKind::Updated);
    let current = report.count(OutcomeKind::SkippedAlreadyCorrect);
    let missing = report.count(OutcomeKind::SkippedMissing);
    let unmatched = report.count(OutcomeKind::NoOpNoMatch);

    println!(
        "\n{}",
        format!("✓ All files updated to version {}", version)
            .green()
            .bold()
    );
    println!(
        "   {} artifact(s): {} updated, {} already current, {} missing, {} without version references",
        report.total(),
        updated,
        current,
        missing,
        unmatched
    );
}

fn print_next_steps(version: &CanonicalVersion) {
    println!("\n{}", "Next steps:".cyan().bold());
    println!("1. Review changes with: {}", "git diff".cyan());
    println!("2. Rebuild and run the tests before publishing");
    println!(
        "3. Commit: {}",
        format!("git commit -am 'Bump version to {}'", version).cyan()
    );
    println!("4. Tag: {}", format!("git tag {}", version.tag()).cyan());
    println!("5. Push: {}", "git push origin HEAD --tags".cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::error::SyncError;
    use std::fs;
    use tempfile::tempdir;

    fn seed_project(root: &Path) {
        fs::write(root.join("VERSION"), "1.0.0").unwrap();
        fs::write(
            root.join("vcpkg.json"),
            "{\n  \"name\": \"demo\",\n  \"version-string\": \"1.0.0\"\n}\n",
        )
        .unwrap();
        fs::write(root.join("portfile.cmake"), "vcpkg_from_github(\n    REF v1.0.0\n)\n").unwrap();
        fs::write(root.join("VCPKG.md"), "Port for v1.0.0\n").unwrap();
    }

    #[test]
    fn invalid_version_touches_nothing() {
        let dir = tempdir().unwrap();
        seed_project(dir.path());

        let err = execute_sync(dir.path(), "v1.2.0", None, false).unwrap_err();
        assert!(matches!(err, SyncError::InvalidFormat(_)));
        assert_eq!(fs::read_to_string(dir.path().join("VERSION")).unwrap(), "1.0.0");
    }

    #[test]
    fn invalid_version_is_reported_before_project_checks() {
        let err = execute_sync("/definitely/not/here", "1.2", None, false).unwrap_err();
        assert!(matches!(err, SyncError::InvalidFormat(_)));
    }

    #[test]
    fn updates_builtin_artifacts_on_disk() {
        let dir = tempdir().unwrap();
        seed_project(dir.path());

        let report = execute_sync(dir.path(), " 1.2.0 ", None, false).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("VERSION")).unwrap(), "1.2.0");
        assert_eq!(
            fs::read_to_string(dir.path().join("portfile.cmake")).unwrap(),
            "vcpkg_from_github(\n    REF v1.2.0\n)\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("VCPKG.md")).unwrap(),
            "Port for v1.2.0\n"
        );
        assert_eq!(report.count(OutcomeKind::Updated), 4);
        assert_eq!(report.count(OutcomeKind::SkippedMissing), 2);
        assert!(!dir.path().join("README.md").exists());
        assert!(!dir.path().join("CONAN.md").exists());
    }

    #[test]
    fn builtin_references_update_in_renamed_checkout() {
        let dir = tempdir().unwrap();
        let checkout = dir.path().join("CNanoLog-1.0");
        fs::create_dir(&checkout).unwrap();
        fs::write(
            checkout.join("CONAN.md"),
            "conan install --requires=cnanolog/1.0.0\n",
        )
        .unwrap();

        let report = execute_sync(&checkout, "1.1.0", None, false).unwrap();

        assert_eq!(
            fs::read_to_string(checkout.join("CONAN.md")).unwrap(),
            "conan install --requires=cnanolog/1.1.0\n"
        );
        assert_eq!(
            report.outcome_for("CONAN.md").map(|o| o.kind),
            Some(OutcomeKind::Updated)
        );
    }

    #[test]
    fn missing_manifest_is_not_created() {
        let dir = tempdir().unwrap();

        let report = execute_sync(dir.path(), "0.1.0", None, false).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("VERSION")).unwrap(), "0.1.0");
        assert!(!dir.path().join("vcpkg.json").exists());
        assert_eq!(
            report.outcome_for("vcpkg.json").map(|o| o.kind),
            Some(OutcomeKind::SkippedMissing)
        );
    }

    #[test]
    fn project_config_file_replaces_builtin_set() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("packaging")).unwrap();
        fs::write(dir.path().join("packaging/VERSION.txt"), "").unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[[artifact]]
kind = "manifest"
path = "Cargo.toml"
field = "package.version"
format = "toml"

[[artifact]]
kind = "plain"
path = "packaging/VERSION.txt"
"#,
        )
        .unwrap();

        let report = execute_sync(dir.path(), "0.3.0", None, true).unwrap();

        let order: Vec<_> = report
            .outcomes()
            .iter()
            .map(|o| o.path.display().to_string())
            .collect();
        assert_eq!(order, vec!["packaging/VERSION.txt", "Cargo.toml"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("packaging/VERSION.txt")).unwrap(),
            "0.3.0"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("Cargo.toml")).unwrap(),
            "[package]\nname = \"demo\"\nversion = \"0.3.0\"\n"
        );
    }

    #[test]
    fn corrupt_manifest_stops_the_run() {
        let dir = tempdir().unwrap();
        seed_project(dir.path());
        fs::write(dir.path().join("vcpkg.json"), "{ broken").unwrap();

        let err = execute_sync(dir.path(), "1.5.0", None, false).unwrap_err();

        assert!(matches!(err, SyncError::MalformedManifest { .. }));
        assert_eq!(fs::read_to_string(dir.path().join("VERSION")).unwrap(), "1.5.0");
        assert_eq!(
            fs::read_to_string(dir.path().join("portfile.cmake")).unwrap(),
            "vcpkg_from_github(\n    REF v1.0.0\n)\n"
        );
    }
}
