use crate::error::{Result, SyncError};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static CANONICAL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("static pattern compiles"));

/// A validated `MAJOR.MINOR.PATCH` release version.
///
/// Only the format is checked. Versions are never compared with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalVersion(String);

impl CanonicalVersion {
    /// Validates a candidate after trimming surrounding whitespace.
    pub fn parse(candidate: &str) -> Result<Self> {
        let trimmed = candidate.trim();
        if CANONICAL_FORMAT.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(SyncError::InvalidFormat(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `v`-prefixed form used for tags and script references.
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }
}

impl fmt::Display for CanonicalVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_numeric_segments() {
        for candidate in ["0.0.0", "1.2.3", "10.20.30", "01.002.0003"] {
            let version = CanonicalVersion::parse(candidate).unwrap();
            assert_eq!(version.as_str(), candidate);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let version = CanonicalVersion::parse("  1.4.0\n").unwrap();
        assert_eq!(version.as_str(), "1.4.0");
        assert_eq!(version.tag(), "v1.4.0");
    }

    #[test]
    fn rejects_non_canonical_input() {
        for candidate in [
            "",
            "   ",
            "1.2",
            "1.2.3.4",
            "v1.2.3",
            "1.2.3-rc.1",
            "1.2.3+build",
            "1.a.3",
            "1..3",
            "1.2.3 4",
            "١.٢.٣",
        ] {
            let err = CanonicalVersion::parse(candidate).unwrap_err();
            assert!(
                matches!(err, SyncError::InvalidFormat(ref raw) if raw == candidate),
                "expected rejection for {candidate:?}"
            );
        }
    }
}
