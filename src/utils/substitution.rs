use crate::error::{Result, SyncError};
use crate::version::CanonicalVersion;
use regex::{NoExpand, Regex};

/// Placeholder replaced by the canonical version inside replacement templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// A pattern plus the replacement template substituted for its matches.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pattern: Regex,
    template: String,
    /// Maximum replacements per application, 0 meaning all of them.
    limit: usize,
}

impl SubstitutionRule {
    /// Replaces every match of `pattern`.
    pub fn global(pattern: &str, template: &str) -> Result<Self> {
        Self::compile(pattern, template, 0)
    }

    /// Replaces only the first match of `pattern`.
    pub fn first(pattern: &str, template: &str) -> Result<Self> {
        Self::compile(pattern, template, 1)
    }

    /// Matches the first line whose trimmed text starts with `directive` and
    /// rewrites it as an indented literal `<directive> v<version>` line.
    pub fn directive_line(directive: &str) -> Result<Self> {
        let pattern = format!(r"(?m)^[\s&&[^\n]]*{}.*$", regex::escape(directive));
        let template = format!("    {directive} v{VERSION_PLACEHOLDER}");
        Self::first(&pattern, &template)
    }

    fn compile(pattern: &str, template: &str, limit: usize) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|e| SyncError::InvalidRule {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: compiled,
            template: template.to_string(),
            limit,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn render(&self, version: &CanonicalVersion) -> String {
        self.template.replace(VERSION_PLACEHOLDER, version.as_str())
    }

    fn count_matches(&self, content: &str) -> usize {
        let matches = self.pattern.find_iter(content);
        if self.limit == 0 {
            matches.count()
        } else {
            matches.take(self.limit).count()
        }
    }
}

/// Result of running a [`RuleSet`] over some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub content: String,
    /// `(pattern, replacements made)` for every rule, in rule order.
    pub matches: Vec<(String, usize)>,
}

impl Substitution {
    pub fn total_matches(&self) -> usize {
        self.matches.iter().map(|(_, count)| count).sum()
    }

    pub fn matched(&self) -> bool {
        self.total_matches() > 0
    }
}

/// Ordered list of substitution rules applied one after another.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<SubstitutionRule>) -> Self {
        Self { rules }
    }

    /// Applies each rule to the output of the previous one.
    pub fn apply(&self, content: &str, version: &CanonicalVersion) -> Substitution {
        let mut current = content.to_string();
        let mut matches = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let count = rule.count_matches(&current);
            if count > 0 {
                let replacement = rule.render(version);
                current = rule
                    .pattern
                    .replacen(&current, rule.limit, NoExpand(&replacement))
                    .into_owned();
            }
            matches.push((rule.pattern().to_string(), count));
        }

        Substitution {
            content: current,
            matches,
        }
    }
}
