//! Rule sets and rule resolution
//!
//! A rule set maps path patterns to rules. Only five pattern shapes are
//! recognised, tried from most to least specific:
//!
//! 1. the exact relative path (`db/types.xml`)
//! 2. directory plus extension wildcard (`db/*.xml`)
//! 3. the bare file name (`types.xml`)
//! 4. extension wildcard (`*.xml`)
//! 5. catch-all (`*`)
//!
//! Patterns are looked up as literal keys; there is no glob matching and no
//! combining of several matching rules.

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use modmerge_fs::NormalizedPath;

use crate::rule::Rule;

static DEFAULT_RULE: LazyLock<Rule> = LazyLock::new(Rule::default);

/// Which pattern shape selected a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    ExactPath,
    DirectoryExtension,
    FileName,
    Extension,
    CatchAll,
}

/// A resolved rule together with the pattern that selected it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch<'a> {
    pub kind: MatchKind,
    pub pattern: &'a str,
    pub rule: &'a Rule,
}

/// Mapping from path pattern to rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `pattern`.
    pub fn insert(&mut self, pattern: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(pattern.into(), rule)
    }

    pub fn with_rule(mut self, pattern: impl Into<String>, rule: Rule) -> Self {
        self.insert(pattern, rule);
        self
    }

    pub fn get(&self, pattern: &str) -> Option<&Rule> {
        self.rules.get(pattern)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Find the most specific pattern that has a rule for `path`.
    ///
    /// `path` is relative to the package root; either separator is accepted.
    pub fn lookup(&self, path: &str) -> Option<RuleMatch<'_>> {
        let normalized = NormalizedPath::new(path.trim_start_matches("./"));
        let file_path = normalized.as_str();
        let file_name = normalized.file_name();
        let extension = normalized
            .extension()
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let mut candidates = vec![(MatchKind::ExactPath, file_path.to_string())];
        if let Some(dir) = normalized.parent() {
            candidates.push((
                MatchKind::DirectoryExtension,
                format!("{}/*{}", dir.as_str().trim_end_matches('/'), extension),
            ));
        }
        candidates.push((MatchKind::FileName, file_name.to_string()));
        candidates.push((MatchKind::Extension, format!("*{extension}")));
        candidates.push((MatchKind::CatchAll, "*".to_string()));

        candidates.into_iter().find_map(|(kind, pattern)| {
            self.rules
                .get_key_value(pattern.as_str())
                .map(|(pattern, rule)| RuleMatch {
                    kind,
                    pattern: pattern.as_str(),
                    rule,
                })
        })
    }

    /// The effective rule for `path`; the default rule if nothing matches.
    pub fn resolve(&self, path: &str) -> &Rule {
        match self.lookup(path) {
            Some(found) => {
                tracing::debug!(path, pattern = found.pattern, kind = ?found.kind, "resolved rule");
                found.rule
            }
            None => {
                tracing::debug!(path, "no rule matched, using default");
                &DEFAULT_RULE
            }
        }
    }
}

impl FromIterator<(String, Rule)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, Rule)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
