use crate::core::{PathfenceError, Result};
use regex::Regex;

/// Whether root comparisons respect letter case.
///
/// Insensitive matching folds ASCII letters only; every other character must match exactly.
/// Both matchers apply the same rule so they agree on non-ASCII paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

/// Trait for compiled exclusion matchers
///
/// Implementations are built once from normalized roots and are immutable afterwards, so a
/// single matcher can be shared across threads without locking.
pub trait ExclusionMatcher: Send + Sync {
    /// Check whether the candidate equals a root or lies beneath one
    fn excludes(&self, path: &str) -> bool;

    /// Get a human-readable description of this matcher strategy
    fn description(&self) -> &'static str;
}

/// Single regex alternation over every escaped root, anchored at the start of the path
pub struct PatternMatcher {
    regex: Option<Regex>,
}

impl PatternMatcher {
    pub fn new(roots: &[String], case: CaseSensitivity) -> Result<Self> {
        if roots.is_empty() {
            return Ok(Self { regex: None });
        }

        let alternatives: Vec<String> = roots
            .iter()
            .map(|root| Self::root_to_regex(root, case))
            .collect();
        let pattern = format!("^(?:{})", alternatives.join("|"));

        let regex = Regex::new(&pattern).map_err(|e| {
            PathfenceError::pattern_with_source(
                format!("Failed to compile exclusion pattern for {} roots", roots.len()),
                e,
            )
        })?;

        Ok(Self { regex: Some(regex) })
    }

    /// Convert a normalized root into a literal, boundary-aware regex fragment
    fn root_to_regex(root: &str, case: CaseSensitivity) -> String {
        let escaped = regex::escape(root);
        let literal = match case {
            CaseSensitivity::Sensitive => escaped,
            // explicit classes instead of the `i` flag, which would apply Unicode folding
            CaseSensitivity::Insensitive => {
                let mut folded = String::with_capacity(escaped.len() * 4);
                for c in escaped.chars() {
                    if c.is_ascii_alphabetic() {
                        folded.push('[');
                        folded.push(c.to_ascii_lowercase());
                        folded.push(c.to_ascii_uppercase());
                        folded.push(']');
                    } else {
                        folded.push(c);
                    }
                }
                folded
            }
        };

        if root.ends_with('/') {
            // filesystem root: already ends on a boundary
            literal
        } else {
            format!("{}(?:/|$)", literal)
        }
    }

    /// Source text of the compiled pattern, if any roots were given
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(|r| r.as_str())
    }
}

impl ExclusionMatcher for PatternMatcher {
    fn excludes(&self, path: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(path),
            None => false,
        }
    }

    fn description(&self) -> &'static str {
        "Pattern matcher (one anchored regex over escaped roots)"
    }
}

/// Boundary-aware string prefix comparison against each root
pub struct PrefixMatcher {
    roots: Vec<String>,
    case: CaseSensitivity,
}

impl PrefixMatcher {
    pub fn new(roots: &[String], case: CaseSensitivity) -> Self {
        Self {
            roots: roots.to_vec(),
            case,
        }
    }

    fn is_under(&self, path: &str, root: &str) -> bool {
        let (path, root) = (path.as_bytes(), root.as_bytes());
        if path.len() < root.len() {
            return false;
        }

        // byte comparison: non-ASCII bytes never fold, so no char boundary concerns
        let (head, rest) = path.split_at(root.len());
        let same = match self.case {
            CaseSensitivity::Sensitive => head == root,
            CaseSensitivity::Insensitive => head.eq_ignore_ascii_case(root),
        };

        same && (rest.is_empty() || root.ends_with(b"/") || rest[0] == b'/')
    }
}

impl ExclusionMatcher for PrefixMatcher {
    fn excludes(&self, path: &str) -> bool {
        self.roots.iter().any(|root| self.is_under(path, root))
    }

    fn description(&self) -> &'static str {
        "Prefix matcher (separator-bounded prefix test per root)"
    }
}
