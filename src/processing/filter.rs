//! Module resolution filter.
//!
//! A [`PathExclusionFilter`] is built once from a set of directory roots and then answers a
//! single question for any candidate path: does it equal one of the roots, or lie beneath one
//! of them on a separator boundary? The filter holds no mutable state, so it can be shared
//! behind an `Arc` by any number of resolver threads.

use crate::core::{Config, Result};
use crate::processing::matcher::{CaseSensitivity, ExclusionMatcher, PatternMatcher, PrefixMatcher};
use crate::processing::normalize::{SeparatorMode, normalize_root};
use log::debug;

/// Which compiled matcher backs the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatcherStrategy {
    /// One anchored regex over all roots
    #[default]
    Pattern,
    /// Separator-bounded prefix test per root
    Prefix,
}

/// Options that shape how roots and candidates are compared
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    pub case: CaseSensitivity,
    pub separators: SeparatorMode,
    pub strategy: MatcherStrategy,
}

/// Ordered, de-duplicated set of normalized absolute directory roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedDirectorySet {
    roots: Vec<String>,
}

impl ExcludedDirectorySet {
    /// Normalize every entry against `base`, failing on the first entry that cannot be made
    /// absolute. Duplicates keep their first position.
    pub fn from_entries<S: AsRef<str>>(
        base: &str,
        entries: &[S],
        separators: SeparatorMode,
    ) -> Result<Self> {
        let mut roots: Vec<String> = Vec::with_capacity(entries.len());

        for entry in entries {
            let root = normalize_root(entry.as_ref(), base, separators)?;
            if !roots.contains(&root) {
                roots.push(root);
            }
        }

        Ok(Self { roots })
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Decides whether a candidate path is excluded from module resolution
pub struct PathExclusionFilter {
    directories: ExcludedDirectorySet,
    separators: SeparatorMode,
    matcher: Box<dyn ExclusionMatcher>,
    pattern: Option<String>,
}

impl PathExclusionFilter {
    /// Build a filter from raw directory entries, resolving relative ones against `base`
    pub fn new<S: AsRef<str>>(base: &str, entries: &[S], options: FilterOptions) -> Result<Self> {
        let directories = ExcludedDirectorySet::from_entries(base, entries, options.separators)?;
        Self::from_directories(directories, options)
    }

    /// Compile the matcher for an already normalized directory set
    pub fn from_directories(
        directories: ExcludedDirectorySet,
        options: FilterOptions,
    ) -> Result<Self> {
        let (matcher, pattern): (Box<dyn ExclusionMatcher>, Option<String>) = match options.strategy
        {
            MatcherStrategy::Pattern => {
                let matcher = PatternMatcher::new(directories.roots(), options.case)?;
                let pattern = matcher.pattern().map(str::to_string);
                (Box::new(matcher), pattern)
            }
            MatcherStrategy::Prefix => (
                Box::new(PrefixMatcher::new(directories.roots(), options.case)),
                None,
            ),
        };

        debug!(
            "Compiled {} exclusion roots with {}",
            directories.len(),
            matcher.description()
        );

        Ok(Self {
            directories,
            separators: options.separators,
            matcher,
            pattern,
        })
    }

    /// Build a filter from the project root and directory list in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let root = config.project_root.to_string_lossy();
        Self::new(&root, config.excluded_directories.as_slice(), config.filter_options())
    }

    /// True iff `path` equals an excluded root or is a descendant of one
    pub fn excludes(&self, path: &str) -> bool {
        let candidate = self.separators.prepare_candidate(path);
        self.matcher.excludes(&candidate)
    }

    pub fn separator_mode(&self) -> SeparatorMode {
        self.separators
    }

    pub fn directories(&self) -> &ExcludedDirectorySet {
        &self.directories
    }

    /// Compiled regex source when the pattern strategy is in use
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn matcher_info(&self) -> &'static str {
        self.matcher.description()
    }
}
