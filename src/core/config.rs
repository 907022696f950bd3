use crate::core::{PathfenceError, Result};
use crate::processing::normalize::resolve_dir;
use crate::processing::{CaseSensitivity, FilterOptions, MatcherStrategy, SeparatorMode};
use std::env;
use std::path::PathBuf;

/// Native project folders a JavaScript bundler should never resolve modules from
pub const NATIVE_PROJECT_DIRECTORIES: [&str; 4] =
    ["android", "ios", "example/android", "example/ios"];

/// Configuration for the resolution filter
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute, lexically clean base directory that relative exclusion entries are joined onto
    pub project_root: PathBuf,
    /// Directories excluded from resolution, relative to `project_root` or absolute
    pub excluded_directories: Vec<String>,
    pub case_sensitivity: CaseSensitivity,
    pub separator_mode: SeparatorMode,
    pub strategy: MatcherStrategy,
    /// Whether to print a summary after classifying
    pub show_progress: bool,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            case: self.case_sensitivity,
            separators: self.separator_mode,
            strategy: self.strategy,
        }
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    project_root: Option<String>,
    excluded_directories: Vec<String>,
    case_sensitivity: CaseSensitivity,
    separator_mode: SeparatorMode,
    strategy: MatcherStrategy,
    show_progress: bool,
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl ConfigBuilder {
    pub fn project_root(mut self, path: Option<&str>, try_env: bool) -> Self {
        if let Some(p) = path {
            if !p.trim().is_empty() {
                self.project_root = Some(p.to_string());
                return self;
            }
        }
        if try_env {
            if let Ok(env_path) = env::var("PATHFENCE_ROOT") {
                self.project_root = Some(env_path.trim().to_string());
            }
        }
        self
    }

    /// Append directories; with `try_env`, `PATHFENCE_EXCLUDE` is used when none are given
    pub fn excluded_directories(mut self, dirs: &[String], try_env: bool) -> Self {
        if !dirs.is_empty() {
            self.excluded_directories.extend(dirs.iter().cloned());
            return self;
        }
        if try_env {
            if let Ok(list) = env::var("PATHFENCE_EXCLUDE") {
                self.excluded_directories.extend(
                    list.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                );
            }
        }
        self
    }

    /// Append the native android/ios project folders
    pub fn with_native_defaults(mut self) -> Self {
        self.excluded_directories
            .extend(NATIVE_PROJECT_DIRECTORIES.iter().map(|d| d.to_string()));
        self
    }

    pub fn ignore_case(mut self, ignore: bool, try_env: bool) -> Self {
        let ignore = ignore || (try_env && env_flag("PATHFENCE_IGNORE_CASE"));
        self.case_sensitivity = if ignore {
            CaseSensitivity::Insensitive
        } else {
            CaseSensitivity::Sensitive
        };
        self
    }

    pub fn separator_mode(mut self, mode: SeparatorMode) -> Self {
        self.separator_mode = mode;
        self
    }

    pub fn strategy(mut self, strategy: MatcherStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Resolve the project root against the current directory; a blank root is an error
    pub fn build(self) -> Result<Config> {
        let root = match self.project_root {
            Some(root) if root.trim().is_empty() => {
                return Err(PathfenceError::config("Project root cannot be empty"));
            }
            Some(root) => PathBuf::from(root.trim()),
            None => PathBuf::from("."),
        };
        let project_root = resolve_dir(&root, self.separator_mode)?;

        Ok(Config {
            project_root,
            excluded_directories: self.excluded_directories,
            case_sensitivity: self.case_sensitivity,
            separator_mode: self.separator_mode,
            strategy: self.strategy,
            show_progress: self.show_progress,
        })
    }
}
