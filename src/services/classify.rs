use crate::core::{Config, Result};
use crate::io::InputReader;
use crate::processing::{PathExclusionFilter, ScanStatus, TreeScanner};
use log::{info, warn};
use std::path::PathBuf;

/// Which side of the classification gets printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Print only the excluded paths
    #[default]
    Excluded,
    /// Print only the paths that survive the filter
    Kept,
    /// Print every path prefixed with its verdict
    All,
}

/// Candidate paths split by verdict, each side in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub kept: Vec<String>,
    pub excluded: Vec<String>,
}

impl Classification {
    pub fn total(&self) -> usize {
        self.kept.len() + self.excluded.len()
    }
}

/// Service that applies a compiled filter to candidate paths
pub struct FilterService {
    filter: PathExclusionFilter,
    reader: Box<dyn InputReader>,
    config: Config,
    output: OutputMode,
}

impl FilterService {
    /// Create a new filter service with the given components
    pub fn new(
        filter: PathExclusionFilter,
        reader: Box<dyn InputReader>,
        config: Config,
        output: OutputMode,
    ) -> Self {
        Self {
            filter,
            reader,
            config,
            output,
        }
    }

    /// Split candidates into kept and excluded, preserving order
    pub fn classify(&self, candidates: &[String]) -> Classification {
        let mut classification = Classification::default();

        for candidate in candidates {
            if self.filter.excludes(candidate) {
                classification.excluded.push(candidate.clone());
            } else {
                classification.kept.push(candidate.clone());
            }
        }

        classification
    }

    /// Lines to print for a classification under the configured output mode
    pub fn render(&self, classification: &Classification) -> Vec<String> {
        match self.output {
            OutputMode::Excluded => classification.excluded.clone(),
            OutputMode::Kept => classification.kept.clone(),
            OutputMode::All => {
                let mut lines = Vec::with_capacity(classification.total());
                lines.extend(classification.excluded.iter().map(|p| format!("excluded {}", p)));
                lines.extend(classification.kept.iter().map(|p| format!("kept     {}", p)));
                lines
            }
        }
    }

    /// Read candidates from the reader, classify and print them
    pub async fn run(&self) -> Result<Classification> {
        let candidates = self.reader.read_paths().await?;

        if candidates.is_empty() {
            warn!("No candidate paths provided. Nothing to classify.");
            return Ok(Classification::default());
        }

        info!(
            "Classifying {} candidate paths against {} roots",
            candidates.len(),
            self.filter.directories().len()
        );

        let classification = self.classify(&candidates);
        for line in self.render(&classification) {
            println!("{}", line);
        }

        if self.config.show_progress {
            eprintln!(
                "🚫 Excluded {} of {} paths ({} kept).",
                classification.excluded.len(),
                classification.total(),
                classification.kept.len()
            );
        }

        Ok(classification)
    }

    /// Walk the project root, pruning excluded directories, and print the result
    pub async fn scan(&self) -> Result<Classification> {
        let root = self.config.project_root.clone();
        info!("Scanning project tree at {}", root.display());

        let mut classification = Classification::default();
        let mut unreadable = 0;
        let scanner = TreeScanner::new(&self.filter);

        let kept: Vec<PathBuf> = scanner.scan(&root, |path, status| match status {
            ScanStatus::Kept => {}
            ScanStatus::Excluded => classification
                .excluded
                .push(path.to_string_lossy().to_string()),
            ScanStatus::Unreadable(reason) => {
                warn!("Skipping unreadable entry {}: {}", path.display(), reason);
                unreadable += 1;
            }
        })?;
        classification.kept = kept
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();

        for line in self.render(&classification) {
            println!("{}", line);
        }

        if self.config.show_progress {
            eprintln!(
                "📁 Found {} files, pruned {} excluded directories, {} unreadable.",
                classification.kept.len(),
                classification.excluded.len(),
                unreadable
            );
        }

        Ok(classification)
    }
}
