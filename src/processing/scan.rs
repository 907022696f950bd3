use crate::core::Result;
use crate::processing::PathExclusionFilter;
use crate::processing::normalize::resolve_dir;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Status of a walked path for callback reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    /// File survives the filter and would be handed to the resolver
    Kept,
    /// File or directory lies under an excluded root; directories are not descended
    Excluded,
    /// Entry could not be read
    Unreadable(String),
}

/// Walks a project tree the way a module resolver would, pruning excluded directories
pub struct TreeScanner<'a> {
    filter: &'a PathExclusionFilter,
}

impl<'a> TreeScanner<'a> {
    pub fn new(filter: &'a PathExclusionFilter) -> Self {
        Self { filter }
    }

    /// Walk `root` and return the kept files in walk order.
    ///
    /// The root is resolved and cleaned like the filter's own roots. Every entry is reported
    /// to `on_path` as it is walked; excluded directories are reported once and not descended.
    pub fn scan<F>(&self, root: &Path, mut on_path: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path, ScanStatus),
    {
        let root = resolve_dir(root, self.filter.separator_mode())?;
        debug!("Scanning {}", root.display());

        let mut kept = Vec::new();
        let mut walker = WalkDir::new(&root).sort_by_file_name().into_iter();

        // skip_current_dir needs the iterator, so no `for` loop here
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                    on_path(&path, ScanStatus::Unreadable(e.to_string()));
                    continue;
                }
            };

            if self.filter.excludes(&entry.path().to_string_lossy()) {
                on_path(entry.path(), ScanStatus::Excluded);
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            if entry.file_type().is_dir() {
                continue;
            }

            on_path(entry.path(), ScanStatus::Kept);
            kept.push(entry.into_path());
        }

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::FilterOptions;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        for dir in ["android/app", "ios/Pods", "example/ios", "example/src", "src"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        for file in [
            "android/app/build.gradle",
            "ios/Pods/Manifest.lock",
            "example/ios/Podfile",
            "example/src/App.js",
            "src/index.js",
            "package.json",
        ] {
            fs::write(root.join(file), "content").unwrap();
        }

        temp_dir
    }

    #[test]
    fn test_scan_prunes_excluded_directories() {
        let temp_dir = project();
        let base = temp_dir.path().to_string_lossy().to_string();
        let filter = PathExclusionFilter::new(
            &base,
            &["android", "ios", "example/android", "example/ios"],
            FilterOptions::default(),
        )
        .unwrap();

        let mut statuses = Vec::new();
        let kept = TreeScanner::new(&filter)
            .scan(temp_dir.path(), |path, status| {
                statuses.push((path.to_path_buf(), status));
            })
            .unwrap();

        let relative: Vec<_> = kept
            .iter()
            .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("example/src/App.js"),
                PathBuf::from("package.json"),
                PathBuf::from("src/index.js"),
            ]
        );

        // Pruned directories are reported once and their contents never visited
        let excluded: Vec<_> = statuses
            .iter()
            .filter(|(_, s)| *s == ScanStatus::Excluded)
            .map(|(p, _)| p.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            excluded,
            vec![
                PathBuf::from("android"),
                PathBuf::from("example/ios"),
                PathBuf::from("ios"),
            ]
        );
    }

    #[test]
    fn test_scan_reports_in_walk_order() {
        let temp_dir = project();
        let base = temp_dir.path().to_string_lossy().to_string();
        let filter =
            PathExclusionFilter::new(&base, &["android", "ios"], FilterOptions::default()).unwrap();

        let mut statuses = Vec::new();
        TreeScanner::new(&filter)
            .scan(temp_dir.path(), |path, status| {
                let relative = path.strip_prefix(temp_dir.path()).unwrap().to_path_buf();
                statuses.push((relative, status));
            })
            .unwrap();

        assert_eq!(
            statuses,
            vec![
                (PathBuf::from("android"), ScanStatus::Excluded),
                (PathBuf::from("example/ios/Podfile"), ScanStatus::Kept),
                (PathBuf::from("example/src/App.js"), ScanStatus::Kept),
                (PathBuf::from("ios"), ScanStatus::Excluded),
                (PathBuf::from("package.json"), ScanStatus::Kept),
                (PathBuf::from("src/index.js"), ScanStatus::Kept),
            ]
        );
    }

    #[test]
    fn test_scan_root_with_parent_segments_still_prunes() {
        let temp_dir = project();
        fs::create_dir(temp_dir.path().join("q")).unwrap();
        let unclean = temp_dir.path().join("q").join("..");
        let filter = PathExclusionFilter::new(
            &unclean.to_string_lossy(),
            &["android", "ios", "example/ios"],
            FilterOptions::default(),
        )
        .unwrap();

        let mut excluded = Vec::new();
        let kept = TreeScanner::new(&filter)
            .scan(&unclean, |path, status| {
                if status == ScanStatus::Excluded {
                    excluded.push(path.to_path_buf());
                }
            })
            .unwrap();

        assert_eq!(excluded.len(), 3);
        assert!(excluded.iter().all(|p| !p.to_string_lossy().contains("..")));
        assert!(!kept.iter().any(|p| p.ends_with("android/app/build.gradle")));
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_scan_with_empty_filter_keeps_everything() {
        let temp_dir = project();
        let filter =
            PathExclusionFilter::new("/", &[] as &[&str], FilterOptions::default()).unwrap();

        let kept = TreeScanner::new(&filter)
            .scan(temp_dir.path(), |_, _| {})
            .unwrap();

        assert_eq!(kept.len(), 6);
    }
}
