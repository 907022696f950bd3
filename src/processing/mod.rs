pub mod filter;
pub mod matcher;
pub mod normalize;
pub mod scan;

pub use filter::{ExcludedDirectorySet, FilterOptions, MatcherStrategy, PathExclusionFilter};
pub use matcher::{CaseSensitivity, ExclusionMatcher};
pub use normalize::{SeparatorMode, resolve_dir};
pub use scan::{ScanStatus, TreeScanner};
