//! Module resolution filter: compile a set of excluded directory roots once, then ask
//! whether any candidate path lies under one of them.

pub mod core;
pub mod io;
pub mod processing;
pub mod services;

pub use crate::core::{Config, PathfenceError, Result};
pub use crate::processing::{ExcludedDirectorySet, FilterOptions, PathExclusionFilter};
