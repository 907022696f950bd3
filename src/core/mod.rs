pub mod config;
pub mod error;

pub use config::{Config, NATIVE_PROJECT_DIRECTORIES};
pub use error::{ErrorContext, PathfenceError, Result};
