pub mod classify;

pub use classify::{Classification, FilterService, OutputMode};
