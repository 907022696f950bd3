use crate::core::{ErrorContext, PathfenceError, Result};
use async_trait::async_trait;
use std::io::{self, BufRead};

/// Trait for reading path lists (candidates or excluded directories)
#[async_trait]
pub trait InputReader: Send + Sync {
    /// Read paths from the input source
    async fn read_paths(&self) -> Result<Vec<String>>;
}

/// Trim lines, drop blank ones and refuse embedded NUL bytes
fn collect_lines<I>(lines: I, source: &str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = String>,
{
    let mut paths = Vec::new();

    for (number, line) in lines.into_iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.contains('\0') {
            return Err(PathfenceError::invalid_path(
                format!("line {} of {} contains a NUL byte", number + 1, source),
                Some(trimmed),
            ));
        }
        paths.push(trimmed.to_string());
    }

    Ok(paths)
}

/// Reader that reads from standard input
pub struct StdinReader;

impl StdinReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InputReader for StdinReader {
    async fn read_paths(&self) -> Result<Vec<String>> {
        let lines = tokio::task::spawn_blocking(|| {
            io::stdin()
                .lock()
                .lines()
                .collect::<std::result::Result<Vec<String>, io::Error>>()
        })
        .await
        .context_io("Stdin reader task failed")?
        .context_io("Failed to read line from stdin")?;

        collect_lines(lines, "stdin")
    }
}

/// Reader that reads from a file
pub struct FileReader {
    file_path: String,
}

impl FileReader {
    pub fn new(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
        }
    }
}

#[async_trait]
impl InputReader for FileReader {
    async fn read_paths(&self) -> Result<Vec<String>> {
        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .context_io(format!("Failed to read file: {}", self.file_path))?;

        collect_lines(content.lines().map(str::to_string), &self.file_path)
    }
}

/// Reader that takes paths from a vector (useful for testing)
pub struct VecReader {
    paths: Vec<String>,
}

impl VecReader {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl InputReader for VecReader {
    async fn read_paths(&self) -> Result<Vec<String>> {
        collect_lines(self.paths.iter().cloned(), "vector input")
    }
}
