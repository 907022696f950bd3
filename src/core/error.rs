use std::fmt;

/// Structured error types for pathfence
#[derive(Debug)]
pub enum PathfenceError {
    /// Configuration related errors
    Config {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// Input/Output related errors (reading candidate lists, walking trees)
    Io {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// An excluded directory entry that cannot be normalized to an absolute path
    InvalidPath {
        message: String,
        path: Option<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// The compiled exclusion pattern was rejected by the regex engine
    Pattern {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for PathfenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathfenceError::Config { message, .. } => {
                write!(f, "Configuration error: {}", message)
            }
            PathfenceError::Io { message, .. } => {
                write!(f, "I/O error: {}", message)
            }
            PathfenceError::InvalidPath { message, path, .. } => {
                if let Some(path) = path {
                    write!(f, "Invalid path '{}': {}", path.escape_debug(), message)
                } else {
                    write!(f, "Invalid path: {}", message)
                }
            }
            PathfenceError::Pattern { message, .. } => {
                write!(f, "Pattern error: {}", message)
            }
        }
    }
}

impl std::error::Error for PathfenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathfenceError::Config { source, .. }
            | PathfenceError::Io { source, .. }
            | PathfenceError::InvalidPath { source, .. }
            | PathfenceError::Pattern { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
        }
    }
}

impl PathfenceError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path<S: Into<String>, P: Into<String>>(message: S, path: Option<P>) -> Self {
        Self::InvalidPath {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Create an invalid path error with source
    pub fn invalid_path_with_source<
        S: Into<String>,
        P: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        path: Option<P>,
        source: E,
    ) -> Self {
        Self::InvalidPath {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Create a pattern error with source
    pub fn pattern_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Pattern {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}

/// Custom Result type for pathfence
pub type Result<T> = std::result::Result<T, PathfenceError>;

/// Extension trait to add context to errors
pub trait ErrorContext<T> {
    fn context_io<S: Into<String>>(self, message: S) -> Result<T>;
    fn context_path<S: Into<String>, P: Into<String>>(self, message: S, path: P) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context_io<S: Into<String>>(self, message: S) -> Result<T> {
        self.map_err(|e| PathfenceError::io_with_source(message, e))
    }

    fn context_path<S: Into<String>, P: Into<String>>(self, message: S, path: P) -> Result<T> {
        self.map_err(|e| PathfenceError::invalid_path_with_source(message, Some(path), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_path_display() {
        let err = PathfenceError::invalid_path("entry is empty", Some(""));
        assert_eq!(err.to_string(), "Invalid path '': entry is empty");
        assert!(err.is_invalid_path());

        let err = PathfenceError::invalid_path("no base", None::<String>);
        assert_eq!(err.to_string(), "Invalid path: no base");
    }

    #[test]
    fn test_invalid_path_escapes_nul() {
        let err = PathfenceError::invalid_path("contains a NUL byte", Some("a\0b"));
        assert_eq!(err.to_string(), "Invalid path 'a\\0b': contains a NUL byte");
    }

    #[test]
    fn test_context_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let result: std::result::Result<(), _> = Err(io_err);
        let err = result.context_io("Failed to read list").unwrap_err();

        assert_eq!(err.to_string(), "I/O error: Failed to read list");
        assert_eq!(err.source().unwrap().to_string(), "missing");
    }
}
