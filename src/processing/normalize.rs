use crate::core::{ErrorContext, PathfenceError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// How path separators are treated in roots and candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeparatorMode {
    /// Only `/` separates segments; `\` is an ordinary character
    #[default]
    Posix,
    /// `\` is rewritten to `/` and `X:/` drive prefixes count as absolute
    Mixed,
}

impl SeparatorMode {
    /// Rewrite a candidate path into the form roots are stored in.
    ///
    /// Candidates are never lexically cleaned: `a/../b` stays as written, so only
    /// separators change.
    pub fn prepare_candidate<'a>(&self, path: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            SeparatorMode::Mixed if path.contains('\\') => path.replace('\\', "/").into(),
            _ => path.into(),
        }
    }
}

/// Length of the absolute prefix (`/` or `X:/`), or `None` for a relative path
fn root_prefix_len(path: &str, separators: SeparatorMode) -> Option<usize> {
    if path.starts_with('/') {
        return Some(1);
    }

    if separators == SeparatorMode::Mixed {
        let bytes = path.as_bytes();
        if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
        {
            return Some(3);
        }
    }

    None
}

/// Lexically clean an absolute path: collapse repeated separators, drop `.` and resolve `..`
fn clean(prefix: &str, rest: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            // `..` at the root stays at the root
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut cleaned = String::with_capacity(prefix.len() + rest.len());
    cleaned.push_str(prefix);
    cleaned.push_str(&segments.join("/"));
    cleaned
}

/// Normalize an excluded directory entry to an absolute, platform-independent string.
///
/// Relative entries are joined onto `base`, which must itself be absolute. The result has no
/// trailing separator unless it is the bare filesystem root.
pub fn normalize_root(entry: &str, base: &str, separators: SeparatorMode) -> Result<String> {
    if entry.trim().is_empty() {
        return Err(PathfenceError::invalid_path(
            "directory entry is empty",
            Some(entry),
        ));
    }
    if entry.contains('\0') {
        return Err(PathfenceError::invalid_path(
            "directory entry contains a NUL byte",
            Some(entry),
        ));
    }

    let entry = separators.prepare_candidate(entry);

    if let Some(len) = root_prefix_len(&entry, separators) {
        return Ok(clean(&entry[..len], &entry[len..]));
    }

    if base.contains('\0') {
        return Err(PathfenceError::invalid_path(
            "base directory contains a NUL byte",
            Some(base),
        ));
    }

    let base = separators.prepare_candidate(base);
    let Some(len) = root_prefix_len(&base, separators) else {
        return Err(PathfenceError::invalid_path(
            format!("relative entry needs an absolute base directory, got '{}'", base),
            Some(entry.into_owned()),
        ));
    };

    let joined = format!("{}/{}", &base[len..], entry);
    Ok(clean(&base[..len], &joined))
}

/// Resolve a directory against the current directory and clean it the same way roots are.
///
/// Walks and filters built from the result see identical path text, so `x/../` or a
/// relative project root never defeats matching.
pub fn resolve_dir(path: &Path, separators: SeparatorMode) -> Result<PathBuf> {
    let entry = path.to_string_lossy();

    let base = if root_prefix_len(&separators.prepare_candidate(&entry), separators).is_some() {
        String::new()
    } else {
        env::current_dir()
            .context_path("Failed to read the current directory", entry.to_string())?
            .to_string_lossy()
            .into_owned()
    };

    normalize_root(&entry, &base, separators).map(PathBuf::from)
}
