//! Pluggable file lookup for the `load` directive.
//!
//! The lexer itself never touches the filesystem directly; it asks a
//! [`SourceResolver`] for the text behind a `load "path";` directive. Tests
//! substitute an in-memory resolver so `load` behavior can be exercised
//! without a temp directory on disk.

use crate::error::LexError;

pub trait SourceResolver {
    /// Resolves `path` (as written in the `load` directive) to a canonical
    /// key used for cycle detection, and the file's contents.
    ///
    /// `path` is resolved relative to the current working directory, matching
    /// the way the top-level source file itself is located.
    fn resolve(&self, path: &str) -> Result<(String, String), LexError>;
}

/// Reads files from the real filesystem, relative to the process's current
/// working directory.
pub struct FsResolver;

impl SourceResolver for FsResolver {
    fn resolve(&self, path: &str) -> Result<(String, String), LexError> {
        let full = std::env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| std::path::PathBuf::from(path));

        let contents = std::fs::read_to_string(&full).map_err(|_| LexError::LoadFileNotFound {
            path: path.to_string(),
        })?;

        let canonical = std::fs::canonicalize(&full)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| full.to_string_lossy().into_owned());

        Ok((canonical, contents))
    }
}
