//! Syntax-level parsing interface.
//!
//! Reads a source file from disk and runs it through [`SyntaxFile`].

use std::path::Path;

use crate::parser::ParseMode;
use crate::syntax::file::SyntaxFile;

/// Error loading a source file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension for {path}, expected .{expected}")]
    UnsupportedExtension { path: String, expected: String },
}

/// Get file extension from path
pub fn get_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

/// Whether `path` carries the source extension `ext` (no dot)
pub fn has_extension(path: &Path, ext: &str) -> bool {
    get_extension(path) == Some(ext)
}

/// Load file contents
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load the contents of a source file with extension `ext`
pub fn load_source(path: &Path, ext: &str) -> Result<String, LoadError> {
    if !has_extension(path, ext) {
        return Err(LoadError::UnsupportedExtension {
            path: path.display().to_string(),
            expected: ext.to_string(),
        });
    }
    load_file(path)
}

/// Loads and parses a source file with extension `ext`.
///
/// # Errors
///
/// Returns an error if the file has another extension or cannot be read.
/// Syntax errors are never fatal here; they are recorded in the result.
pub fn load_and_parse(path: &Path, ext: &str, mode: ParseMode) -> Result<SyntaxFile, LoadError> {
    let content = load_source(path, ext)?;
    Ok(SyntaxFile::new(&content, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_and_parse_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queues.mod");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "MODULE Queues;\nEND MODULE.").unwrap();

        let parsed = load_and_parse(&path, "mod", ParseMode::Recovery).unwrap();
        assert_eq!(parsed.module_name(), Some("Queues"));
    }

    #[test]
    fn test_wrong_extension_is_rejected() {
        let err = load_and_parse(Path::new("notes.txt"), "mod", ParseMode::Recovery).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_and_parse(Path::new("/nonexistent/a.mod"), "mod", ParseMode::Strict)
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("a.mod"));
    }
}
