//! Utility module
//!
//! Common utilities used across the application.

pub mod download;

use std::path::{Path, PathBuf};

/// Turn a display name into something usable as a file stem
pub fn file_stem_for(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem == "." || stem == ".." {
        "cover".to_string()
    } else {
        stem
    }
}

/// Absolute form of `path`, resolving symlinks when the file exists
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(p) => Ok(p),
        Err(_) => std::path::absolute(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_for() {
        assert_eq!(file_stem_for("Chess"), "Chess");
        assert_eq!(file_stem_for("Half-Life: Source"), "Half-Life_ Source");
        assert_eq!(file_stem_for("a/b\\c"), "a_b_c");
        assert_eq!(file_stem_for("  "), "cover");
    }
}
