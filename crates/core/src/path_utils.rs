//! Path utilities for the fortune plugin
//!
//! Handles tilde expansion and resolution of the app root.

use std::path::PathBuf;

/// Expands a leading tilde (~) to the user's home directory.
/// Examples:
/// "~/.fortune" -> "/home/alice/.fortune"
/// "/tmp/foo" -> "/tmp/foo" (no change)
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        return std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    }

    if path.starts_with("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        return path.replacen('~', &home, 1);
    }

    path.to_string()
}

/// Helper to convert a potentially tilde-containing string into a PathBuf.
pub fn get_path(path: &str) -> PathBuf {
    PathBuf::from(expand_tilde(path))
}

/// Resolves the app root from FORTUNE_ROOT.
/// Handles absolute paths, tilde expansion, and names relative to $HOME.
pub fn get_app_root() -> PathBuf {
    let root_name = std::env::var("FORTUNE_ROOT").unwrap_or_else(|_| ".fortune".to_string());

    if root_name.starts_with('/') {
        PathBuf::from(root_name)
    } else if root_name.starts_with('~') {
        get_path(&root_name)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(root_name)
    }
}

/// Default resource root: `<app root>/resource`.
pub fn default_resource_dir() -> PathBuf {
    get_app_root().join("resource")
}
