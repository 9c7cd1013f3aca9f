//! Unified path management for jobscope client files.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for the jobscope client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/jobscope/          # Config directory
/// └── session.toml             # Durable session snapshot
/// ```
pub struct JobscopePaths;

impl JobscopePaths {
    /// Returns the jobscope configuration directory
    /// (e.g. `~/.config/jobscope/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("jobscope"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the durable session snapshot.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
