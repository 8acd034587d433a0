//! `.env` file loading
//!
//! Values already present in the process environment are never replaced.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load `.env` from the working directory or one of its parents, if any
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load an explicitly named env file; it must exist
pub fn load_dotenv_from(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("Failed to read env file {}", path.display()))
}
