use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$STATEX_HOME`, falling back to `~/.statex`
pub fn statex_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STATEX_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".statex"))
}

pub fn ensure_statex_home() -> Result<PathBuf> {
    let dir = statex_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
