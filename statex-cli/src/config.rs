use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use statex_ingest::Profile;
use statex_ingest::profile::COUNTRY_COLUMN;
use statex_report::DEFAULT_TOP_N;
use std::fs;
use std::path::PathBuf;

use crate::state::{ensure_statex_home, statex_home};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Profile used when `--profile` is not given
    #[serde(default = "default_profile")]
    pub default_profile: String,
    /// Rows per ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Executable used for layout-preserving extraction
    #[serde(default = "default_pdftotext")]
    pub pdftotext_command: String,
    /// Extra statement formats; a name matching a built-in profile replaces it
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

fn default_profile() -> String {
    COUNTRY_COLUMN.to_string()
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_pdftotext() -> String {
    "pdftotext".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: default_profile(),
            top_n: default_top_n(),
            pdftotext_command: default_pdftotext(),
            profiles: Vec::new(),
        }
    }
}

impl Config {
    /// Resolve a profile name against configured and built-in profiles
    pub fn profile(&self, name: Option<&str>) -> Option<Profile> {
        Profile::find(name.unwrap_or(self.default_profile.as_str()), &self.profiles)
    }

    /// Built-in profiles not shadowed by configured ones, then configured ones
    pub fn all_profiles(&self) -> Vec<Profile> {
        let mut out: Vec<Profile> = Profile::builtin()
            .into_iter()
            .filter(|b| !self.profiles.iter().any(|p| p.name == b.name))
            .collect();
        out.extend(self.profiles.iter().cloned());
        out
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(statex_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        log::debug!("no config at {}, using defaults", p.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_statex_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
