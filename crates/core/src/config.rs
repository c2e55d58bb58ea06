//! Engine configuration
//!
//! Defaults match the constants in [`crate::types`]. A host can override them from a TOML
//! file and from `BLOCKFALL_*` environment variables:
//!
//! - `BLOCKFALL_BASE_FALL_MS`: solo fall interval at level 1
//! - `BLOCKFALL_FALL_STEP_MS`: interval reduction per level
//! - `BLOCKFALL_MIN_FALL_MS`: fastest solo fall interval
//! - `BLOCKFALL_LINES_PER_LEVEL`: lines per solo level
//! - `BLOCKFALL_DUO_SECONDS`: duo countdown length
//! - `BLOCKFALL_DUO_FALL_MS`: duo fall interval
//!
//! Unparsable environment values are ignored.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{
    GameMode, BASE_FALL_MS, DUO_FALL_MS, DUO_TIME_LIMIT_SECS, FALL_STEP_MS, LINES_PER_LEVEL,
    MIN_FALL_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub base_fall_interval_ms: u32,
    pub fall_interval_step_ms: u32,
    pub min_fall_interval_ms: u32,
    pub lines_per_level: u32,
    pub duo_time_limit_secs: u32,
    pub duo_fall_interval_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_fall_interval_ms: BASE_FALL_MS,
            fall_interval_step_ms: FALL_STEP_MS,
            min_fall_interval_ms: MIN_FALL_MS,
            lines_per_level: LINES_PER_LEVEL,
            duo_time_limit_secs: DUO_TIME_LIMIT_SECS,
            duo_fall_interval_ms: DUO_FALL_MS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("invalid engine config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Apply `BLOCKFALL_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment, CLI flags, tests).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u32>().ok());

        if let Some(v) = read("BLOCKFALL_BASE_FALL_MS") {
            self.base_fall_interval_ms = v;
        }
        if let Some(v) = read("BLOCKFALL_FALL_STEP_MS") {
            self.fall_interval_step_ms = v;
        }
        if let Some(v) = read("BLOCKFALL_MIN_FALL_MS") {
            self.min_fall_interval_ms = v;
        }
        if let Some(v) = read("BLOCKFALL_LINES_PER_LEVEL") {
            self.lines_per_level = v;
        }
        if let Some(v) = read("BLOCKFALL_DUO_SECONDS") {
            self.duo_time_limit_secs = v;
        }
        if let Some(v) = read("BLOCKFALL_DUO_FALL_MS") {
            self.duo_fall_interval_ms = v;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_fall_interval_ms == 0 {
            bail!("base_fall_interval_ms must be positive");
        }
        if self.min_fall_interval_ms == 0 {
            bail!("min_fall_interval_ms must be positive");
        }
        if self.min_fall_interval_ms > self.base_fall_interval_ms {
            bail!(
                "min_fall_interval_ms ({}) exceeds base_fall_interval_ms ({})",
                self.min_fall_interval_ms,
                self.base_fall_interval_ms
            );
        }
        if self.lines_per_level == 0 {
            bail!("lines_per_level must be positive");
        }
        if self.duo_time_limit_secs == 0 {
            bail!("duo_time_limit_secs must be positive");
        }
        if self.duo_fall_interval_ms == 0 {
            bail!("duo_fall_interval_ms must be positive");
        }
        Ok(())
    }

    /// Fall interval a fresh session of `mode` starts with.
    pub fn initial_fall_interval(&self, mode: GameMode) -> Duration {
        match mode {
            GameMode::Solo => Duration::from_millis(u64::from(self.base_fall_interval_ms)),
            GameMode::Duo => Duration::from_millis(u64::from(self.duo_fall_interval_ms)),
        }
    }
}
