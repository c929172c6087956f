//! Runtime configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `GATES_SEED` | wall clock | Spawn RNG seed (u32); set it to replay a game |
//! | `GATES_LOG_PATH` | unset | Log file; no logging when unset |
//! | `GATES_TOAST_MS` | 1500 | How long notifications stay on screen |

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use crate::term::DEFAULT_TOAST_TTL_MS;

pub const SEED_VAR: &str = "GATES_SEED";
pub const LOG_PATH_VAR: &str = "GATES_LOG_PATH";
pub const TOAST_MS_VAR: &str = "GATES_TOAST_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub log_path: Option<PathBuf>,
    pub toast_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            log_path: None,
            toast_ms: DEFAULT_TOAST_TTL_MS,
        }
    }
}

impl AppConfig {
    /// Read the process environment, seeding from the clock when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), clock_seed())
    }

    /// Build from any variable source.
    ///
    /// A malformed seed is an error; a malformed toast duration falls back
    /// to the default.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        default_seed: u32,
    ) -> Result<Self> {
        let seed = match non_empty(lookup(SEED_VAR)) {
            Some(s) => s
                .parse::<u32>()
                .with_context(|| format!("{SEED_VAR} must be an unsigned 32-bit integer, got {s:?}"))?,
            None => default_seed,
        };

        let log_path = non_empty(lookup(LOG_PATH_VAR)).map(PathBuf::from);

        let toast_ms = non_empty(lookup(TOAST_MS_VAR))
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOAST_TTL_MS);

        Ok(Self {
            seed,
            log_path,
            toast_ms,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
