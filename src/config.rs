//! Runtime configuration read from environment variables at startup.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const DEFAULT_LOG_FILE: &str = "blockfall.log";
pub const DEFAULT_FRAME_MS: u64 = 16;
pub const MIN_FRAME_MS: u64 = 1;
pub const MAX_FRAME_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for the random piece source.
    pub seed: u32,
    /// Log file for the terminal binary; `None` disables logging.
    pub log_file: Option<PathBuf>,
    /// Presentation loop frame period.
    pub frame: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            frame: Duration::from_millis(DEFAULT_FRAME_MS),
        }
    }
}

impl RunConfig {
    /// Create from `BLOCKFALL_SEED`, `BLOCKFALL_LOG_FILE` and `BLOCKFALL_FRAME_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let log_file = match lookup("BLOCKFALL_LOG_FILE") {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(PathBuf::from(s.trim())),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };

        let frame_ms = lookup("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_FRAME_MS)
            .clamp(MIN_FRAME_MS, MAX_FRAME_MS);

        Self {
            seed,
            log_file,
            frame: Duration::from_millis(frame_ms),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
