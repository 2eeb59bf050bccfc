use std::path::PathBuf;
use std::time::Duration;

use crate::audio::device::SelectionMode;
use crate::audio::queue::DropPolicy;
use crate::constants::*;

/// Runtime knobs. Built from defaults plus `MICSCOPE_*` environment
/// variables; nothing here is written back to the settings file.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings_path: PathBuf,
    pub block_size: usize,
    pub queue_capacity: usize,
    pub drop_policy: DropPolicy,
    pub selection_mode: SelectionMode,
    pub dequeue_timeout: Duration,
    pub idle_pause: Duration,
    pub fallback_sample_rate: u32,
    /// Problems found while reading the environment, logged once logging is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(SETTINGS_FILE),
            block_size: BLOCK_SIZE,
            queue_capacity: QUEUE_CAPACITY,
            drop_policy: DropPolicy::DropNewest,
            selection_mode: SelectionMode::Interactive,
            dequeue_timeout: Duration::from_millis(DEQUEUE_TIMEOUT_MS),
            idle_pause: Duration::from_millis(IDLE_PAUSE_MS),
            fallback_sample_rate: FALLBACK_SAMPLE_RATE,
            warnings: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("MICSCOPE_SETTINGS").filter(|p| !p.trim().is_empty()) {
            config.settings_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("MICSCOPE_BLOCK_SIZE") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.block_size = n,
                _ => config.warn("MICSCOPE_BLOCK_SIZE", &raw),
            }
        }
        if let Some(raw) = lookup("MICSCOPE_QUEUE_CAPACITY") {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.queue_capacity = n,
                _ => config.warn("MICSCOPE_QUEUE_CAPACITY", &raw),
            }
        }
        if let Some(raw) = lookup("MICSCOPE_DROP_POLICY") {
            match DropPolicy::parse(&raw) {
                Some(policy) => config.drop_policy = policy,
                None => config.warn("MICSCOPE_DROP_POLICY", &raw),
            }
        }
        if let Some(raw) = lookup("MICSCOPE_NONINTERACTIVE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.selection_mode = SelectionMode::FailFast,
                "0" | "false" | "no" | "" => {}
                _ => config.warn("MICSCOPE_NONINTERACTIVE", &raw),
            }
        }

        config
    }

    /// Log file lives beside the settings file.
    pub fn log_path(&self) -> PathBuf {
        self.settings_path.with_file_name(LOG_FILE)
    }

    fn warn(&mut self, key: &str, value: &str) {
        self.warnings
            .push(format!("Ignoring {}={:?}: not a valid value", key, value));
    }
}
