// pn532-tap/src/config.rs

//! Environment driven configuration. Everything is read once at start-up;
//! an invalid value is fatal.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

pub const ENV_PORT: &str = "NFC_PORT";
pub const ENV_BAUD_RATE: &str = "NFC_BAUD_RATE";
pub const ENV_TAP_DEBOUNCE_MS: &str = "NFC_TAP_DEBOUNCE_MS";
pub const ENV_DEDUP_BUFFER_SIZE: &str = "NFC_DEDUP_BUFFER_SIZE";
pub const ENV_HEARTBEAT_INTERVAL_S: &str = "NFC_HEARTBEAT_INTERVAL_S";
pub const ENV_MAX_RETRIES: &str = "NFC_MAX_RETRIES";
pub const ENV_EMULATE_TEXT: &str = "NFC_EMULATE_TEXT";
pub const ENV_APDU_CHUNK_SIZE: &str = "NFC_APDU_CHUNK_SIZE";

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
pub const DEFAULT_DEDUP_CAPACITY: usize = 10;
pub const DEFAULT_HEARTBEAT_INTERVAL_S: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_CHUNK_SIZE: usize = 50;
/// TgSetData carries at most 250 response bytes plus the status word
pub const MAX_CHUNK_SIZE: usize = 250;

/// What the supervisor does once the link is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Poll for ISO14443A tags and report taps
    Reader,
    /// Present the chip as a Type 4 tag carrying `text`
    Emulation { text: String, chunk_size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: String,
    pub baud_rate: u32,
    pub debounce: Duration,
    pub dedup_capacity: usize,
    pub heartbeat_interval: Duration,
    pub max_retries: u32,
    pub mode: Mode,
}

impl Config {
    /// Defaults for everything but the port.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            dedup_capacity: DEFAULT_DEDUP_CAPACITY,
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_INTERVAL_S),
            max_retries: DEFAULT_MAX_RETRIES,
            mode: Mode::Reader,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get(ENV_PORT)
            .ok_or_else(|| Error::Config(format!("{} environment variable is required", ENV_PORT)))?;
        let mut config = Self::new(port);

        config.baud_rate = parse_or(get(ENV_BAUD_RATE), ENV_BAUD_RATE, DEFAULT_BAUD_RATE)?;
        config.debounce = Duration::from_millis(parse_or(
            get(ENV_TAP_DEBOUNCE_MS),
            ENV_TAP_DEBOUNCE_MS,
            DEFAULT_DEBOUNCE_MS,
        )?);
        config.dedup_capacity = parse_or(
            get(ENV_DEDUP_BUFFER_SIZE),
            ENV_DEDUP_BUFFER_SIZE,
            DEFAULT_DEDUP_CAPACITY,
        )?;
        config.heartbeat_interval = Duration::from_secs(parse_or(
            get(ENV_HEARTBEAT_INTERVAL_S),
            ENV_HEARTBEAT_INTERVAL_S,
            DEFAULT_HEARTBEAT_INTERVAL_S,
        )?);
        config.max_retries = parse_or(get(ENV_MAX_RETRIES), ENV_MAX_RETRIES, DEFAULT_MAX_RETRIES)?;

        if let Some(text) = get(ENV_EMULATE_TEXT) {
            let chunk_size = parse_or(
                get(ENV_APDU_CHUNK_SIZE),
                ENV_APDU_CHUNK_SIZE,
                DEFAULT_CHUNK_SIZE,
            )?;
            config.mode = Mode::Emulation { text, chunk_size };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(invalid(ENV_BAUD_RATE, "must be positive"));
        }
        if self.dedup_capacity == 0 {
            return Err(invalid(ENV_DEDUP_BUFFER_SIZE, "must be at least 1"));
        }
        if self.heartbeat_interval.is_zero() {
            return Err(invalid(ENV_HEARTBEAT_INTERVAL_S, "must be positive"));
        }
        if self.max_retries == 0 {
            return Err(invalid(ENV_MAX_RETRIES, "must be at least 1"));
        }
        if let Mode::Emulation { chunk_size, .. } = self.mode {
            if !(1..=MAX_CHUNK_SIZE).contains(&chunk_size) {
                return Err(invalid(
                    ENV_APDU_CHUNK_SIZE,
                    &format!("must be between 1 and {}", MAX_CHUNK_SIZE),
                ));
            }
        }
        Ok(())
    }

    pub fn is_emulation(&self) -> bool {
        matches!(self.mode, Mode::Emulation { .. })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("invalid {}={:?}: {}", key, value, e))),
    }
}

fn invalid(key: &str, why: &str) -> Error {
    Error::Config(format!("invalid {}: {}", key, why))
}
