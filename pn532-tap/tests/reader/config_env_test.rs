#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use pn532_tap::config::{Config, Mode, ENV_EMULATE_TEXT, ENV_HEARTBEAT_INTERVAL_S, ENV_PORT};
use serial_test::serial;

const ALL_KEYS: &[&str] = &[
    "NFC_PORT",
    "NFC_BAUD_RATE",
    "NFC_TAP_DEBOUNCE_MS",
    "NFC_DEDUP_BUFFER_SIZE",
    "NFC_HEARTBEAT_INTERVAL_S",
    "NFC_MAX_RETRIES",
    "NFC_EMULATE_TEXT",
    "NFC_APDU_CHUNK_SIZE",
];

fn clear_env() {
    for key in ALL_KEYS {
        // SAFETY: serialized by #[serial]; no other thread reads the env.
        unsafe { std::env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    // SAFETY: see clear_env
    unsafe { std::env::set_var(key, value) };
}

#[test]
#[serial]
fn from_env_reads_process_environment() {
    clear_env();
    set(ENV_PORT, "/dev/ttyUSB0");
    set(ENV_HEARTBEAT_INTERVAL_S, "15");

    let config = Config::from_env().unwrap();
    assert_eq!(config.port, "/dev/ttyUSB0");
    assert_eq!(config.heartbeat_interval, Duration::from_secs(15));
    assert_eq!(config.mode, Mode::Reader);
    clear_env();
}

#[test]
#[serial]
fn from_env_without_port_fails() {
    clear_env();
    let err = Config::from_env().unwrap_err();
    assert_eq!(err.kind(), pn532_tap::ErrorKind::Config);
}

#[test]
#[serial]
fn emulate_text_selects_emulation_mode() {
    clear_env();
    set(ENV_PORT, "COM4");
    set(ENV_EMULATE_TEXT, "receipt 77");

    let config = Config::from_env().unwrap();
    assert!(config.is_emulation());
    clear_env();
}
