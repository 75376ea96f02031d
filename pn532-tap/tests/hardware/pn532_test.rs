#![cfg(feature = "serial")]

//! 実機テスト: NFC_PORT に接続された PN532 を開いて初期化する。
//!
//! cargo test --test hardware -- --ignored

use pn532_tap::config::{DEFAULT_BAUD_RATE, ENV_PORT};
use pn532_tap::device::{Initialized, TargetController};
use pn532_tap::transport::{Connector, SerialConnector};
use pn532_tap::{CancellationToken, Result};

/// `Ok(None)` when NFC_PORT is unset (CI).
fn open_and_initialize() -> Result<Option<TargetController<Initialized>>> {
    let Ok(port) = std::env::var(ENV_PORT) else {
        return Ok(None);
    };
    let mut connector = SerialConnector::new(port, DEFAULT_BAUD_RATE);
    let transport = connector.connect()?;
    let controller = TargetController::new(transport, CancellationToken::new()).initialize()?;
    Ok(Some(controller))
}

#[test]
#[ignore]
fn open_and_initialize_pn532() -> Result<()> {
    if let Some(controller) = open_and_initialize()? {
        assert!(controller.firmware().version >= 1);
        controller.close()?;
    }
    Ok(())
}

#[test]
#[ignore]
fn poll_once() -> Result<()> {
    if let Some(mut controller) = open_and_initialize()? {
        let uid = controller.poll_passive_target(500)?;
        eprintln!("poll result: {:?}", uid.map(|u| u.to_hex()));
        controller.close()?;
    }
    Ok(())
}
