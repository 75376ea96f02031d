#[path = "../common/mod.rs"]
mod common;

use pn532_tap::transport::{Connector, MockTransport, Transport};
use pn532_tap::{Error, ErrorKind};

#[test]
fn write_failure_and_recovery() {
    let mut m = MockTransport::new();
    m.set_write_failures(1);

    // First write should fail (simulated)
    let err = m.write(&[0x00]).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);

    // Second write goes through
    assert!(m.write(&[0x00]).is_ok());
}

#[test]
fn closed_transport_rejects_writes() {
    let mut m = MockTransport::new();
    m.close().unwrap();
    assert!(m.write(&[0x00]).is_err());
}

#[test]
fn exhausted_connector_reports_missing_device() {
    let mut connector = common::ScriptedConnector::new(vec![]);
    let err = connector.connect().err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(connector.attempts(), 1);
}
