#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use pn532_tap::constants::{PN532_ACK, PN532_TFI_DEVICE};
use pn532_tap::error::ProtocolError;
use pn532_tap::protocol::{find_ack, is_ack, Frame};
use pn532_tap::Error;

#[test]
fn encode_matches_wire_fixture() {
    assert_eq!(
        Frame::encode(0x02, &[]).unwrap(),
        fixtures::get_firmware_version_frame()
    );
    assert_eq!(
        Frame::encode(0x4A, &[0x01, 0x00]).unwrap(),
        fixtures::inlist_passive_target_frame()
    );
}

#[test]
fn decode_response_after_ack_and_noise() {
    let mut buf = vec![0x55, 0x00];
    buf.extend_from_slice(&PN532_ACK);
    buf.extend(fixtures::firmware_response_frame());
    buf.extend_from_slice(&[0xAA, 0xBB]);

    let (frame, consumed) = Frame::decode_prefix(&buf).unwrap();
    assert_eq!(frame.tfi(), PN532_TFI_DEVICE);
    assert_eq!(frame.payload(), &[0x03, 0x32, 0x01, 0x06, 0x07]);
    assert_eq!(&buf[consumed..], &[0xAA, 0xBB]);
}

#[test]
fn ack_helpers() {
    assert!(is_ack(&PN532_ACK));
    assert!(!is_ack(&fixtures::firmware_response_frame()));

    let mut buf = vec![0x00];
    buf.extend_from_slice(&PN532_ACK);
    buf.push(0x42);
    assert_eq!(find_ack(&buf), Some(7));
    assert_eq!(find_ack(&[0x00, 0x00, 0xFF]), None);
}

#[test]
fn corrupted_fixture_is_rejected() {
    let mut bytes = fixtures::firmware_response_frame();
    let dcs_index = bytes.len() - 2;
    bytes[dcs_index] ^= 0x01;
    assert!(matches!(
        Frame::decode(&bytes),
        Err(Error::Protocol(ProtocolError::Malformed(_)))
    ));
}

#[test]
fn oversized_payload_is_refused() {
    let params = vec![0u8; Frame::MAX_PAYLOAD_LEN];
    assert!(matches!(
        Frame::encode(0x8E, &params),
        Err(Error::Protocol(ProtocolError::PayloadTooLarge { .. }))
    ));
    assert!(Frame::encode(0x8E, &params[1..]).is_ok());
}
