#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use pn532_tap::error::ProtocolError;
use pn532_tap::protocol::codec::decode_response_frame;
use pn532_tap::protocol::{Command, Response};
use pn532_tap::Error;

#[test]
fn firmware_fixture_decodes() {
    let resp =
        decode_response_frame(&Command::GetFirmwareVersion, &fixtures::firmware_response_frame())
            .unwrap();
    match resp {
        Response::FirmwareVersion(fw) => {
            assert_eq!(fw.ic, 0x32);
            assert_eq!(fw.to_string(), "1.6");
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn passive_target_uid() {
    let frame = common::device_frame(&fixtures::one_target_payload());
    match decode_response_frame(&Command::inlist_one_iso_a(), &frame).unwrap() {
        Response::InListPassiveTarget { targets } => {
            assert_eq!(targets.len(), 1);
            assert_eq!(targets[0].uid.to_hex(), fixtures::sample_uid_hex());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn iso_dep_target_keeps_ats() {
    let frame = common::device_frame(&fixtures::iso_dep_target_payload());
    match decode_response_frame(&Command::inlist_one_iso_a(), &frame).unwrap() {
        Response::InListPassiveTarget { targets } => {
            assert_eq!(targets[0].uid.to_hex(), "04112233445566");
            assert_eq!(targets[0].ats, common::h("05 75 77 81 02"));
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn response_for_other_command_is_rejected() {
    let frame = fixtures::firmware_response_frame();
    assert!(matches!(
        decode_response_frame(&Command::inlist_one_iso_a(), &frame),
        Err(Error::Protocol(ProtocolError::UnexpectedResponse {
            expected: 0x4B,
            actual: 0x03
        }))
    ));
}

#[test]
fn get_data_keeps_status_apart() {
    let mut payload = vec![0x87, 0x00];
    payload.extend(fixtures::read_binary_apdu());
    let frame = common::device_frame(&payload);
    assert_eq!(
        decode_response_frame(&Command::TgGetData, &frame).unwrap(),
        Response::TgGetData {
            status: 0,
            data: fixtures::read_binary_apdu()
        }
    );
}
