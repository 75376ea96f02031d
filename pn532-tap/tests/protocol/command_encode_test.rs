#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use pn532_tap::protocol::{Command, TargetParams};

#[test]
fn setup_commands_encode_to_fixtures() {
    assert_eq!(
        Command::GetFirmwareVersion.encode().unwrap(),
        fixtures::get_firmware_version_frame()
    );
    assert_eq!(
        Command::sam_normal().encode().unwrap(),
        fixtures::sam_configuration_frame()
    );
    assert_eq!(
        Command::inlist_one_iso_a().encode().unwrap(),
        fixtures::inlist_passive_target_frame()
    );
}

#[test]
fn init_as_target_parameters() {
    let cmd = Command::TgInitAsTarget(TargetParams::default());
    let params = cmd.params();
    assert_eq!(params.len(), 37);
    assert_eq!(params[0], 0x05);
    assert_eq!(&params[1..3], &[0x04, 0x00]);
    assert_eq!(&params[3..6], &[0x12, 0x34, 0x56]);
    assert_eq!(params[6], 0x40);
    assert_eq!(&params[7..9], &[0x01, 0xFE]);
    assert_eq!(&params[25..35], &common::h("0102030405060708090A")[..]);
    assert_eq!(&params[35..], &[0x00, 0x00]);
}

#[test]
fn set_data_carries_response_apdu() {
    let frame = Command::TgSetData(vec![0x90, 0x00]).encode().unwrap();
    assert_eq!(frame, common::h("0000FF 04 FC D4 8E 90 00 0E 00"));
}

#[test]
fn response_codes_are_opcode_plus_one() {
    for cmd in [
        Command::GetFirmwareVersion,
        Command::sam_normal(),
        Command::inlist_one_iso_a(),
        Command::TgGetData,
    ] {
        assert_eq!(cmd.response_code(), cmd.opcode() + 1);
    }
}
