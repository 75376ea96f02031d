// fixtures.rs — provides commonly used test payloads/frames

use super::h;

/// GetFirmwareVersion as sent by the host
pub fn get_firmware_version_frame() -> Vec<u8> {
    h("0000FF 02 FE D4 02 2A 00")
}

/// SAMConfiguration normal mode, timeout 0x14, IRQ on
pub fn sam_configuration_frame() -> Vec<u8> {
    h("0000FF 05 FB D4 14 01 14 01 02 00")
}

/// InListPassiveTarget, one target, 106 kbps type A
pub fn inlist_passive_target_frame() -> Vec<u8> {
    h("0000FF 04 FC D4 4A 01 00 E1 00")
}

/// Firmware reply of a PN532 v1.6
pub fn firmware_response_frame() -> Vec<u8> {
    h("0000FF 06 FA D5 03 32 01 06 07 E8 00")
}

pub fn sample_uid_hex() -> &'static str {
    "04A1B2C3"
}

/// InListPassiveTarget reply body with one MIFARE Classic style target
pub fn one_target_payload() -> Vec<u8> {
    h("4B 01 01 0004 08 04 04A1B2C3")
}

/// InListPassiveTarget reply body with a 7-byte UID ISO14443-4 target
pub fn iso_dep_target_payload() -> Vec<u8> {
    h("4B 01 01 0044 20 07 04112233445566 05 75 77 81 02")
}

/// SELECT NDEF application (D2760000850101)
pub fn select_ndef_app_apdu() -> Vec<u8> {
    h("00 A4 04 00 07 D2760000850101 00")
}

pub fn read_binary_apdu() -> Vec<u8> {
    h("00 B0 00 00")
}
