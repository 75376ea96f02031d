// pn532-tap/src/constants.rs
//! Common protocol constants used across the crate

/// PN532 wire frame preamble: 0x00 0x00 0xFF
pub const PN532_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// PN532 wire frame postamble: 0x00
pub const PN532_POSTAMBLE: u8 = 0x00;

/// Maximum value of the LEN byte (TFI + packet data) in a normal frame
pub const PN532_MAX_FRAME_DATA: usize = 255;

/// ACK frame sent by the chip after accepting a command. The host may
/// also send it to abort a pending command.
pub const PN532_ACK: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Application-level error frame emitted when the chip rejects a frame
pub const PN532_ERROR_FRAME: [u8; 8] = [0x00, 0x00, 0xFF, 0x01, 0xFF, 0x7F, 0x81, 0x00];

/// Frame identifier (TFI) host -> chip (D4) and chip -> host (D5)
pub const PN532_TFI_HOST: u8 = 0xD4;
pub const PN532_TFI_DEVICE: u8 = 0xD5;

/// HSU wake-up sequence. The chip sleeps after power-on and ignores the
/// first frame unless it is preceded by a long run of 0x55/0x00.
pub const PN532_HSU_WAKEUP: [u8; 16] = [
    0x55, 0x55, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

/// Command codes
pub const PN532_CMD_GET_FIRMWARE_VERSION: u8 = 0x02;
pub const PN532_CMD_SAM_CONFIGURATION: u8 = 0x14;
pub const PN532_CMD_INLIST_PASSIVE_TARGET: u8 = 0x4A;
pub const PN532_CMD_TG_GET_DATA: u8 = 0x86;
pub const PN532_CMD_TG_INIT_AS_TARGET: u8 = 0x8C;
pub const PN532_CMD_TG_SET_DATA: u8 = 0x8E;

/// ISO7816-4 status words used by the emulated tag
pub const SW_OK: [u8; 2] = [0x90, 0x00];
pub const SW_NOT_FOUND: [u8; 2] = [0x6A, 0x82];

/// APDU instruction bytes
pub const INS_SELECT: u8 = 0xA4;
pub const INS_READ_BINARY: u8 = 0xB0;
