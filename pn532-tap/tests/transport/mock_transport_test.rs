#[path = "../common/mod.rs"]
mod common;

use pn532_tap::transport::{MockTransport, Transport};

#[test]
fn reply_released_only_by_command_frames() {
    let mut m = MockTransport::new();
    m.push_reply(common::reply(&[0x03, 0x32, 0x01, 0x06, 0x07]));

    m.write(&pn532_tap::constants::PN532_HSU_WAKEUP).unwrap();
    let mut buf = [0u8; 32];
    assert_eq!(m.read(&mut buf, 10).unwrap(), 0);

    m.write(&common::fixtures::get_firmware_version_frame()).unwrap();
    let n = m.read(&mut buf, 10).unwrap();
    assert_eq!(n, 6 + 13);
}

#[test]
fn clear_input_drops_pending_bytes() {
    let mut m = MockTransport::new();
    m.push_unsolicited(&[0x01, 0x02, 0x03]);
    m.clear_input().unwrap();
    let mut buf = [0u8; 8];
    assert_eq!(m.read(&mut buf, 10).unwrap(), 0);
    assert_eq!(m.clear_count, 1);
}
