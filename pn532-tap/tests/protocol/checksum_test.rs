#[path = "../common/mod.rs"]
mod common;

use pn532_tap::protocol::{dcs, lcs};

#[test]
fn lcs_and_dcs_examples() {
    assert_eq!(lcs(0x02), 0xFE);
    assert_eq!(lcs(0x00), 0x00);
    assert_eq!(lcs(0xFF), 0x01);

    assert_eq!(dcs(0xD4, &[0x02]), 0x2A);
    assert_eq!(dcs(0xD4, &[0x14, 0x01, 0x14, 0x01]), 0x02);
    assert_eq!(dcs(0xD5, &[0x03, 0x32, 0x01, 0x06, 0x07]), 0xE8);
}

#[test]
fn checksums_cancel_out() {
    let payload = [0x4A, 0x01, 0x00];
    let sum = payload
        .iter()
        .fold(0xD4u8, |acc, b| acc.wrapping_add(*b))
        .wrapping_add(dcs(0xD4, &payload));
    assert_eq!(sum, 0);
    assert_eq!(0x04u8.wrapping_add(lcs(0x04)), 0);
}
