#[path = "../common/mod.rs"]
mod common;

use pn532_tap::ndef::{text_message, text_record, wrap_tlv, TLV_NDEF_MESSAGE, TLV_TERMINATOR};

#[test]
fn text_message_layout() {
    let text = "Order #1042";
    let bytes = text_message(text).unwrap();
    let l = text.len();

    let mut expected = vec![TLV_NDEF_MESSAGE, (l + 7) as u8];
    expected.extend(common::h("D1 01"));
    expected.push((l + 3) as u8);
    expected.extend(common::h("54 02 65 6E"));
    expected.extend_from_slice(text.as_bytes());
    expected.push(TLV_TERMINATOR);

    assert_eq!(bytes, expected);
    assert_eq!(bytes.len(), l + 10);
}

#[test]
fn empty_text_is_valid() {
    assert_eq!(text_record(""), common::h("D1 01 03 54 02 65 6E"));
}

#[test]
fn long_message_switches_tlv_length_form() {
    let record = text_record(&"a".repeat(260));
    let tlv = wrap_tlv(&record).unwrap();
    assert_eq!(tlv[1], 0xFF);
    assert_eq!(u16::from_be_bytes([tlv[2], tlv[3]]) as usize, record.len());
}
