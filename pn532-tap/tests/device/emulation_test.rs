#[path = "../common/mod.rs"]
mod common;

use anyhow::Result;
use common::fixtures;
use pn532_tap::emulation::{CardEmulationSession, SessionState};
use pn532_tap::ndef;
use pn532_tap::CancellationToken;

fn get_data(apdu: &[u8]) -> Vec<u8> {
    let mut payload = vec![0x87, 0x00];
    payload.extend_from_slice(apdu);
    common::reply(&payload)
}

fn set_data_ok() -> Vec<u8> {
    common::reply(&[0x8F, 0x00])
}

#[test]
fn phone_reads_ndef_in_chunks() -> Result<()> {
    let payload = ndef::text_message("Order #1042")?;
    let chip = common::scripted_chip(vec![
        common::reply(&[0x8D, 0x08, 0xE0, 0x80]),
        get_data(&fixtures::select_ndef_app_apdu()),
        set_data_ok(),
        get_data(&fixtures::read_binary_apdu()),
        set_data_ok(),
        get_data(&fixtures::read_binary_apdu()),
        set_data_ok(),
        common::reply(&[0x87, 0x29]),
    ]);
    let token = CancellationToken::new();
    let mut controller = common::initialized_controller(&chip, token.clone())?;

    let initiator = controller.init_target(20)?.expect("initiator");
    let mut session = CardEmulationSession::new(&payload, 16);
    session.activate(&initiator);
    let mut turns = 0;
    let summary = session.run(&mut controller, &token, || {
        turns += 1;
        Ok(())
    })?;

    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(summary.apdus, 3);
    assert_eq!(summary.bytes_served, payload.len());
    assert_eq!(turns, 4);

    let responses: Vec<Vec<u8>> = chip
        .borrow()
        .sent_commands()
        .iter()
        .filter(|f| f[6] == 0x8E)
        .map(|f| f[7..f.len() - 2].to_vec())
        .collect();
    assert_eq!(responses[0], vec![0x90, 0x00]);
    assert_eq!(&responses[1][..16], &payload[..16]);
    assert_eq!(&responses[1][16..], &[0x90, 0x00]);
    assert_eq!(&responses[2][..payload.len() - 16], &payload[16..]);
    Ok(())
}

#[test]
fn unknown_instruction_is_answered_not_found() -> Result<()> {
    let chip = common::scripted_chip(vec![
        get_data(&common::h("00 CA 00 00")),
        set_data_ok(),
        common::reply(&[0x87, 0x29]),
    ]);
    let token = CancellationToken::new();
    let mut controller = common::initialized_controller(&chip, token.clone())?;

    let mut session = CardEmulationSession::new(&[0x03, 0x00, 0xFE], 50);
    let summary = session.run(&mut controller, &token, || Ok(()))?;
    assert_eq!(summary.apdus, 1);

    let last = chip.borrow().sent_commands().into_iter().filter(|f| f[6] == 0x8E).last();
    assert_eq!(&last.unwrap()[7..9], &[0x6A, 0x82]);
    Ok(())
}

#[test]
fn silent_initiator_closes_session() -> Result<()> {
    let chip = common::scripted_chip(vec![pn532_tap::constants::PN532_ACK.to_vec()]);
    let token = CancellationToken::new();
    let mut controller = common::initialized_controller(&chip, token.clone())?;

    let mut session = CardEmulationSession::new(&[0x03, 0x00, 0xFE], 50);
    let summary = session.run(&mut controller, &token, || Ok(()))?;
    assert_eq!(summary.apdus, 0);
    assert_eq!(session.state(), SessionState::Closed);
    Ok(())
}
