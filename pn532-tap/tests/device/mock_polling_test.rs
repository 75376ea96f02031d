#[path = "../common/mod.rs"]
mod common;

use anyhow::Result;
use common::fixtures;
use pn532_tap::constants::PN532_ACK;
use pn532_tap::CancellationToken;

#[test]
fn poll_reports_uid() -> Result<()> {
    let chip = common::scripted_chip(vec![common::reply(&fixtures::one_target_payload())]);
    let mut controller = common::initialized_controller(&chip, CancellationToken::new())?;

    let uid = controller.poll_passive_target(20)?.expect("a target");
    assert_eq!(uid.to_hex(), fixtures::sample_uid_hex());
    assert_eq!(
        chip.borrow().sent_commands().last().unwrap(),
        &fixtures::inlist_passive_target_frame()
    );
    Ok(())
}

#[test]
fn empty_field_yields_none_and_aborts() -> Result<()> {
    let chip = common::scripted_chip(vec![PN532_ACK.to_vec()]);
    let mut controller = common::initialized_controller(&chip, CancellationToken::new())?;

    assert!(controller.poll_passive_target(20)?.is_none());
    assert_eq!(chip.borrow().sent.last().unwrap(), &PN532_ACK.to_vec());
    Ok(())
}

#[test]
fn missing_ack_is_protocol_error() -> Result<()> {
    let chip = common::scripted_chip(vec![]);
    let mut controller = common::initialized_controller(&chip, CancellationToken::new())?;

    let err = controller.poll_passive_target(20).unwrap_err();
    assert_eq!(err.kind(), pn532_tap::ErrorKind::Protocol);
    Ok(())
}

#[test]
fn write_failure_is_transport_error() -> Result<()> {
    let chip = common::scripted_chip(vec![]);
    let mut controller = common::initialized_controller(&chip, CancellationToken::new())?;
    chip.borrow_mut().set_write_failures(1);

    let err = controller.poll_passive_target(20).unwrap_err();
    assert_eq!(err.kind(), pn532_tap::ErrorKind::Transport);
    Ok(())
}
