#[path = "../common/mod.rs"]
mod common;

use pn532_tap::constants::PN532_HSU_WAKEUP;
use pn532_tap::device::TargetController;
use pn532_tap::transport::MockTransport;
use pn532_tap::CancellationToken;

#[test]
fn initialize_transitions_and_reports_firmware() {
    let chip = common::scripted_chip(vec![]);
    let controller = TargetController::new(Box::new(chip.clone()), CancellationToken::new())
        .with_timings(common::fast_timings());

    // Transition to initialized
    let initialized = controller.initialize().unwrap();
    assert_eq!(initialized.firmware().to_string(), "1.6");

    let sent = chip.borrow().sent.clone();
    assert_eq!(sent[0], PN532_HSU_WAKEUP.to_vec());
    assert_eq!(sent[1], common::fixtures::get_firmware_version_frame());
    assert_eq!(sent[2], common::fixtures::sam_configuration_frame());
}

#[test]
fn initialize_fails_without_chip() {
    let chip = MockTransport::new().shared();
    let result = TargetController::new(Box::new(chip.clone()), CancellationToken::new())
        .with_timings(common::fast_timings())
        .initialize();
    let err = result.err().unwrap();
    assert!(err.is_recoverable());
    assert!(chip.borrow().closed);
}

#[test]
fn initialize_honours_cancellation() {
    let chip = common::scripted_chip(vec![]);
    let token = CancellationToken::new();
    token.cancel("stop");
    let err = common::initialized_controller(&chip, token).err().unwrap();
    assert!(err.is_cancelled());
}
