// pn532-tap/src/protocol/commands/target.rs

//! TgInitAsTarget parameters for emulating an ISO14443-4 (Type 4) tag.

/// Mode byte: PICC only (0x04) + passive only (0x01)
pub const MODE_PICC_PASSIVE: u8 = 0x05;

/// Parameters of TgInitAsTarget. The defaults present a Type 4 tag; the
/// FeliCa and NFCID3t blocks are mandatory fields the chip ignores in
/// PICC-only mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetParams {
    pub mode: u8,
    pub sens_res: [u8; 2],
    /// Three bytes; the chip prepends 0x08 to form a random NFCID1.
    pub nfcid1t: [u8; 3],
    pub sel_res: u8,
    pub felica_params: [u8; 18],
    pub nfcid3t: [u8; 10],
    pub general_bytes: Vec<u8>,
    pub historical_bytes: Vec<u8>,
}

impl Default for TargetParams {
    fn default() -> Self {
        Self {
            mode: MODE_PICC_PASSIVE,
            sens_res: [0x04, 0x00],
            nfcid1t: [0x12, 0x34, 0x56],
            sel_res: 0x40,
            felica_params: [
                0x01, 0xFE, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xC0, 0xC1, 0xC2, 0xC3, 0xC4,
                0xC5, 0xC6, 0xC7, 0xFF, 0xFF,
            ],
            nfcid3t: [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A],
            general_bytes: Vec::new(),
            historical_bytes: Vec::new(),
        }
    }
}

/// Encode TgInitAsTarget parameters (without the command code).
pub fn encode_init_as_target(params: &TargetParams) -> Vec<u8> {
    let mut v = Vec::with_capacity(
        1 + 2 + 3 + 1 + 18 + 10 + 2 + params.general_bytes.len() + params.historical_bytes.len(),
    );
    v.push(params.mode);
    v.extend_from_slice(&params.sens_res);
    v.extend_from_slice(&params.nfcid1t);
    v.push(params.sel_res);
    v.extend_from_slice(&params.felica_params);
    v.extend_from_slice(&params.nfcid3t);
    v.push(params.general_bytes.len() as u8);
    v.extend_from_slice(&params.general_bytes);
    v.push(params.historical_bytes.len() as u8);
    v.extend_from_slice(&params.historical_bytes);
    v
}
