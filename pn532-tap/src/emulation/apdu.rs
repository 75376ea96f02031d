// pn532-tap/src/emulation/apdu.rs

//! Short-form ISO7816-4 command APDUs.

/// Command APDU. `le` is `Some(0)` when the reader sent `00`, which means
/// "as much as available" (up to 256).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
    pub le: Option<u8>,
}

impl Apdu {
    /// Parse a short APDU. Headers shorter than 4 bytes are padded with
    /// zero P1/P2; `None` below CLA + INS.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 2 {
            return None;
        }
        let header = |i: usize| bytes.get(i).copied().unwrap_or(0);
        let mut apdu = Self {
            cla: bytes[0],
            ins: bytes[1],
            p1: header(2),
            p2: header(3),
            data: Vec::new(),
            le: None,
        };

        let body = bytes.get(4..).unwrap_or(&[]);
        match body.len() {
            0 => {}
            1 => apdu.le = Some(body[0]),
            n => {
                let lc = body[0] as usize;
                if n == 1 + lc {
                    apdu.data = body[1..].to_vec();
                } else if n == 2 + lc {
                    apdu.data = body[1..1 + lc].to_vec();
                    apdu.le = Some(body[n - 1]);
                } else {
                    // Lc disagrees with the length; keep the raw body.
                    apdu.data = body.to_vec();
                }
            }
        }
        Some(apdu)
    }

    /// Requested length, `None` when absent or zero.
    pub fn expected_len(&self) -> Option<usize> {
        match self.le {
            Some(0) | None => None,
            Some(n) => Some(n as usize),
        }
    }
}
