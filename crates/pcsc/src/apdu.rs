//! APDU helpers for response continuation
//!
//! Only the trailing status word of a response is interpreted. Commands and
//! response bodies are passed through as opaque bytes.

use std::fmt;

/// Size of the probe buffers used for transmit and status queries
pub const MAX_SHORT_RESPONSE: usize = 255;

/// SW1 value signalling that response bytes are still pending (61 XX)
pub const MORE_DATA_AVAILABLE: u8 = 0x61;

/// Instruction byte of GET RESPONSE
pub const INS_GET_RESPONSE: u8 = 0xC0;

/// Build a GET RESPONSE command (`CLA C0 00 00 Le`)
pub const fn get_response(cla: u8, le: u8) -> [u8; 5] {
    [cla, INS_GET_RESPONSE, 0x00, 0x00, le]
}

/// Number of pending bytes announced by a `61 XX` trailer, if present
///
/// Responses shorter than two bytes never announce continuation.
pub fn pending_bytes(response: &[u8]) -> Option<u8> {
    StatusWord::from_response(response).and_then(|sw| sw.remaining_bytes())
}

/// Status Word (SW1-SW2) from an APDU response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte (SW1)
    pub sw1: u8,
    /// Second status byte (SW2)
    pub sw2: u8,
}

impl StatusWord {
    /// Create a new status word
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Take the last two bytes of a response
    pub fn from_response(response: &[u8]) -> Option<Self> {
        match response {
            [.., sw1, sw2] => Some(Self::new(*sw1, *sw2)),
            _ => None,
        }
    }

    /// Convert to a u16 value (SW1 | SW2)
    pub const fn to_u16(&self) -> u16 {
        ((self.sw1 as u16) << 8) | (self.sw2 as u16)
    }

    /// Check if this status word indicates success (90 00)
    pub const fn is_success(&self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }

    /// Get the number of remaining bytes when SW1 = 61
    pub const fn remaining_bytes(&self) -> Option<u8> {
        if self.sw1 == MORE_DATA_AVAILABLE {
            Some(self.sw2)
        } else {
            None
        }
    }

    /// Get a short description of this status word
    pub const fn description(&self) -> &'static str {
        match (self.sw1, self.sw2) {
            (0x90, 0x00) => "Success",
            (0x61, _) => "More data available",
            (0x62, _) => "Warning: non-volatile memory unchanged",
            (0x63, n) if (n & 0xF0) == 0xC0 => "Counter value",
            (0x63, _) => "Warning: non-volatile memory changed",
            (0x64, _) => "Execution error: non-volatile memory unchanged",
            (0x65, _) => "Execution error: non-volatile memory changed",
            (0x67, 0x00) => "Wrong length",
            (0x68, _) => "Function in CLA not supported",
            (0x69, 0x82) => "Security status not satisfied",
            (0x69, 0x83) => "Authentication method blocked",
            (0x69, 0x85) => "Conditions of use not satisfied",
            (0x69, _) => "Command not allowed",
            (0x6A, 0x82) => "File or application not found",
            (0x6A, 0x86) => "Incorrect parameters P1-P2",
            (0x6A, _) => "Wrong parameters",
            (0x6B, 0x00) => "Wrong parameters P1-P2",
            (0x6C, _) => "Wrong Le field",
            (0x6D, 0x00) => "Instruction not supported",
            (0x6E, 0x00) => "Class not supported",
            (0x6F, 0x00) => "No precise diagnosis",
            _ => "Unknown status",
        }
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} ({})", self.to_u16(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_command() {
        assert_eq!(get_response(0x00, 0x05), [0x00, 0xC0, 0x00, 0x00, 0x05]);
        assert_eq!(get_response(0x80, 0x00), [0x80, 0xC0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_pending_bytes() {
        assert_eq!(pending_bytes(&[0x61, 0x05]), Some(0x05));
        assert_eq!(pending_bytes(&[0x01, 0x02, 0x61, 0x10]), Some(0x10));
        assert_eq!(pending_bytes(&[0x61, 0x00]), Some(0x00));
        assert_eq!(pending_bytes(&[0x90, 0x00]), None);
        assert_eq!(pending_bytes(&[0x61, 0x90, 0x00]), None);
    }

    #[test]
    fn test_short_responses_never_continue() {
        assert_eq!(pending_bytes(&[]), None);
        assert_eq!(pending_bytes(&[0x61]), None);
    }

    #[test]
    fn test_status_word() {
        let sw = StatusWord::from_response(&[0xAA, 0x90, 0x00]).unwrap();
        assert!(sw.is_success());
        assert_eq!(sw.to_u16(), 0x9000);
        assert_eq!(sw.to_string(), "9000 (Success)");

        let sw = StatusWord::new(0x6A, 0x82);
        assert!(!sw.is_success());
        assert_eq!(sw.remaining_bytes(), None);
        assert_eq!(sw.description(), "File or application not found");
    }
}
