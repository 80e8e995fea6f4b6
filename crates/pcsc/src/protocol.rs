//! Transmission protocol negotiated on connect

use std::fmt;

/// Raw value of `SCARD_PROTOCOL_UNDEFINED`
pub const PROTOCOL_UNDEFINED: u32 = 0x0000;
/// Raw value of `SCARD_PROTOCOL_T0`
pub const PROTOCOL_T0: u32 = 0x0001;
/// Raw value of `SCARD_PROTOCOL_T1`
pub const PROTOCOL_T1: u32 = 0x0002;
/// Raw value of `SCARD_PROTOCOL_RAW` as defined by pcsc-lite
pub const PROTOCOL_RAW: u32 = 0x0004;

/// Protocol reported by the platform for an active connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Character-oriented T=0
    T0,
    /// Block-oriented T=1
    T1,
    /// Anything else; no I/O parameters exist for it and transmits are refused
    Unsupported(u32),
}

impl Protocol {
    /// Classify a raw protocol value
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            PROTOCOL_T0 => Self::T0,
            PROTOCOL_T1 => Self::T1,
            other => Self::Unsupported(other),
        }
    }

    /// The raw protocol value
    pub const fn raw(self) -> u32 {
        match self {
            Self::T0 => PROTOCOL_T0,
            Self::T1 => PROTOCOL_T1,
            Self::Unsupported(raw) => raw,
        }
    }

    /// I/O parameters to hand to transmit, `None` for unsupported protocols
    pub const fn io_request(self) -> Option<IoRequest> {
        match self {
            Self::T0 => Some(IoRequest::T0),
            Self::T1 => Some(IoRequest::T1),
            Self::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::T0 => f.write_str("T0"),
            Self::T1 => f.write_str("T1"),
            Self::Unsupported(raw) => write!(f, "unsupported ({raw:#06x})"),
        }
    }
}

/// Protocol control information passed with each transmit
/// (`SCARD_PCI_T0` / `SCARD_PCI_T1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoRequest {
    /// `SCARD_PCI_T0`
    T0,
    /// `SCARD_PCI_T1`
    T1,
}

impl IoRequest {
    /// Protocol identifier carried in the request header
    pub const fn protocol(self) -> u32 {
        match self {
            Self::T0 => PROTOCOL_T0,
            Self::T1 => PROTOCOL_T1,
        }
    }
}

#[cfg(feature = "pcsc")]
impl Protocol {
    /// Map the protocol reported by the `pcsc` crate
    pub(crate) const fn from_pcsc(protocol: Option<pcsc::Protocol>) -> Self {
        match protocol {
            Some(pcsc::Protocol::T0) => Self::T0,
            Some(pcsc::Protocol::T1) => Self::T1,
            Some(_) => Self::Unsupported(PROTOCOL_RAW),
            None => Self::Unsupported(PROTOCOL_UNDEFINED),
        }
    }
}
