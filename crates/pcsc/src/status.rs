//! PC/SC return codes and their symbolic names

use std::fmt;

/// Raw return value of a PC/SC call
///
/// Values are kept as the unsigned 32-bit representation (`0x8010000C` and so
/// on) regardless of whether the platform declares `LONG` as 32 or 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u32);

impl StatusCode {
    /// `SCARD_S_SUCCESS`
    pub const SUCCESS: Self = Self(0x0000_0000);
    /// `SCARD_E_INVALID_HANDLE`
    pub const INVALID_HANDLE: Self = Self(0x8010_0003);
    /// `SCARD_E_INSUFFICIENT_BUFFER`
    pub const INSUFFICIENT_BUFFER: Self = Self(0x8010_0008);
    /// `SCARD_E_UNKNOWN_READER`
    pub const UNKNOWN_READER: Self = Self(0x8010_0009);
    /// `SCARD_E_NO_SMARTCARD`
    pub const NO_SMARTCARD: Self = Self(0x8010_000C);
    /// `SCARD_E_NO_SERVICE`
    pub const NO_SERVICE: Self = Self(0x8010_001D);
    /// `SCARD_E_NO_READERS_AVAILABLE`
    pub const NO_READERS_AVAILABLE: Self = Self(0x8010_002E);
    /// `SCARD_W_REMOVED_CARD`
    pub const REMOVED_CARD: Self = Self(0x8010_0069);

    /// Wrap a raw status value
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw status value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is `SCARD_S_SUCCESS`
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Symbolic name of the code, or `"Unknown"` when it is not in the table
    pub fn name(self) -> &'static str {
        STATUS_NAMES
            .binary_search_by_key(&self.0, |&(code, _)| code)
            .map_or(UNKNOWN, |index| STATUS_NAMES[index].1)
    }
}

impl From<u32> for StatusCode {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#010X})", self.name(), self.0)
    }
}

#[cfg(feature = "pcsc")]
impl From<pcsc::Error> for StatusCode {
    fn from(error: pcsc::Error) -> Self {
        // `pcsc::Error` is a `repr(u32)` enum over the platform codes.
        Self(error as u32)
    }
}

/// Label returned for codes outside the table
pub const UNKNOWN: &str = "Unknown";

/// Known PC/SC error and warning codes, sorted by value.
///
/// `SCARD_E_UNSUPPORTED_FEATURE` is left out: pcsc-lite gives it the same
/// value as `SCARD_E_UNEXPECTED`.
pub static STATUS_NAMES: &[(u32, &str)] = &[
    (0x8010_0001, "SCARD_F_INTERNAL_ERROR"),
    (0x8010_0002, "SCARD_E_CANCELLED"),
    (0x8010_0003, "SCARD_E_INVALID_HANDLE"),
    (0x8010_0004, "SCARD_E_INVALID_PARAMETER"),
    (0x8010_0005, "SCARD_E_INVALID_TARGET"),
    (0x8010_0006, "SCARD_E_NO_MEMORY"),
    (0x8010_0007, "SCARD_F_WAITED_TOO_LONG"),
    (0x8010_0008, "SCARD_E_INSUFFICIENT_BUFFER"),
    (0x8010_0009, "SCARD_E_UNKNOWN_READER"),
    (0x8010_000A, "SCARD_E_TIMEOUT"),
    (0x8010_000B, "SCARD_E_SHARING_VIOLATION"),
    (0x8010_000C, "SCARD_E_NO_SMARTCARD"),
    (0x8010_000D, "SCARD_E_UNKNOWN_CARD"),
    (0x8010_000E, "SCARD_E_CANT_DISPOSE"),
    (0x8010_000F, "SCARD_E_PROTO_MISMATCH"),
    (0x8010_0010, "SCARD_E_NOT_READY"),
    (0x8010_0011, "SCARD_E_INVALID_VALUE"),
    (0x8010_0012, "SCARD_E_SYSTEM_CANCELLED"),
    (0x8010_0013, "SCARD_F_COMM_ERROR"),
    (0x8010_0014, "SCARD_F_UNKNOWN_ERROR"),
    (0x8010_0015, "SCARD_E_INVALID_ATR"),
    (0x8010_0016, "SCARD_E_NOT_TRANSACTED"),
    (0x8010_0017, "SCARD_E_READER_UNAVAILABLE"),
    (0x8010_0018, "SCARD_P_SHUTDOWN"),
    (0x8010_0019, "SCARD_E_PCI_TOO_SMALL"),
    (0x8010_001A, "SCARD_E_READER_UNSUPPORTED"),
    (0x8010_001B, "SCARD_E_DUPLICATE_READER"),
    (0x8010_001C, "SCARD_E_CARD_UNSUPPORTED"),
    (0x8010_001D, "SCARD_E_NO_SERVICE"),
    (0x8010_001E, "SCARD_E_SERVICE_STOPPED"),
    (0x8010_001F, "SCARD_E_UNEXPECTED"),
    (0x8010_0020, "SCARD_E_ICC_INSTALLATION"),
    (0x8010_0021, "SCARD_E_ICC_CREATEORDER"),
    (0x8010_0023, "SCARD_E_DIR_NOT_FOUND"),
    (0x8010_0024, "SCARD_E_FILE_NOT_FOUND"),
    (0x8010_0025, "SCARD_E_NO_DIR"),
    (0x8010_0026, "SCARD_E_NO_FILE"),
    (0x8010_0027, "SCARD_E_NO_ACCESS"),
    (0x8010_0028, "SCARD_E_WRITE_TOO_MANY"),
    (0x8010_0029, "SCARD_E_BAD_SEEK"),
    (0x8010_002A, "SCARD_E_INVALID_CHV"),
    (0x8010_002B, "SCARD_E_UNKNOWN_RES_MNG"),
    (0x8010_002C, "SCARD_E_NO_SUCH_CERTIFICATE"),
    (0x8010_002D, "SCARD_E_CERTIFICATE_UNAVAILABLE"),
    (0x8010_002E, "SCARD_E_NO_READERS_AVAILABLE"),
    (0x8010_002F, "SCARD_E_COMM_DATA_LOST"),
    (0x8010_0030, "SCARD_E_NO_KEY_CONTAINER"),
    (0x8010_0031, "SCARD_E_SERVER_TOO_BUSY"),
    (0x8010_0065, "SCARD_W_UNSUPPORTED_CARD"),
    (0x8010_0066, "SCARD_W_UNRESPONSIVE_CARD"),
    (0x8010_0067, "SCARD_W_UNPOWERED_CARD"),
    (0x8010_0068, "SCARD_W_RESET_CARD"),
    (0x8010_0069, "SCARD_W_REMOVED_CARD"),
    (0x8010_006A, "SCARD_W_SECURITY_VIOLATION"),
    (0x8010_006B, "SCARD_W_WRONG_CHV"),
    (0x8010_006C, "SCARD_W_CHV_BLOCKED"),
    (0x8010_006D, "SCARD_W_EOF"),
    (0x8010_006E, "SCARD_W_CANCELLED_BY_USER"),
    (0x8010_006F, "SCARD_W_CARD_NOT_AUTHENTICATED"),
];
