//! Error types for card sessions

use std::fmt;

use crate::status::StatusCode;

/// Platform call that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `SCardEstablishContext`
    EstablishContext,
    /// `SCardReleaseContext`
    ReleaseContext,
    /// `SCardListReaders`
    ListReaders,
    /// `SCardConnect`
    Connect,
    /// `SCardDisconnect`
    Disconnect,
    /// `SCardStatus`
    Status,
    /// `SCardTransmit` for the caller's command
    Transmit,
    /// `SCardTransmit` for the GET RESPONSE follow-up
    GetResponse,
}

impl Operation {
    /// Name of the underlying platform function
    pub const fn function(self) -> &'static str {
        match self {
            Self::EstablishContext => "SCardEstablishContext",
            Self::ReleaseContext => "SCardReleaseContext",
            Self::ListReaders => "SCardListReaders",
            Self::Connect => "SCardConnect",
            Self::Disconnect => "SCardDisconnect",
            Self::Status => "SCardStatus",
            Self::Transmit | Self::GetResponse => "SCardTransmit",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetResponse => f.write_str("SCardTransmit (GET RESPONSE)"),
            other => f.write_str(other.function()),
        }
    }
}

/// Errors returned by [`CardSession`](crate::CardSession)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The resource manager context was never established
    #[error("No resource manager context")]
    NoContext,

    /// The operation needs an active reader connection
    #[error("Not connected to a reader")]
    NotConnected,

    /// The connection negotiated a protocol without I/O parameters
    #[error("Unsupported protocol: {0:#06x}")]
    UnsupportedProtocol(u32),

    /// A platform call returned a non-success status
    #[error("Error {operation}: {status}")]
    Platform {
        /// Failing call
        operation: Operation,
        /// Returned status
        status: StatusCode,
    },

    /// The reader name cannot be passed to the platform
    #[error("Invalid reader name: {0:?}")]
    InvalidReaderName(String),
}

impl SessionError {
    /// Create a platform error
    pub const fn platform(operation: Operation, status: StatusCode) -> Self {
        Self::Platform { operation, status }
    }

    /// Status code of a platform error
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Platform { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SessionError::platform(Operation::Connect, StatusCode::NO_SMARTCARD);
        assert_eq!(
            err.to_string(),
            "Error SCardConnect: SCARD_E_NO_SMARTCARD (0x8010000C)"
        );

        let err = SessionError::platform(Operation::GetResponse, StatusCode::REMOVED_CARD);
        assert_eq!(
            err.to_string(),
            "Error SCardTransmit (GET RESPONSE): SCARD_W_REMOVED_CARD (0x80100069)"
        );

        assert_eq!(
            SessionError::UnsupportedProtocol(4).to_string(),
            "Unsupported protocol: 0x0004"
        );
    }

    #[test]
    fn test_status_accessor() {
        let err = SessionError::platform(Operation::Status, StatusCode::INVALID_HANDLE);
        assert_eq!(err.status(), Some(StatusCode::INVALID_HANDLE));
        assert_eq!(SessionError::NotConnected.status(), None);
    }
}
