//! Configuration options for card sessions

use crate::apdu::MAX_SHORT_RESPONSE;

/// Scope of the resource manager context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Context scoped to the current user
    User,
    /// Context scoped to the system (default)
    System,
}

/// Sharing mode for card connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    /// Exclusive access to the card
    Exclusive,
    /// Shared access to the card (default)
    Shared,
    /// Direct connection to the reader
    Direct,
}

/// Protocols the platform may negotiate on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredProtocols {
    /// Only T=0
    T0,
    /// Only T=1
    T1,
    /// T=0 or T=1, platform's choice (default)
    Any,
}

/// What happens to the card when a connection is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Leave the card powered (default)
    LeaveCard,
    /// Warm reset the card
    ResetCard,
    /// Power the card down
    UnpowerCard,
    /// Eject the card, if the reader supports it
    EjectCard,
}

#[cfg(feature = "pcsc")]
impl From<Scope> for pcsc::Scope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::User => Self::User,
            Scope::System => Self::System,
        }
    }
}

#[cfg(feature = "pcsc")]
impl From<ShareMode> for pcsc::ShareMode {
    fn from(mode: ShareMode) -> Self {
        match mode {
            ShareMode::Exclusive => Self::Exclusive,
            ShareMode::Shared => Self::Shared,
            ShareMode::Direct => Self::Direct,
        }
    }
}

#[cfg(feature = "pcsc")]
impl From<PreferredProtocols> for pcsc::Protocols {
    fn from(protocols: PreferredProtocols) -> Self {
        match protocols {
            PreferredProtocols::T0 => Self::T0,
            PreferredProtocols::T1 => Self::T1,
            PreferredProtocols::Any => Self::ANY,
        }
    }
}

#[cfg(feature = "pcsc")]
impl From<Disposition> for pcsc::Disposition {
    fn from(disposition: Disposition) -> Self {
        match disposition {
            Disposition::LeaveCard => Self::LeaveCard,
            Disposition::ResetCard => Self::ResetCard,
            Disposition::UnpowerCard => Self::UnpowerCard,
            Disposition::EjectCard => Self::EjectCard,
        }
    }
}

/// Configuration options for a [`CardSession`](crate::CardSession)
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Scope of the resource manager context
    pub scope: Scope,

    /// Sharing mode for card connections
    pub share_mode: ShareMode,

    /// Protocols offered to the platform on connect
    pub protocols: PreferredProtocols,

    /// Disposition used by `disconnect` and on drop
    pub disposition: Disposition,

    /// Size of the probe buffer handed to each transmit
    pub response_buffer_len: usize,

    /// Size of the probe buffer handed to the status query
    pub atr_buffer_len: usize,

    /// Class byte of the GET RESPONSE follow-up
    pub get_response_cla: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scope: Scope::System,
            share_mode: ShareMode::Shared,
            protocols: PreferredProtocols::Any,
            disposition: Disposition::LeaveCard,
            response_buffer_len: MAX_SHORT_RESPONSE,
            atr_buffer_len: MAX_SHORT_RESPONSE,
            get_response_cla: 0x00,
        }
    }
}

impl SessionConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context scope
    pub const fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the sharing mode
    pub const fn with_share_mode(mut self, mode: ShareMode) -> Self {
        self.share_mode = mode;
        self
    }

    /// Set the preferred protocols
    pub const fn with_protocols(mut self, protocols: PreferredProtocols) -> Self {
        self.protocols = protocols;
        self
    }

    /// Set the disconnect disposition
    pub const fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    /// Set the response probe buffer size
    pub const fn with_response_buffer_len(mut self, len: usize) -> Self {
        self.response_buffer_len = len;
        self
    }

    /// Set the ATR probe buffer size
    pub const fn with_atr_buffer_len(mut self, len: usize) -> Self {
        self.atr_buffer_len = len;
        self
    }

    /// Set the class byte used for GET RESPONSE
    pub const fn with_get_response_cla(mut self, cla: u8) -> Self {
        self.get_response_cla = cla;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.scope, Scope::System);
        assert_eq!(config.share_mode, ShareMode::Shared);
        assert_eq!(config.protocols, PreferredProtocols::Any);
        assert_eq!(config.disposition, Disposition::LeaveCard);
        assert_eq!(config.response_buffer_len, 255);
        assert_eq!(config.atr_buffer_len, 255);
        assert_eq!(config.get_response_cla, 0x00);
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new()
            .with_scope(Scope::User)
            .with_share_mode(ShareMode::Exclusive)
            .with_protocols(PreferredProtocols::T1)
            .with_disposition(Disposition::ResetCard)
            .with_response_buffer_len(258)
            .with_atr_buffer_len(33)
            .with_get_response_cla(0x80);

        assert_eq!(config.scope, Scope::User);
        assert_eq!(config.share_mode, ShareMode::Exclusive);
        assert_eq!(config.protocols, PreferredProtocols::T1);
        assert_eq!(config.disposition, Disposition::ResetCard);
        assert_eq!(config.response_buffer_len, 258);
        assert_eq!(config.atr_buffer_len, 33);
        assert_eq!(config.get_response_cla, 0x80);
    }

    #[cfg(feature = "pcsc")]
    #[test]
    fn test_pcsc_conversions() {
        assert_eq!(pcsc::Scope::from(Scope::User), pcsc::Scope::User);
        assert_eq!(pcsc::Scope::from(Scope::System), pcsc::Scope::System);
        assert_eq!(
            pcsc::ShareMode::from(ShareMode::Exclusive),
            pcsc::ShareMode::Exclusive
        );
        assert_eq!(pcsc::Protocols::from(PreferredProtocols::T1), pcsc::Protocols::T1);
        assert_eq!(pcsc::Protocols::from(PreferredProtocols::Any), pcsc::Protocols::ANY);
        assert_eq!(
            pcsc::Disposition::from(Disposition::LeaveCard),
            pcsc::Disposition::LeaveCard
        );
        assert_eq!(
            pcsc::Disposition::from(Disposition::UnpowerCard),
            pcsc::Disposition::UnpowerCard
        );
    }
}
