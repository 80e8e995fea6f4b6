//! The platform smart card service a session runs on
//!
//! [`CardService`] mirrors the handful of resource manager calls a session
//! needs. Each call returns the raw [`StatusCode`] on failure; translating and
//! logging it is left to the session.

use std::fmt;

use crate::{
    config::{Disposition, PreferredProtocols, Scope, ShareMode},
    protocol::IoRequest,
    status::StatusCode,
};

/// Trait for resource manager backends
///
/// Context and connection handles are owned values: a backend releases the
/// underlying platform handle when it is given back through
/// [`release_context`](Self::release_context) or
/// [`disconnect`](Self::disconnect).
pub trait CardService: fmt::Debug {
    /// Resource manager context handle
    type Context;

    /// Reader connection handle
    type Connection;

    /// Acquire a resource manager context
    fn establish_context(&mut self, scope: Scope) -> Result<Self::Context, StatusCode>;

    /// Release a resource manager context
    fn release_context(&mut self, context: Self::Context) -> Result<(), StatusCode>;

    /// List attached readers as a NUL-delimited, double-NUL-terminated multi-string
    ///
    /// The backend sizes the buffer itself and hands ownership to the caller.
    fn list_readers(&mut self, context: &Self::Context) -> Result<Vec<u8>, StatusCode>;

    /// Connect to a reader, returning the handle and the raw negotiated protocol
    fn connect(
        &mut self,
        context: &Self::Context,
        reader: &str,
        share_mode: ShareMode,
        protocols: PreferredProtocols,
    ) -> Result<(Self::Connection, u32), StatusCode>;

    /// Close a reader connection
    fn disconnect(
        &mut self,
        connection: Self::Connection,
        disposition: Disposition,
    ) -> Result<(), StatusCode>;

    /// Query card status, writing the ATR into `atr` and returning its length
    ///
    /// The reader name reported alongside is not returned.
    fn status(&mut self, connection: &Self::Connection, atr: &mut [u8])
    -> Result<usize, StatusCode>;

    /// Exchange one APDU, writing the reply into `response` and returning its length
    fn transmit(
        &mut self,
        connection: &Self::Connection,
        io_request: IoRequest,
        command: &[u8],
        response: &mut [u8],
    ) -> Result<usize, StatusCode>;
}

#[cfg(feature = "pcsc")]
pub use self::platform::PcscService;

#[cfg(feature = "pcsc")]
mod platform {
    use std::ffi::CString;

    use pcsc::{Card, Context};
    use tracing::warn;

    use super::CardService;
    use crate::{
        config::{Disposition, PreferredProtocols, Scope, ShareMode},
        protocol::{IoRequest, Protocol},
        status::StatusCode,
    };

    /// [`CardService`] backed by the system PC/SC library
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PcscService;

    impl PcscService {
        /// Create a new PC/SC backend
        pub const fn new() -> Self {
            Self
        }
    }

    impl CardService for PcscService {
        type Context = Context;
        type Connection = Card;

        fn establish_context(&mut self, scope: Scope) -> Result<Context, StatusCode> {
            Ok(Context::establish(scope.into())?)
        }

        fn release_context(&mut self, context: Context) -> Result<(), StatusCode> {
            context.release().map_err(|(_, e)| e.into())
        }

        fn list_readers(&mut self, context: &Context) -> Result<Vec<u8>, StatusCode> {
            let len = context.list_readers_len()?;
            let mut buffer = vec![0u8; len];
            let used = context
                .list_readers(&mut buffer)?
                .map(|name| name.to_bytes().len() + 1)
                .sum::<usize>();
            // Drop any slack past the names and re-terminate the list.
            buffer.truncate(used);
            buffer.push(0);
            Ok(buffer)
        }

        fn connect(
            &mut self,
            context: &Context,
            reader: &str,
            share_mode: ShareMode,
            protocols: PreferredProtocols,
        ) -> Result<(Card, u32), StatusCode> {
            let reader = CString::new(reader).map_err(|_| StatusCode::UNKNOWN_READER)?;
            let card = context.connect(&reader, share_mode.into(), protocols.into())?;
            match card.status2_owned() {
                Ok(status) => {
                    let protocol = Protocol::from_pcsc(status.protocol2());
                    Ok((card, protocol.raw()))
                }
                Err(e) => {
                    // Dropping a `Card` resets it; leave the card as found instead.
                    if let Err((_, close)) = card.disconnect(pcsc::Disposition::LeaveCard) {
                        warn!("Failed to release card after status error: {close}");
                    }
                    Err(e.into())
                }
            }
        }

        fn disconnect(
            &mut self,
            connection: Card,
            disposition: Disposition,
        ) -> Result<(), StatusCode> {
            // A card still held after the retry is dropped, which resets it.
            connection
                .disconnect(disposition.into())
                .or_else(|(card, e)| {
                    warn!("Disconnect failed, retrying: {e}");
                    card.disconnect(disposition.into())
                })
                .map_err(|(_, e)| e.into())
        }

        fn status(&mut self, connection: &Card, atr: &mut [u8]) -> Result<usize, StatusCode> {
            let status = connection.status2_owned()?;
            let reported = status.atr();
            let target = atr
                .get_mut(..reported.len())
                .ok_or(StatusCode::INSUFFICIENT_BUFFER)?;
            target.copy_from_slice(reported);
            Ok(reported.len())
        }

        fn transmit(
            &mut self,
            connection: &Card,
            _io_request: IoRequest,
            command: &[u8],
            response: &mut [u8],
        ) -> Result<usize, StatusCode> {
            // The pcsc crate picks the PCI from the protocol it negotiated,
            // which is the one `io_request` was derived from.
            Ok(connection.transmit(command, response)?.len())
        }
    }
}
