//! Card session: one resource manager context and at most one reader connection

use std::fmt;

use tracing::{error, info, warn};

use crate::{
    apdu,
    config::SessionConfig,
    error::{Operation, SessionError},
    protocol::Protocol,
    reader::parse_reader_names,
    service::CardService,
    status::StatusCode,
};

/// An open reader connection and the protocol negotiated for it
///
/// Keeping both in one value means a protocol exists exactly when a
/// connection does.
struct ActiveConnection<C> {
    handle: C,
    protocol: Protocol,
    reader: String,
}

/// Session with a single card reader
///
/// The context is acquired on construction and released on drop. A reader
/// connection is acquired by [`connect`](Self::connect) and released by
/// [`disconnect`](Self::disconnect) or on drop.
pub struct CardSession<S: CardService> {
    /// Platform backend
    service: S,
    /// Resource manager context, if it could be established
    context: Option<S::Context>,
    /// Reader connection, if established
    connection: Option<ActiveConnection<S::Connection>>,
    /// Configuration
    config: SessionConfig,
}

impl<S: CardService> fmt::Debug for CardSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardSession")
            .field("service", &self.service)
            .field("has_context", &self.context.is_some())
            .field("reader", &self.reader_name())
            .field("protocol", &self.protocol())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(feature = "pcsc")]
impl CardSession<crate::service::PcscService> {
    /// Open a session on the system PC/SC service with the default configuration
    pub fn system() -> Self {
        Self::new(crate::service::PcscService::new())
    }
}

impl<S: CardService> CardSession<S> {
    /// Create a session with the default configuration
    ///
    /// A context that cannot be established is logged and the session is
    /// still returned; operations on it then fail with
    /// [`SessionError::NoContext`]. Use [`try_new`](Self::try_new) to get the
    /// failure instead.
    pub fn new(service: S) -> Self {
        Self::with_config(service, SessionConfig::default())
    }

    /// Create a session with a custom configuration
    pub fn with_config(service: S, config: SessionConfig) -> Self {
        Self::open(service, config).0
    }

    /// Create a session, failing if the context cannot be established
    pub fn try_new(service: S, config: SessionConfig) -> Result<Self, SessionError> {
        match Self::open(service, config) {
            (session, None) => Ok(session),
            (_, Some(status)) => Err(SessionError::platform(Operation::EstablishContext, status)),
        }
    }

    fn open(mut service: S, config: SessionConfig) -> (Self, Option<StatusCode>) {
        let (context, status) = match service.establish_context(config.scope) {
            Ok(context) => {
                info!("Establish context");
                (Some(context), None)
            }
            Err(status) => {
                log_failure(Operation::EstablishContext, status);
                (None, Some(status))
            }
        };

        let session = Self {
            service,
            context,
            connection: None,
            config,
        };
        (session, status)
    }

    /// List the names of all attached readers, in platform order
    ///
    /// No readers attached yields an empty list.
    pub fn list_readers(&mut self) -> Result<Vec<String>, SessionError> {
        let context = self.context.as_ref().ok_or_else(no_context)?;

        let buffer = match self.service.list_readers(context) {
            Ok(buffer) => buffer,
            Err(StatusCode::NO_READERS_AVAILABLE) => {
                info!("No readers available");
                return Ok(Vec::new());
            }
            Err(status) => return Err(failure(Operation::ListReaders, status)),
        };

        let readers = parse_reader_names(&buffer);
        for name in &readers {
            info!(reader = %name, "Reader: {name}");
        }

        Ok(readers)
    }

    /// Connect to a reader by name
    ///
    /// The name is not checked against [`list_readers`](Self::list_readers).
    /// An existing connection is closed first. A protocol other than T=0 or
    /// T=1 still yields a connection, but transmits on it are refused.
    pub fn connect(&mut self, reader: &str) -> Result<Protocol, SessionError> {
        if reader.contains('\0') {
            error!(reader = ?reader, "Invalid reader name");
            return Err(SessionError::InvalidReaderName(reader.to_string()));
        }

        self.disconnect();

        let context = self.context.as_ref().ok_or_else(no_context)?;
        let (handle, raw_protocol) = self
            .service
            .connect(context, reader, self.config.share_mode, self.config.protocols)
            .map_err(|status| failure(Operation::Connect, status))?;

        info!(reader = %reader, "Connect reader: {reader}");

        let protocol = Protocol::from_raw(raw_protocol);
        match protocol {
            Protocol::T0 | Protocol::T1 => info!(%protocol, "Protocol: {protocol}"),
            Protocol::Unsupported(raw) => {
                warn!(protocol = raw, "Unsupported protocol {raw:#06x}, transmits disabled")
            }
        }

        self.connection = Some(ActiveConnection {
            handle,
            protocol,
            reader: reader.to_string(),
        });

        Ok(protocol)
    }

    /// Close the reader connection, if any
    ///
    /// Uses the configured disposition (leave the card powered by default).
    /// Platform failures are logged; the connection is considered closed
    /// either way.
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            match self
                .service
                .disconnect(connection.handle, self.config.disposition)
            {
                Ok(()) => info!(reader = %connection.reader, "Disconnect reader"),
                Err(status) => log_failure(Operation::Disconnect, status),
            }
        }
    }

    /// Read the ATR of the inserted card
    pub fn atr(&mut self) -> Result<Vec<u8>, SessionError> {
        let connection = self.connection.as_ref().ok_or_else(not_connected)?;

        let mut atr = vec![0u8; self.config.atr_buffer_len];
        let len = self
            .service
            .status(&connection.handle, &mut atr)
            .map_err(|status| failure(Operation::Status, status))?;
        atr.truncate(len);

        info!(atr = %hex::encode(&atr), "Atr");
        Ok(atr)
    }

    /// Send one APDU and return the card's response
    ///
    /// If the response ends in `61 XX`, a single GET RESPONSE for `XX` bytes is
    /// issued and its reply returned instead. That reply is not inspected
    /// again. If the follow-up fails, the first response is discarded.
    pub fn send_command(&mut self, command: &[u8]) -> Result<Vec<u8>, SessionError> {
        info!(command = %hex::encode(command), "Command");

        let response = self.exchange(command, Operation::Transmit)?;

        match apdu::pending_bytes(&response) {
            Some(le) => {
                let get_response = apdu::get_response(self.config.get_response_cla, le);
                info!(command = %hex::encode(get_response), "Get response");
                self.exchange(&get_response, Operation::GetResponse)
            }
            None => Ok(response),
        }
    }

    /// Alias of [`send_command`](Self::send_command)
    pub fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>, SessionError> {
        self.send_command(command)
    }

    /// One raw transmit with the negotiated I/O parameters
    fn exchange(
        &mut self,
        command: &[u8],
        operation: Operation,
    ) -> Result<Vec<u8>, SessionError> {
        let connection = self.connection.as_ref().ok_or_else(not_connected)?;
        let io_request = connection.protocol.io_request().ok_or_else(|| {
            let raw = connection.protocol.raw();
            error!(protocol = raw, "No I/O parameters for protocol {raw:#06x}");
            SessionError::UnsupportedProtocol(raw)
        })?;

        let mut response = vec![0u8; self.config.response_buffer_len];
        let len = self
            .service
            .transmit(&connection.handle, io_request, command, &mut response)
            .map_err(|status| failure(operation, status))?;
        response.truncate(len);

        info!(response = %hex::encode(&response), "Response");
        Ok(response)
    }

    /// Name of the connected reader
    pub fn reader_name(&self) -> Option<&str> {
        self.connection.as_ref().map(|c| c.reader.as_str())
    }

    /// Protocol of the active connection
    pub fn protocol(&self) -> Option<Protocol> {
        self.connection.as_ref().map(|c| c.protocol)
    }

    /// Check if a reader connection is active
    pub const fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Check if the resource manager context was established
    pub const fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Session configuration
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The platform backend
    pub const fn service(&self) -> &S {
        &self.service
    }
}

impl<S: CardService> Drop for CardSession<S> {
    fn drop(&mut self) {
        self.disconnect();

        if let Some(context) = self.context.take() {
            if let Err(status) = self.service.release_context(context) {
                log_failure(Operation::ReleaseContext, status);
            }
            info!("Release context");
        }
    }
}

fn log_failure(operation: Operation, status: StatusCode) {
    error!(
        operation = operation.function(),
        status = status.name(),
        code = status.raw(),
        "Error {operation}: {}",
        status.name()
    );
}

fn failure(operation: Operation, status: StatusCode) -> SessionError {
    log_failure(operation, status);
    SessionError::platform(operation, status)
}

fn no_context() -> SessionError {
    error!("No resource manager context");
    SessionError::NoContext
}

fn not_connected() -> SessionError {
    error!("Not connected to a reader");
    SessionError::NotConnected
}
