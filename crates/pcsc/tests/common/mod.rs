//! Scripted card service shared by the integration tests

#![allow(dead_code, unreachable_pub)]

use std::{collections::VecDeque, sync::Arc};

use cardlink_pcsc::{
    CardService, Disposition, IoRequest, PreferredProtocols, Scope, ShareMode, StatusCode,
    reader::encode_reader_names,
};
use parking_lot::Mutex;

/// A platform call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EstablishContext(Scope),
    ReleaseContext(u32),
    ListReaders,
    Connect(String, ShareMode, PreferredProtocols),
    Disconnect(u32, Disposition),
    Status(u32),
    Transmit(u32, IoRequest, Vec<u8>),
}

/// Shared record of calls, readable after the session is gone
pub type Journal = Arc<Mutex<Vec<Call>>>;

/// Mock resource manager driven by canned answers
#[derive(Debug)]
pub struct MockService {
    journal: Journal,
    next_handle: u32,
    pub establish: Result<(), StatusCode>,
    pub readers: Result<Vec<u8>, StatusCode>,
    pub connect: Result<u32, StatusCode>,
    pub disconnect: Result<(), StatusCode>,
    pub atr: Result<Vec<u8>, StatusCode>,
    pub responses: VecDeque<Result<Vec<u8>, StatusCode>>,
}

impl MockService {
    /// A card on a T=1 connection with no scripted responses
    pub fn new() -> (Self, Journal) {
        let journal = Journal::default();
        let service = Self {
            journal: journal.clone(),
            next_handle: 1,
            establish: Ok(()),
            readers: Ok(encode_reader_names::<&str>(&[])),
            connect: Ok(cardlink_pcsc::PROTOCOL_T1),
            disconnect: Ok(()),
            atr: Ok(Vec::new()),
            responses: VecDeque::new(),
        };
        (service, journal)
    }

    pub fn with_readers(mut self, names: &[&str]) -> Self {
        self.readers = Ok(encode_reader_names(names));
        self
    }

    pub const fn with_protocol(mut self, raw: u32) -> Self {
        self.connect = Ok(raw);
        self
    }

    pub fn with_atr(mut self, atr: &[u8]) -> Self {
        self.atr = Ok(atr.to_vec());
        self
    }

    pub fn with_response(mut self, response: &[u8]) -> Self {
        self.responses.push_back(Ok(response.to_vec()));
        self
    }

    pub fn with_transmit_error(mut self, status: StatusCode) -> Self {
        self.responses.push_back(Err(status));
        self
    }

    fn record(&self, call: Call) {
        self.journal.lock().push(call);
    }
}

impl CardService for MockService {
    type Context = u32;
    type Connection = u32;

    fn establish_context(&mut self, scope: Scope) -> Result<u32, StatusCode> {
        self.record(Call::EstablishContext(scope));
        self.establish.map(|()| 0xC0)
    }

    fn release_context(&mut self, context: u32) -> Result<(), StatusCode> {
        self.record(Call::ReleaseContext(context));
        Ok(())
    }

    fn list_readers(&mut self, _context: &u32) -> Result<Vec<u8>, StatusCode> {
        self.record(Call::ListReaders);
        self.readers.clone()
    }

    fn connect(
        &mut self,
        _context: &u32,
        reader: &str,
        share_mode: ShareMode,
        protocols: PreferredProtocols,
    ) -> Result<(u32, u32), StatusCode> {
        self.record(Call::Connect(reader.to_string(), share_mode, protocols));
        let protocol = self.connect?;
        let handle = self.next_handle;
        self.next_handle += 1;
        Ok((handle, protocol))
    }

    fn disconnect(&mut self, connection: u32, disposition: Disposition) -> Result<(), StatusCode> {
        self.record(Call::Disconnect(connection, disposition));
        self.disconnect
    }

    fn status(&mut self, connection: &u32, atr: &mut [u8]) -> Result<usize, StatusCode> {
        self.record(Call::Status(*connection));
        let reported = self.atr.clone()?;
        let target = atr
            .get_mut(..reported.len())
            .ok_or(StatusCode::INSUFFICIENT_BUFFER)?;
        target.copy_from_slice(&reported);
        Ok(reported.len())
    }

    fn transmit(
        &mut self,
        connection: &u32,
        io_request: IoRequest,
        command: &[u8],
        response: &mut [u8],
    ) -> Result<usize, StatusCode> {
        self.record(Call::Transmit(*connection, io_request, command.to_vec()));
        let reply = self
            .responses
            .pop_front()
            .unwrap_or(Err(StatusCode::new(0x8010_0013)))?;
        let target = response
            .get_mut(..reply.len())
            .ok_or(StatusCode::INSUFFICIENT_BUFFER)?;
        target.copy_from_slice(&reply);
        Ok(reply.len())
    }
}

/// Transmit calls in the journal
pub fn transmitted(journal: &Journal) -> Vec<Vec<u8>> {
    journal
        .lock()
        .iter()
        .filter_map(|call| match call {
            Call::Transmit(_, _, command) => Some(command.clone()),
            _ => None,
        })
        .collect()
}

/// Number of journal entries matching a predicate
pub fn count(journal: &Journal, predicate: impl Fn(&Call) -> bool) -> usize {
    journal.lock().iter().filter(|call| predicate(call)).count()
}
