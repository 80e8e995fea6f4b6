//! Smart card sessions over the PC/SC resource manager
//!
//! This crate wraps the platform smart card service in a [`CardSession`] that
//! owns one resource manager context and at most one reader connection. It can
//! list readers, connect, read the card's ATR and exchange APDUs. A response
//! ending in `61 XX` is followed by one GET RESPONSE automatically.
//!
//! Platform calls go through the [`CardService`] trait. [`PcscService`] is the
//! implementation on top of the system PC/SC library.
//!
//! # Features
//!
//! - `pcsc` (default): the [`PcscService`] backend, linking the system PC/SC library
//!
//! # Examples
//!
//! ```no_run
//! # #[cfg(feature = "pcsc")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cardlink_pcsc::CardSession;
//!
//! let mut session = CardSession::system();
//!
//! let readers = session.list_readers()?;
//! let Some(reader) = readers.first() else {
//!     println!("No readers found");
//!     return Ok(());
//! };
//!
//! session.connect(reader)?;
//! println!("ATR: {}", hex::encode_upper(session.atr()?));
//!
//! // SELECT by AID
//! let response = session.send_command(&hex::decode("00A4040008A000000003000000")?)?;
//! println!("Response: {}", hex::encode_upper(&response));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "pcsc"))]
//! # fn main() {}
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

pub mod apdu;
mod config;
mod error;
mod protocol;
pub mod reader;
mod service;
mod session;
mod status;

pub use apdu::StatusWord;
pub use config::{Disposition, PreferredProtocols, Scope, SessionConfig, ShareMode};
pub use error::{Operation, SessionError};
pub use protocol::{
    IoRequest, PROTOCOL_RAW, PROTOCOL_T0, PROTOCOL_T1, PROTOCOL_UNDEFINED, Protocol,
};
#[cfg(feature = "pcsc")]
pub use service::PcscService;
pub use service::CardService;
pub use session::CardSession;
pub use status::{STATUS_NAMES, StatusCode, UNKNOWN};
