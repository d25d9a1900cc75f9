//! Simulcast encoding layers, session description shaping and transceiver
//! binding for unified-plan peer connections.
//!
//! Nothing here performs I/O. The peer connection hands its transceivers in
//! through [`RtpTransport`](peer_connection::RtpTransport) and every
//! operation returns once the transceivers and senders hold their new state.
//!
//! ```
//! use rtc_simulcast::peer_connection::configuration::{BrowserCapabilities, SimulcastConfig};
//! use rtc_simulcast::peer_connection::TransceiverBinder;
//!
//! let binder = TransceiverBinder::new(BrowserCapabilities::chrome(120), SimulcastConfig::default());
//! let rids: Vec<_> = binder
//!     .policy()
//!     .simulcast_encodings()
//!     .iter()
//!     .map(|e| e.rid().clone())
//!     .collect();
//! assert_eq!(rids, ["1", "2", "3"]);
//! ```
#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub use {sdp, shared};

pub(crate) mod constants;
pub mod media_stream;
pub mod peer_connection;
pub mod rtp_transceiver;
