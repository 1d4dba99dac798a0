//! Network parameter table.
//!
//! Every encode/decode call takes a [`Network`] explicitly; there is no
//! process-wide default beyond `Network::default()`.

#![forbid(unsafe_code)]

pub mod network;

pub use network::{KeyKind, Network, NetworkParams};
