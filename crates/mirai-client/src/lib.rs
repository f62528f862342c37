//! mirai client library entry.
//!
//! This crate wires configuration, the transport seam, the multiplexed
//! session, and the bot-facing command surface into one `Client`. It is used
//! by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod commands;
pub mod config;
pub mod session;
pub mod transport;

pub use client::{Client, Push};
pub use commands::{MessageTarget, NudgeKind};
pub use session::{ConnectTarget, SessionOptions};
