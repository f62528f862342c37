//! mirai core: runtime-free protocol primitives, error types, and entities.
//!
//! This crate defines the wire frames, the status-to-fault table, and the
//! polymorphic entity codec shared by the client and any tooling. It carries
//! no transport or async runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed frames
//! and unknown tags surface as `MiraiError` instead of crashing the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod entity;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{FaultKind, MiraiError, Result};
