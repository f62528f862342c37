//! Session plumbing: one socket, many concurrent callers.
//!
//! A single reader task owns the read half of the transport and routes every
//! inbound frame. Replies go straight to the caller that issued the matching
//! sync id; pushes land in a bounded queue; the handshake fills in the
//! session token.

pub mod connection;
pub mod push_queue;
pub mod sync_id;
pub mod target;

pub use connection::{CloseReason, Connection};
pub use push_queue::PushQueue;
pub use sync_id::SyncIds;
pub use target::ConnectTarget;

/// Default number of undelivered pushes kept before the oldest is dropped.
pub const DEFAULT_PUSH_BUFFER_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub push_buffer_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            push_buffer_capacity: DEFAULT_PUSH_BUFFER_CAPACITY,
        }
    }
}
