//! Transport layer.
//!
//! The session only needs to write and read whole text frames, so the socket
//! is hidden behind two small traits. `ws` speaks WebSocket to the peer;
//! `memory` is an in-process loopback with a scriptable peer end.

pub mod memory;
pub mod ws;

use async_trait::async_trait;

use mirai_core::error::Result;

/// Write half of a frame transport.
#[async_trait]
pub trait FrameSink: Send {
    async fn send_text(&mut self, text: String) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
}

/// Read half of a frame transport.
#[async_trait]
pub trait FrameSource: Send {
    /// Next text frame. `None` means the peer closed the connection in an
    /// orderly way; `Some(Err(_))` is an abrupt failure.
    async fn recv_text(&mut self) -> Option<Result<String>>;
}
