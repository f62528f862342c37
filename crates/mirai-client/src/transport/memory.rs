//! In-process loopback transport.
//!
//! `pair()` returns the client's sink/source and a `PeerHandle` standing in
//! for the server: it sees every frame the client writes and decides what the
//! client reads next.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use mirai_core::error::{MiraiError, Result};

use crate::transport::{FrameSink, FrameSource};

enum PeerFrame {
    Text(String),
    Fail(String),
}

pub struct MemorySink {
    to_peer: Option<mpsc::UnboundedSender<String>>,
}

pub struct MemorySource {
    from_peer: mpsc::UnboundedReceiver<PeerFrame>,
}

/// Server end of a loopback pair. Dropping it closes the connection cleanly.
pub struct PeerHandle {
    to_client: mpsc::UnboundedSender<PeerFrame>,
    from_client: mpsc::UnboundedReceiver<String>,
}

pub fn pair() -> (MemorySink, MemorySource, PeerHandle) {
    let (to_peer, from_client) = mpsc::unbounded_channel();
    let (to_client, from_peer) = mpsc::unbounded_channel();
    (
        MemorySink {
            to_peer: Some(to_peer),
        },
        MemorySource { from_peer },
        PeerHandle {
            to_client,
            from_client,
        },
    )
}

#[async_trait]
impl FrameSink for MemorySink {
    async fn send_text(&mut self, text: String) -> Result<()> {
        let tx = self.to_peer.as_ref().ok_or(MiraiError::ConnectionClosed)?;
        tx.send(text)
            .map_err(|_| MiraiError::Transport("peer went away".into()))
    }

    async fn close(&mut self) -> Result<()> {
        self.to_peer = None;
        Ok(())
    }
}

#[async_trait]
impl FrameSource for MemorySource {
    async fn recv_text(&mut self) -> Option<Result<String>> {
        match self.from_peer.recv().await? {
            PeerFrame::Text(text) => Some(Ok(text)),
            PeerFrame::Fail(reason) => Some(Err(MiraiError::Transport(reason))),
        }
    }
}

impl PeerHandle {
    pub fn send_text(&self, text: impl Into<String>) -> Result<()> {
        self.to_client
            .send(PeerFrame::Text(text.into()))
            .map_err(|_| MiraiError::ConnectionClosed)
    }

    pub fn send_json(&self, frame: &Value) -> Result<()> {
        self.send_text(frame.to_string())
    }

    /// Make the client's next read fail as if the socket broke.
    pub fn fail(&self, reason: impl Into<String>) -> Result<()> {
        self.to_client
            .send(PeerFrame::Fail(reason.into()))
            .map_err(|_| MiraiError::ConnectionClosed)
    }

    /// Next frame written by the client; `None` once the client closed.
    pub async fn recv_text(&mut self) -> Option<String> {
        self.from_client.recv().await
    }

    pub async fn recv_json(&mut self) -> Option<Value> {
        let text = self.recv_text().await?;
        serde_json::from_str(&text).ok()
    }
}
