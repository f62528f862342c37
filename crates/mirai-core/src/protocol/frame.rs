//! Inbound/outbound frame envelopes (JSON text frames).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MiraiError, Result};

/// Command payload as built by callers. The sync id is attached on send.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub command: String,
    pub sub_command: Option<String>,
    pub content: Value,
}

impl Command {
    pub fn new(command: impl Into<String>, content: Value) -> Self {
        Self {
            command: command.into(),
            sub_command: None,
            content,
        }
    }

    pub fn with_sub_command(mut self, sub_command: impl Into<String>) -> Self {
        self.sub_command = Some(sub_command.into());
        self
    }

    /// Attach a sync id, producing the frame written to the socket.
    pub fn to_frame(&self, sync_id: u64) -> OutboundFrame<'_> {
        OutboundFrame {
            sync_id,
            command: &self.command,
            sub_command: self.sub_command.as_deref(),
            content: &self.content,
        }
    }
}

/// Outbound envelope: `{syncId, command, subCommand, content}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundFrame<'a> {
    pub sync_id: u64,
    pub command: &'a str,
    pub sub_command: Option<&'a str>,
    pub content: &'a Value,
}

impl OutboundFrame<'_> {
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| MiraiError::MalformedFrame(format!("encode failed: {e}")))
    }
}

/// Inbound envelope: `{syncId: "<string>", data: {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundFrame {
    #[serde(rename = "syncId")]
    pub sync_id: String,
    #[serde(default)]
    pub data: Value,
}

/// Classification of an inbound frame by its `syncId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameClass {
    /// First frame after connect; `data.session` holds the token.
    Handshake,
    /// Answer to the command issued with this id.
    Reply(u64),
    /// Server-initiated notification (negative sentinel id).
    Push,
    /// `syncId` fits no other class.
    Unrecognized,
}

impl InboundFrame {
    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| MiraiError::MalformedFrame(format!("invalid frame json: {e}")))
    }

    pub fn classify(&self) -> FrameClass {
        if self.sync_id.is_empty() {
            return FrameClass::Handshake;
        }
        match self.sync_id.parse::<i64>() {
            Ok(n) if n < 0 => FrameClass::Push,
            // only the canonical decimal form matches an issued id
            Ok(n) if self.is_reply_to(n.unsigned_abs()) => FrameClass::Reply(n.unsigned_abs()),
            _ => FrameClass::Unrecognized,
        }
    }

    /// Reply predicate: replies echo the issued id as its decimal string.
    pub fn is_reply_to(&self, sync_id: u64) -> bool {
        self.sync_id == sync_id.to_string()
    }

    /// Session token carried by the handshake frame.
    pub fn session_key(&self) -> Option<&str> {
        self.data.get("session").and_then(Value::as_str)
    }
}
