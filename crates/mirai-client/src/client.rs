//! Bot-facing client: lazy connect, status-checked commands, typed pushes.

use std::sync::Arc;

use futures_util::stream::{self, Stream};
use serde_json::Value;
use tokio::sync::Mutex;

use mirai_core::entity::{Entity, Event, Message};
use mirai_core::error::{MiraiError, Result};
use mirai_core::protocol::{check_status, Command};

use crate::config::ClientConfig;
use crate::session::{ConnectTarget, Connection, SessionOptions};
use crate::transport::{ws, FrameSink, FrameSource};

/// One server-initiated notification, decoded by its `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Push {
    Message(Message),
    Event(Event),
    /// Tag belongs to neither family; left for the caller to interpret.
    Raw(Value),
}

impl Push {
    pub fn decode(payload: Value) -> Result<Self> {
        let tag = payload.get("type").and_then(Value::as_str);
        match tag {
            Some(tag) if Message::is_known_tag(tag) => Message::from_json(&payload).map(Push::Message),
            Some(tag) if Event::is_known_tag(tag) => Event::from_json(&payload).map(Push::Event),
            _ => Ok(Push::Raw(payload)),
        }
    }
}

pub struct Client {
    target: ConnectTarget,
    options: SessionOptions,
    conn: Mutex<Option<Arc<Connection>>>,
}

impl Client {
    /// Nothing is dialed until the first `send` or `receive`.
    pub fn new(target: ConnectTarget, options: SessionOptions) -> Self {
        Self {
            target,
            options,
            conn: Mutex::new(None),
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(cfg.target(), cfg.session_options())
    }

    /// Client already attached to `sink`/`source`. `target` is used for the
    /// accessors and for reconnecting after `close`.
    pub fn with_transport(
        target: ConnectTarget,
        sink: impl FrameSink + 'static,
        source: impl FrameSource + 'static,
        options: SessionOptions,
    ) -> Self {
        let conn = Connection::spawn(Box::new(sink), Box::new(source), &options);
        Self {
            target,
            options,
            conn: Mutex::new(Some(Arc::new(conn))),
        }
    }

    pub fn host(&self) -> &str {
        &self.target.host
    }

    pub fn port(&self) -> u16 {
        self.target.port
    }

    pub fn bot_id(&self) -> i64 {
        self.target.bot_id
    }

    pub fn verify_key(&self) -> &str {
        &self.target.verify_key
    }

    /// Token from the current connection's handshake, if any.
    pub async fn session_key(&self) -> Option<String> {
        self.conn.lock().await.as_ref().and_then(|c| c.session_key())
    }

    async fn connection(&self) -> Result<Arc<Connection>> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(Arc::clone(conn));
        }

        tracing::info!(
            host = %self.target.host,
            port = self.target.port,
            bot_id = self.target.bot_id,
            "connecting"
        );
        let (sink, source) = ws::connect(&self.target).await?;
        let conn = Arc::new(Connection::spawn(Box::new(sink), Box::new(source), &self.options));
        *slot = Some(Arc::clone(&conn));
        Ok(conn)
    }

    /// Issue `command` and return its reply payload once the status is clean.
    pub async fn send(&self, command: &Command) -> Result<Value> {
        let conn = self.connection().await?;
        let payload = conn.request(command).await?;
        check_status(payload)
    }

    /// Next push in arrival order.
    pub async fn receive(&self) -> Result<Push> {
        let conn = self.connection().await?;
        let payload = conn.next_push().await?;
        Push::decode(payload)
    }

    /// Pushes as a stream. Ends quietly on orderly closure; a transport
    /// failure is yielded once and then the stream ends. Decode errors for a
    /// single push are yielded and iteration continues.
    pub fn pushes(&self) -> impl Stream<Item = Result<Push>> + '_ {
        stream::unfold(Some(self), |state| async move {
            let client = state?;
            match client.receive().await {
                Ok(push) => Some((Ok(push), Some(client))),
                Err(MiraiError::ConnectionClosed) => None,
                Err(e) if ends_stream(&e) => Some((Err(e), None)),
                Err(e) => Some((Err(e), Some(client))),
            }
        })
    }

    /// Tear down the current connection. A later call connects afresh.
    pub async fn close(&self) -> Result<()> {
        let conn = self.conn.lock().await.take();
        match conn {
            Some(conn) => conn.close().await,
            None => Ok(()),
        }
    }
}

fn ends_stream(e: &MiraiError) -> bool {
    matches!(
        e,
        MiraiError::Transport(_) | MiraiError::Connect(_) | MiraiError::Fault { .. }
    )
}
