//! Multiplexed connection: one reader task, per-id reply mailboxes, and a
//! shared push queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;

use mirai_core::error::{MiraiError, Result};
use mirai_core::protocol::{check_status, Command, FrameClass, InboundFrame};

use crate::session::{PushQueue, SessionOptions, SyncIds};
use crate::transport::{FrameSink, FrameSource};

/// Why a connection stopped.
#[derive(Debug, Clone)]
pub enum CloseReason {
    /// Peer or caller closed the socket cleanly.
    Orderly,
    /// The transport failed mid-stream.
    Failed(String),
    /// The handshake carried a non-zero status; holds its payload.
    Rejected(Value),
}

impl CloseReason {
    pub fn to_error(&self) -> MiraiError {
        match self {
            CloseReason::Orderly => MiraiError::ConnectionClosed,
            CloseReason::Failed(reason) => MiraiError::Transport(reason.clone()),
            CloseReason::Rejected(payload) => match check_status(payload.clone()) {
                Err(e) => e,
                Ok(_) => MiraiError::ConnectionClosed,
            },
        }
    }
}

type Waiter = oneshot::Sender<Result<Value>>;

struct Shared {
    pending: DashMap<u64, Waiter>,
    pushes: PushQueue,
    session_key: watch::Sender<Option<String>>,
    closed: AtomicBool,
    close_reason: OnceLock<CloseReason>,
}

impl Shared {
    fn close_error(&self) -> MiraiError {
        self.close_reason
            .get()
            .map(CloseReason::to_error)
            .unwrap_or(MiraiError::ConnectionClosed)
    }

    async fn route(&self, frame: InboundFrame) {
        match frame.classify() {
            FrameClass::Handshake => self.on_handshake(frame.data),
            FrameClass::Reply(sync_id) => match self.pending.remove(&sync_id) {
                Some((_, waiter)) => {
                    if waiter.send(Ok(frame.data)).is_err() {
                        tracing::debug!(sync_id, "caller gone before reply arrived");
                    }
                }
                None => tracing::warn!(sync_id, "reply with no waiter; dropping"),
            },
            FrameClass::Push => self.pushes.push(frame.data).await,
            FrameClass::Unrecognized => {
                tracing::warn!(sync_id = %frame.sync_id, "unrecognized syncId; dropping");
            }
        }
    }

    fn on_handshake(&self, data: Value) {
        let session = data.get("session").and_then(Value::as_str).map(str::to_owned);
        match check_status(data) {
            Ok(_) => match session {
                Some(key) => {
                    tracing::info!("session established");
                    self.session_key.send_replace(Some(key));
                }
                None => tracing::warn!("handshake without session token"),
            },
            Err(e) => {
                tracing::error!(error = %e, "handshake rejected");
                if let Some(payload) = e.payload() {
                    let _ = self.close_reason.set(CloseReason::Rejected(payload.clone()));
                }
            }
        }
    }

    async fn shutdown(&self, reason: CloseReason) {
        let reason = self.close_reason.get_or_init(|| reason).clone();
        self.closed.store(true, Ordering::SeqCst);
        // wake anyone blocked on the session token
        self.session_key.send_modify(|_| {});

        match &reason {
            CloseReason::Orderly => tracing::info!("connection closed"),
            CloseReason::Failed(e) => tracing::error!(error = %e, "connection failed"),
            CloseReason::Rejected(_) => tracing::error!("connection closed after rejected handshake"),
        }

        self.pushes.close(reason.clone()).await;

        let ids: Vec<u64> = self.pending.iter().map(|e| *e.key()).collect();
        for id in ids {
            if let Some((_, waiter)) = self.pending.remove(&id) {
                let _ = waiter.send(Err(reason.to_error()));
            }
        }
    }
}

/// Drops the mailbox if the caller stops waiting.
struct PendingGuard<'a> {
    pending: &'a DashMap<u64, Waiter>,
    sync_id: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.remove(&self.sync_id);
    }
}

/// A live session over one transport.
///
/// Any number of tasks may call `request` and `next_push` concurrently. The
/// reader task is aborted when the connection is dropped.
pub struct Connection {
    sink: Mutex<Box<dyn FrameSink>>,
    shared: Arc<Shared>,
    sync_ids: SyncIds,
    session_rx: watch::Receiver<Option<String>>,
    reader: JoinHandle<()>,
}

impl Connection {
    pub fn spawn(
        sink: Box<dyn FrameSink>,
        source: Box<dyn FrameSource>,
        options: &SessionOptions,
    ) -> Self {
        let (session_key, session_rx) = watch::channel(None);
        let shared = Arc::new(Shared {
            pending: DashMap::new(),
            pushes: PushQueue::new(options.push_buffer_capacity),
            session_key,
            closed: AtomicBool::new(false),
            close_reason: OnceLock::new(),
        });
        let reader = tokio::spawn(read_loop(source, Arc::clone(&shared)));

        Self {
            sink: Mutex::new(sink),
            shared,
            sync_ids: SyncIds::new(),
            session_rx,
            reader,
        }
    }

    /// Send `command` under a fresh sync id and wait for its reply `data`.
    ///
    /// The status code is not inspected here.
    pub async fn request(&self, command: &Command) -> Result<Value> {
        let sync_id = self.sync_ids.issue();
        let text = command.to_frame(sync_id).encode()?;

        let (tx, rx) = oneshot::channel();
        if self.shared.pending.insert(sync_id, tx).is_some() {
            tracing::warn!(sync_id, "sync id reissued while still outstanding");
        }
        let _guard = PendingGuard {
            pending: &self.shared.pending,
            sync_id,
        };

        // checked after registering so shutdown either sees the mailbox or we see the flag
        if self.shared.closed.load(Ordering::SeqCst) {
            return Err(self.shared.close_error());
        }

        tracing::debug!(sync_id, command = %command.command, "send command");
        {
            let mut sink = self.sink.lock().await;
            sink.send_text(text).await?;
        }

        match rx.await {
            Ok(reply) => reply,
            Err(_) => Err(self.shared.close_error()),
        }
    }

    /// Next buffered push `data`, in arrival order.
    pub async fn next_push(&self) -> Result<Value> {
        self.shared.pushes.pop().await
    }

    pub fn push_queue(&self) -> &PushQueue {
        &self.shared.pushes
    }

    pub fn session_key(&self) -> Option<String> {
        self.session_rx.borrow().clone()
    }

    /// Wait until the handshake delivered a token or the connection ended.
    pub async fn wait_session_key(&self) -> Result<String> {
        let mut rx = self.session_rx.clone();
        loop {
            if let Some(key) = rx.borrow_and_update().clone() {
                return Ok(key);
            }
            if self.is_closed() {
                return Err(self.shared.close_error());
            }
            if rx.changed().await.is_err() {
                return Err(self.shared.close_error());
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Close the socket, clear the token, and fail everything still waiting.
    pub async fn close(&self) -> Result<()> {
        let closed = {
            let mut sink = self.sink.lock().await;
            sink.close().await
        };
        self.reader.abort();
        self.shared.session_key.send_replace(None);
        self.shared.shutdown(CloseReason::Orderly).await;
        closed
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn read_loop(mut source: Box<dyn FrameSource>, shared: Arc<Shared>) {
    let reason = loop {
        let text = match source.recv_text().await {
            None => break CloseReason::Orderly,
            Some(Err(MiraiError::Transport(reason))) => break CloseReason::Failed(reason),
            Some(Err(e)) => break CloseReason::Failed(e.to_string()),
            Some(Ok(text)) => text,
        };
        tracing::trace!(frame = %text, "recv frame");

        match InboundFrame::decode(&text) {
            Ok(frame) => shared.route(frame).await,
            Err(e) => tracing::warn!(error = %e, "dropping malformed frame"),
        }
    };
    shared.shutdown(reason).await;
}
