//! Bounded FIFO of undelivered pushes.
//!
//! When full, the oldest push is evicted to make room. Consumers drain what
//! is queued before they see the closure reason.

use std::collections::VecDeque;

use serde_json::Value;
use tokio::sync::{Mutex, Notify};

use mirai_core::error::Result;

use crate::session::connection::CloseReason;

pub struct PushQueue {
    capacity: usize,
    state: Mutex<QueueState>,
    notify: Notify,
}

#[derive(Default)]
struct QueueState {
    frames: VecDeque<Value>,
    closed: Option<CloseReason>,
    evicted: u64,
}

impl PushQueue {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            state: Mutex::new(QueueState {
                frames: VecDeque::with_capacity(capacity),
                ..QueueState::default()
            }),
            notify: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.frames.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Total pushes dropped because the queue was full.
    pub async fn evicted(&self) -> u64 {
        self.state.lock().await.evicted
    }

    pub async fn push(&self, payload: Value) {
        {
            let mut st = self.state.lock().await;
            if st.closed.is_some() {
                tracing::debug!("push after close; dropping");
                return;
            }
            if st.frames.len() >= self.capacity {
                if let Some(dropped) = st.frames.pop_front() {
                    st.evicted += 1;
                    let dropped_type = dropped
                        .get("type")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or("?");
                    tracing::warn!(
                        capacity = self.capacity,
                        dropped_type,
                        "push buffer full; evicting oldest"
                    );
                }
            }
            st.frames.push_back(payload);
        }
        self.notify.notify_waiters();
    }

    /// Oldest queued push, waiting for one if the queue is empty.
    pub async fn pop(&self) -> Result<Value> {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // register before checking so a push in between is not missed
            notified.as_mut().enable();

            {
                let mut st = self.state.lock().await;
                if let Some(frame) = st.frames.pop_front() {
                    return Ok(frame);
                }
                if let Some(reason) = &st.closed {
                    return Err(reason.to_error());
                }
            }

            notified.await;
        }
    }

    /// Stop accepting pushes and wake all waiters. The first reason sticks.
    pub async fn close(&self, reason: CloseReason) {
        {
            let mut st = self.state.lock().await;
            if st.closed.is_none() {
                st.closed = Some(reason);
            }
        }
        self.notify.notify_waiters();
    }
}
