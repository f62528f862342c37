//! WebSocket transport over `tokio-tungstenite`.

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::{self, Message};

use mirai_core::error::{MiraiError, Result};

use crate::session::ConnectTarget;
use crate::transport::{FrameSink, FrameSource};

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

pub struct WsSink {
    sink: SplitSink<WsStream, Message>,
}

pub struct WsSource {
    stream: SplitStream<WsStream>,
}

/// Open the single command-and-push socket for `target`.
pub async fn connect(target: &ConnectTarget) -> Result<(WsSink, WsSource)> {
    let url = target.url();
    let (stream, _response) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .map_err(|e| {
            MiraiError::Connect(format!("{}:{}: {e}", target.host, target.port))
        })?;
    let (sink, stream) = stream.split();
    Ok((WsSink { sink }, WsSource { stream }))
}

#[async_trait]
impl FrameSink for WsSink {
    async fn send_text(&mut self, text: String) -> Result<()> {
        self.sink
            .send(Message::Text(text))
            .await
            .map_err(|e| MiraiError::Transport(format!("send failed: {e}")))
    }

    async fn close(&mut self) -> Result<()> {
        match self.sink.close().await {
            Ok(()) => Ok(()),
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => Ok(()),
            Err(e) => Err(MiraiError::Transport(format!("close failed: {e}"))),
        }
    }
}

#[async_trait]
impl FrameSource for WsSource {
    async fn recv_text(&mut self) -> Option<Result<String>> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Some(Ok(text)),
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(?frame, "peer sent close frame");
                    return None;
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::warn!(len = data.len(), "ignoring binary frame");
                }
                // pings are answered by tungstenite itself
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
                Some(Err(tungstenite::Error::ConnectionClosed)) => return None,
                Some(Err(e)) => {
                    return Some(Err(MiraiError::Transport(format!("read failed: {e}"))));
                }
                None => return None,
            }
        }
    }
}
