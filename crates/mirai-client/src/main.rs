//! mirai client
//!
//! Connects with the settings in `mirai.yaml` (or the path given as the first
//! argument) and logs every push until the peer closes or Ctrl-C.

use futures_util::StreamExt;
use tracing_subscriber::{fmt, EnvFilter};

use mirai_client::{config, Client, Push};
use mirai_core::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "mirai.yaml".to_owned());
    let cfg = config::load_from_file(&path)?;
    let client = Client::from_config(&cfg);

    tracing::info!(
        host = client.host(),
        port = client.port(),
        bot_id = client.bot_id(),
        "mirai-client starting"
    );

    let mut pushes = std::pin::pin!(client.pushes());
    loop {
        let next = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            next = pushes.next() => next,
        };
        match next {
            None => break,
            Some(Ok(Push::Message(msg))) => tracing::info!(
                kind = msg.tag(),
                sender = msg.sender().id(),
                text = msg.message_chain().first_plain_text(),
                "message"
            ),
            Some(Ok(Push::Event(event))) => tracing::info!(kind = event.tag(), "event"),
            Some(Ok(Push::Raw(payload))) => tracing::info!(%payload, "unrecognized push"),
            Some(Err(e)) => tracing::error!(error = %e, "push failed"),
        }
    }

    client.close().await
}
