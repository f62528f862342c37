use serde::Deserialize;
use mirai_core::error::{MiraiError, Result};

use crate::session::{ConnectTarget, SessionOptions};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    pub connection: ConnectionSection,

    #[serde(default)]
    pub session: SessionSection,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MiraiError::UnsupportedVersion);
        }

        self.connection.validate()?;
        self.session.validate()?;

        Ok(())
    }

    pub fn target(&self) -> ConnectTarget {
        ConnectTarget {
            host: self.connection.host.clone(),
            port: self.connection.port,
            bot_id: self.connection.bot_id,
            verify_key: self.connection.verify_key.clone(),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            push_buffer_capacity: self.session.push_buffer_capacity,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub bot_id: i64,

    pub verify_key: String,
}

impl ConnectionSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(MiraiError::Config("connection.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(MiraiError::Config("connection.port must not be 0".into()));
        }
        if self.verify_key.is_empty() {
            return Err(MiraiError::Config(
                "connection.verify_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_push_buffer_capacity")]
    pub push_buffer_capacity: usize,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            push_buffer_capacity: default_push_buffer_capacity(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=10_000).contains(&self.push_buffer_capacity) {
            return Err(MiraiError::Config(
                "session.push_buffer_capacity must be between 1 and 10000".into(),
            ));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "localhost".into()
}
fn default_port() -> u16 {
    8080
}
fn default_push_buffer_capacity() -> usize {
    10
}
