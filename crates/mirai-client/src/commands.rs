//! Convenience commands built on `Client::send`.

use serde_json::{json, Value};

use mirai_core::entity::{Entity, Message, MessageChain};
use mirai_core::error::{FaultKind, MiraiError, Result};
use mirai_core::protocol::Command;

use crate::client::Client;

/// Who a chat message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    Friend(i64),
    Group(i64),
    /// Temporary session with a group member.
    Temp { qq: i64, group: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeKind {
    Friend,
    Group,
    Stranger,
}

impl NudgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeKind::Friend => "Friend",
            NudgeKind::Group => "Group",
            NudgeKind::Stranger => "Stranger",
        }
    }
}

impl MessageTarget {
    fn to_command(self, chain: &MessageChain) -> Command {
        let message_chain = chain.to_json();
        match self {
            MessageTarget::Friend(target) => Command::new(
                "sendFriendMessage",
                json!({ "target": target, "messageChain": message_chain }),
            ),
            MessageTarget::Group(target) => Command::new(
                "sendGroupMessage",
                json!({ "target": target, "messageChain": message_chain }),
            ),
            MessageTarget::Temp { qq, group } => Command::new(
                "sendTempMessage",
                json!({ "qq": qq, "group": group, "messageChain": message_chain }),
            ),
        }
    }
}

fn message_id(reply: &Value) -> Result<i64> {
    reply
        .get("messageId")
        .and_then(Value::as_i64)
        .ok_or_else(|| MiraiError::MalformedReply(format!("reply without messageId: {reply}")))
}

impl Client {
    pub async fn send_message(
        &self,
        target: MessageTarget,
        message: impl Into<MessageChain>,
    ) -> Result<i64> {
        let chain = message.into();
        let reply = self.send(&target.to_command(&chain)).await?;
        message_id(&reply)
    }

    pub async fn send_friend_message(&self, friend: i64, message: impl Into<MessageChain>) -> Result<i64> {
        self.send_message(MessageTarget::Friend(friend), message).await
    }

    pub async fn send_group_message(&self, group: i64, message: impl Into<MessageChain>) -> Result<i64> {
        self.send_message(MessageTarget::Group(group), message).await
    }

    pub async fn send_temp_message(
        &self,
        qq: i64,
        group: i64,
        message: impl Into<MessageChain>,
    ) -> Result<i64> {
        self.send_message(MessageTarget::Temp { qq, group }, message).await
    }

    pub async fn send_nudge(&self, target: i64, subject: i64, kind: NudgeKind) -> Result<i64> {
        let command = Command::new(
            "sendNudge",
            json!({ "target": target, "subject": subject, "kind": kind.as_str() }),
        );
        let reply = self.send(&command).await?;
        message_id(&reply)
    }

    pub async fn recall(&self, message_id: i64) -> Result<()> {
        self.send(&Command::new("recall", json!({ "target": message_id })))
            .await
            .map(|_| ())
    }

    /// Fetch a cached message. `None` when the peer no longer has it.
    pub async fn message_from_id(&self, id: i64) -> Result<Option<Message>> {
        let reply = match self
            .send(&Command::new("messageFromId", json!({ "id": id })))
            .await
        {
            Ok(reply) => reply,
            Err(e) if e.fault_kind() == Some(FaultKind::TargetNotExist) => return Ok(None),
            Err(e) => return Err(e),
        };

        let data = reply
            .get("data")
            .ok_or_else(|| MiraiError::MalformedReply("messageFromId reply without data".into()))?;
        Message::from_json(data).map(Some)
    }
}
