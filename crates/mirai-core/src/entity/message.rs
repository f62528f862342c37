//! Chat messages pushed by the peer (and returned by `messageFromId`).

use crate::entity::common::{Client, Friend, Member};
use crate::entity::element::MessageChain;

entity! {
    tagged
    struct FriendMessage {
        sender: Friend,
        message_chain: MessageChain,
    }
}

entity! {
    tagged
    struct GroupMessage {
        sender: Member,
        message_chain: MessageChain,
    }
}

entity! {
    tagged
    /// Temporary session message from a group member who is not a friend.
    struct TempMessage {
        sender: Member,
        message_chain: MessageChain,
    }
}

entity! {
    tagged
    struct StrangerMessage {
        sender: Friend,
        message_chain: MessageChain,
    }
}

entity! {
    tagged
    /// Message sent from another client of the same account.
    struct OtherClientMessage {
        sender: Client,
        message_chain: MessageChain,
    }
}

family! {
    /// A received message, tagged by sender kind.
    enum Message {
        FriendMessage,
        GroupMessage,
        TempMessage,
        StrangerMessage,
        OtherClientMessage,
    }
}

/// Borrowed sender of a message: `Friend | Member | Client`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sender<'a> {
    Friend(&'a Friend),
    Member(&'a Member),
    Client(&'a Client),
}

impl Sender<'_> {
    pub fn id(&self) -> i64 {
        match self {
            Sender::Friend(f) => f.id,
            Sender::Member(m) => m.id,
            Sender::Client(c) => c.id,
        }
    }
}

impl Message {
    pub fn sender(&self) -> Sender<'_> {
        match self {
            Message::FriendMessage(m) => Sender::Friend(&m.sender),
            Message::GroupMessage(m) => Sender::Member(&m.sender),
            Message::TempMessage(m) => Sender::Member(&m.sender),
            Message::StrangerMessage(m) => Sender::Friend(&m.sender),
            Message::OtherClientMessage(m) => Sender::Client(&m.sender),
        }
    }

    pub fn message_chain(&self) -> &MessageChain {
        match self {
            Message::FriendMessage(m) => &m.message_chain,
            Message::GroupMessage(m) => &m.message_chain,
            Message::TempMessage(m) => &m.message_chain,
            Message::StrangerMessage(m) => &m.message_chain,
            Message::OtherClientMessage(m) => &m.message_chain,
        }
    }
}
