//! Message chain elements.

use serde_json::Value;

use crate::entity::schema::{json_type_name, FieldKind};
use crate::entity::{Entity, Wire};
use crate::error::{MiraiError, Result};

entity! {
    tagged
    /// Identifies the message a chain belongs to; always first in received chains.
    struct Source {
        id: i64,
        time: i64,
    }
}

entity! {
    tagged
    struct Quote {
        id: i64,
        group_id: i64,
        sender_id: i64,
        target_id: i64,
        origin: MessageChain,
    }
}

entity! {
    tagged
    struct At {
        target: i64,
        display: Option<String>,
    }
}

entity! {
    tagged
    struct AtAll {}
}

entity! {
    tagged
    struct Face {
        face_id: Option<i64>,
        name: Option<String>,
    }
}

entity! {
    tagged
    struct Plain {
        text: String,
    }
}

entity! {
    tagged
    struct Image {
        image_id: Option<String>,
        url: Option<String>,
        path: Option<String>,
        base64: Option<String>,
    }
}

entity! {
    tagged
    struct FlashImage {
        image_id: Option<String>,
        url: Option<String>,
        path: Option<String>,
        base64: Option<String>,
    }
}

entity! {
    tagged
    struct Voice {
        voice_id: Option<String>,
        url: Option<String>,
        path: Option<String>,
        base64: Option<String>,
        /// Duration in seconds.
        length: Option<i64>,
    }
}

entity! {
    tagged
    struct Xml {
        xml: String,
    }
}

entity! {
    tagged
    struct Json {
        json: String,
    }
}

entity! {
    tagged
    struct App {
        content: String,
    }
}

entity! {
    tagged
    struct Poke {
        name: String,
    }
}

entity! {
    tagged
    struct Dice {
        value: i64,
    }
}

entity! {
    tagged
    struct MarketFace {
        id: i64,
        name: String,
    }
}

entity! {
    tagged
    struct MusicShare {
        kind: String,
        title: String,
        summary: String,
        jump_url: String,
        picture_url: String,
        music_url: String,
        brief: String,
    }
}

entity! {
    untagged
    /// One forwarded message inside a `Forward` bundle.
    struct ForwardNode {
        sender_id: i64,
        time: i64,
        sender_name: String,
        message_chain: MessageChain,
        message_id: String,
    }
}

entity! {
    tagged
    struct Forward {
        node_list: Vec<ForwardNode>,
    }
}

entity! {
    tagged
    struct File {
        id: String,
        name: String,
        size: i64,
    }
}

entity! {
    tagged
    struct MiraiCode {
        code: String,
    }
}

family! {
    /// Any element of a message chain, tagged by `type`.
    enum MessageElement {
        Source,
        Quote,
        At,
        AtAll,
        Face,
        Plain,
        Image,
        FlashImage,
        Voice,
        Xml,
        Json,
        App,
        Poke,
        Dice,
        MarketFace,
        MusicShare,
        Forward,
        File,
        MiraiCode,
    }
}

impl Plain {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl At {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            display: None,
        }
    }
}

/// Ordered message content. Order is rendering order and survives the codec.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageChain(Vec<MessageElement>);

impl MessageChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: impl Into<MessageElement>) {
        self.0.push(element.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageElement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<MessageElement> {
        self.0
    }

    /// Trimmed text of the first `Plain` element, empty when there is none.
    pub fn first_plain_text(&self) -> &str {
        self.iter()
            .find_map(|e| match e {
                MessageElement::Plain(p) => Some(p.text.trim()),
                _ => None,
            })
            .unwrap_or("")
    }

    /// Whether an `At` element targets `id`.
    pub fn mentions(&self, id: i64) -> bool {
        self.iter()
            .any(|e| matches!(e, MessageElement::At(at) if at.target == id))
    }
}

impl Entity for MessageChain {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(Entity::to_json).collect())
    }

    fn from_json(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| MiraiError::TypeMismatch {
            expected: "MessageChain".to_owned(),
            found: json_type_name(value),
        })?;
        items
            .iter()
            .map(MessageElement::from_json)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl Wire for MessageChain {
    fn kind() -> FieldKind {
        FieldKind::Entity("MessageChain")
    }

    fn encode(&self) -> Value {
        self.to_json()
    }

    fn decode(value: &Value) -> Result<Self> {
        Self::from_json(value)
    }
}

impl From<Vec<MessageElement>> for MessageChain {
    fn from(elements: Vec<MessageElement>) -> Self {
        Self(elements)
    }
}

impl From<MessageElement> for MessageChain {
    fn from(element: MessageElement) -> Self {
        Self(vec![element])
    }
}

impl From<&str> for MessageChain {
    fn from(text: &str) -> Self {
        Self(vec![Plain::new(text).into()])
    }
}

impl From<String> for MessageChain {
    fn from(text: String) -> Self {
        Self(vec![Plain::new(text).into()])
    }
}

impl FromIterator<MessageElement> for MessageChain {
    fn from_iter<I: IntoIterator<Item = MessageElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MessageChain {
    type Item = MessageElement;
    type IntoIter = std::vec::IntoIter<MessageElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MessageChain {
    type Item = &'a MessageElement;
    type IntoIter = std::slice::Iter<'a, MessageElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
