//! Wire protocol: command/reply/push frames and reply status checking.
//!
//! One socket carries three inbound frame classes, told apart purely by the
//! `syncId` field:
//! - handshake: empty string, first frame after connect, carries the session token
//! - reply: decimal string of a previously issued non-negative sync id
//! - push: decimal string of a negative sentinel (`"-1"`)
//!
//! Parsers are panic-free; malformed frames are reported as `MiraiError`.

pub mod frame;
pub mod status;

pub use frame::{Command, FrameClass, InboundFrame, OutboundFrame};
pub use status::check_status;
