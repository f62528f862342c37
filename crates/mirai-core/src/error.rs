//! Shared error type across mirai crates.

use serde_json::Value;
use thiserror::Error;

/// Faults reported by the peer through the `code` field of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Wrong verify key (1).
    WrongVerifyKey,
    /// The bot does not exist (2).
    BotNotExist,
    /// Session invalid or missing (3).
    InvalidSession,
    /// Session not authenticated / not activated (4).
    InactiveSession,
    /// Target of the command does not exist (5).
    TargetNotExist,
    /// Referenced file does not exist (6).
    FileNotExist,
    /// The bot lacks permission for the operation (10).
    NoPermission,
    /// The bot is muted in the target group (20).
    BotMuted,
    /// Message too long (30).
    MessageTooLong,
    /// Malformed request, e.g. bad arguments (400).
    BadRequest,
}

impl FaultKind {
    pub const ALL: [FaultKind; 10] = [
        FaultKind::WrongVerifyKey,
        FaultKind::BotNotExist,
        FaultKind::InvalidSession,
        FaultKind::InactiveSession,
        FaultKind::TargetNotExist,
        FaultKind::FileNotExist,
        FaultKind::NoPermission,
        FaultKind::BotMuted,
        FaultKind::MessageTooLong,
        FaultKind::BadRequest,
    ];

    /// Look up the fault for a non-zero status code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(FaultKind::WrongVerifyKey),
            2 => Some(FaultKind::BotNotExist),
            3 => Some(FaultKind::InvalidSession),
            4 => Some(FaultKind::InactiveSession),
            5 => Some(FaultKind::TargetNotExist),
            6 => Some(FaultKind::FileNotExist),
            10 => Some(FaultKind::NoPermission),
            20 => Some(FaultKind::BotMuted),
            30 => Some(FaultKind::MessageTooLong),
            400 => Some(FaultKind::BadRequest),
            _ => None,
        }
    }

    /// Status code the peer uses for this fault.
    pub fn code(self) -> i64 {
        match self {
            FaultKind::WrongVerifyKey => 1,
            FaultKind::BotNotExist => 2,
            FaultKind::InvalidSession => 3,
            FaultKind::InactiveSession => 4,
            FaultKind::TargetNotExist => 5,
            FaultKind::FileNotExist => 6,
            FaultKind::NoPermission => 10,
            FaultKind::BotMuted => 20,
            FaultKind::MessageTooLong => 30,
            FaultKind::BadRequest => 400,
        }
    }

    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultKind::WrongVerifyKey => "WRONG_VERIFY_KEY",
            FaultKind::BotNotExist => "BOT_NOT_EXIST",
            FaultKind::InvalidSession => "INVALID_SESSION",
            FaultKind::InactiveSession => "INACTIVE_SESSION",
            FaultKind::TargetNotExist => "TARGET_NOT_EXIST",
            FaultKind::FileNotExist => "FILE_NOT_EXIST",
            FaultKind::NoPermission => "NO_PERMISSION",
            FaultKind::BotMuted => "BOT_MUTED",
            FaultKind::MessageTooLong => "MESSAGE_TOO_LONG",
            FaultKind::BadRequest => "BAD_REQUEST",
        }
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MiraiError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum MiraiError {
    /// The peer answered with a documented non-zero status.
    #[error("peer reported {kind}")]
    Fault { kind: FaultKind, payload: Value },
    /// The peer answered with a status outside the fault table.
    #[error("peer reported undocumented status {code}")]
    UnknownStatus { code: i64, payload: Value },
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    #[error("malformed reply: {0}")]
    MalformedReply(String),

    #[error("unknown {family} tag: {tag}")]
    UnknownTag { family: &'static str, tag: String },
    #[error("expected tag {expected}, got {found}")]
    TagMismatch { expected: &'static str, found: String },
    #[error("missing type tag for {0}")]
    MissingTag(&'static str),
    #[error("no alternative of {union} accepts a value of type {found}")]
    NoUnionCandidate { union: String, found: &'static str },
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: &'static str },

    #[error("connect failed: {0}")]
    Connect(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("connection closed")]
    ConnectionClosed,

    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl MiraiError {
    /// Fault kind for peer-reported faults, `None` for everything else.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            MiraiError::Fault { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Raw reply payload carried by status errors.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            MiraiError::Fault { payload, .. } | MiraiError::UnknownStatus { payload, .. } => {
                Some(payload)
            }
            _ => None,
        }
    }
}
