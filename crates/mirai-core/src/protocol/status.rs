//! Reply status -> fault mapping.

use serde_json::Value;

use crate::error::{FaultKind, MiraiError, Result};

/// Success status; an absent `code` field is treated the same way.
pub const STATUS_OK: i64 = 0;

/// Pass a reply payload through, or turn its non-zero `code` into a fault.
///
/// Some commands reply without any `code` field; those are returned as-is.
/// A code outside the fault table means the peer broke protocol and is
/// reported as `UnknownStatus` rather than swallowed.
pub fn check_status(payload: Value) -> Result<Value> {
    let code = match payload.get("code") {
        None | Some(Value::Null) => return Ok(payload),
        Some(code) => code.as_i64().ok_or_else(|| {
            MiraiError::MalformedReply(format!("non-integer status code: {code}"))
        })?,
    };

    if code == STATUS_OK {
        return Ok(payload);
    }

    match FaultKind::from_code(code) {
        Some(kind) => Err(MiraiError::Fault { kind, payload }),
        None => {
            tracing::error!(code, %payload, "peer replied with undocumented status");
            Err(MiraiError::UnknownStatus { code, payload })
        }
    }
}
