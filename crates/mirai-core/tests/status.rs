#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use mirai_core::protocol::check_status;
use mirai_core::{FaultKind, MiraiError};

#[test]
fn documented_codes_map_to_faults() {
    let table = [
        (1, FaultKind::WrongVerifyKey),
        (2, FaultKind::BotNotExist),
        (3, FaultKind::InvalidSession),
        (4, FaultKind::InactiveSession),
        (5, FaultKind::TargetNotExist),
        (6, FaultKind::FileNotExist),
        (10, FaultKind::NoPermission),
        (20, FaultKind::BotMuted),
        (30, FaultKind::MessageTooLong),
        (400, FaultKind::BadRequest),
    ];
    assert_eq!(table.len(), FaultKind::ALL.len());

    for (code, kind) in table {
        let payload = json!({ "code": code, "msg": "failed", "extra": [1, 2] });
        let err = check_status(payload.clone()).expect_err("non-zero status must fail");
        assert_eq!(err.fault_kind(), Some(kind), "code={code}");
        assert_eq!(err.payload(), Some(&payload), "code={code}");
        assert_eq!(kind.code(), code);
        assert_eq!(FaultKind::from_code(code), Some(kind));
    }
}

#[test]
fn zero_and_absent_status_pass_through() {
    let ok = json!({ "code": 0, "msg": "", "messageId": 42 });
    assert_eq!(check_status(ok.clone()).unwrap(), ok);

    let no_code = json!({ "data": { "type": "FriendMessage" } });
    assert_eq!(check_status(no_code.clone()).unwrap(), no_code);
}

#[test]
fn undocumented_code_is_not_swallowed() {
    let payload = json!({ "code": 7, "msg": "??" });
    let err = check_status(payload.clone()).unwrap_err();
    match err {
        MiraiError::UnknownStatus { code, payload: p } => {
            assert_eq!(code, 7);
            assert_eq!(p, payload);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_integer_code_is_malformed() {
    let err = check_status(json!({ "code": "5" })).unwrap_err();
    assert!(matches!(err, MiraiError::MalformedReply(_)));
}
