#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use mirai_core::protocol::{Command, FrameClass, InboundFrame};

#[test]
fn outbound_frame_shape() {
    let cmd = Command::new("sendGroupMessage", json!({ "target": 111, "messageChain": [] }));
    let text = cmd.to_frame(233).encode().unwrap();
    let v: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        v,
        json!({
            "syncId": 233,
            "command": "sendGroupMessage",
            "subCommand": null,
            "content": { "target": 111, "messageChain": [] }
        })
    );

    let cmd = Command::new("file_list", json!({})).with_sub_command("list");
    let v: Value = serde_json::from_str(&cmd.to_frame(1).encode().unwrap()).unwrap();
    assert_eq!(v["subCommand"], "list");
}

#[test]
fn classify_inbound_frames() {
    let handshake = InboundFrame::decode(r#"{"syncId":"","data":{"code":0,"session":"SESSION"}}"#).unwrap();
    assert_eq!(handshake.classify(), FrameClass::Handshake);
    assert_eq!(handshake.session_key(), Some("SESSION"));

    let reply = InboundFrame::decode(r#"{"syncId":"233","data":{"code":0,"messageId":42}}"#).unwrap();
    assert_eq!(reply.classify(), FrameClass::Reply(233));
    assert!(reply.is_reply_to(233));
    assert!(!reply.is_reply_to(234));

    let push = InboundFrame::decode(r#"{"syncId":"-1","data":{"type":"BotOnlineEvent","qq":1}}"#).unwrap();
    assert_eq!(push.classify(), FrameClass::Push);

    let odd = InboundFrame::decode(r#"{"syncId":"abc","data":{}}"#).unwrap();
    assert_eq!(odd.classify(), FrameClass::Unrecognized);
}

#[test]
fn non_canonical_reply_ids_are_unrecognized() {
    for sync_id in ["+233", "0233", " 233", "233.0"] {
        let frame = InboundFrame::decode(&json!({ "syncId": sync_id, "data": {} }).to_string()).unwrap();
        assert_eq!(frame.classify(), FrameClass::Unrecognized, "{sync_id:?}");
        assert!(!frame.is_reply_to(233));
    }

    let zero = InboundFrame::decode(r#"{"syncId":"0","data":{}}"#).unwrap();
    assert_eq!(zero.classify(), FrameClass::Reply(0));
}

#[test]
fn malformed_frame_is_an_error() {
    assert!(InboundFrame::decode("not json").is_err());
    assert!(InboundFrame::decode(r#"{"data":{}}"#).is_err());
}
