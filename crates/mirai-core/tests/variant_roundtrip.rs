//! One wire sample per concrete variant of every family, checked both ways.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeSet;
use std::fmt::Debug;

use serde_json::{json, Value};

use mirai_core::entity::{Entity, Event, Message, MessageElement};

fn friend() -> Value {
    json!({ "id": 1, "nickname": "alice", "remark": "ali" })
}

fn group() -> Value {
    json!({ "id": 100, "name": "rustaceans", "permission": "MEMBER" })
}

fn member(id: i64) -> Value {
    json!({
        "id": id,
        "memberName": "bob",
        "permission": "ADMINISTRATOR",
        "specialTitle": "",
        "joinTimestamp": 1650000000,
        "lastSpeakTimestamp": 1650000100,
        "muteTimeRemaining": 0,
        "group": group()
    })
}

fn client() -> Value {
    json!({ "id": 5, "platform": "MOBILE" })
}

fn chain(text: &str) -> Value {
    json!([
        { "type": "Source", "id": 7, "time": 1650000200 },
        { "type": "Plain", "text": text }
    ])
}

/// `encode(decode(w)) == w` and `decode(encode(x)) == x`; returns the tag.
fn round_trip<F>(wire: &Value, tag_of: fn(&F) -> &'static str) -> &'static str
where
    F: Entity + PartialEq + Debug,
{
    let decoded = F::from_json(wire).unwrap_or_else(|e| panic!("{}: {e}", wire["type"]));
    let encoded = decoded.to_json();
    assert_eq!(&encoded, wire, "re-encode of {}", wire["type"]);
    assert_eq!(F::from_json(&encoded).unwrap(), decoded, "decode of {}", wire["type"]);

    let tag = tag_of(&decoded);
    assert_eq!(wire["type"], tag);
    tag
}

fn covered<F>(samples: &[Value], tag_of: fn(&F) -> &'static str) -> BTreeSet<&'static str>
where
    F: Entity + PartialEq + Debug,
{
    samples.iter().map(|w| round_trip::<F>(w, tag_of)).collect()
}

fn all(tags: &'static [&'static str]) -> BTreeSet<&'static str> {
    tags.iter().copied().collect()
}

#[test]
fn every_message_variant_round_trips() {
    let samples = [
        json!({ "type": "FriendMessage", "sender": friend(), "messageChain": chain("hi") }),
        json!({ "type": "GroupMessage", "sender": member(2), "messageChain": chain("hi all") }),
        json!({ "type": "TempMessage", "sender": member(3), "messageChain": chain("psst") }),
        json!({ "type": "StrangerMessage", "sender": friend(), "messageChain": chain("hello?") }),
        json!({ "type": "OtherClientMessage", "sender": client(), "messageChain": chain("sync") }),
    ];

    assert_eq!(covered(&samples, Message::tag), all(Message::tags()));
}

#[test]
fn every_element_variant_round_trips() {
    let samples = [
        json!({ "type": "Source", "id": 7, "time": 1650000200 }),
        json!({
            "type": "Quote",
            "id": 6,
            "groupId": 100,
            "senderId": 2,
            "targetId": 100,
            "origin": [{ "type": "Plain", "text": "quoted" }]
        }),
        json!({ "type": "At", "target": 2, "display": "@bob" }),
        json!({ "type": "AtAll" }),
        json!({ "type": "Face", "faceId": 14, "name": "smile" }),
        json!({ "type": "Plain", "text": "text" }),
        json!({
            "type": "Image",
            "imageId": "{01E9451B-70ED-EAE3-B37C-101F1EEBF5B5}.jpg",
            "url": "http://host.invalid/a.jpg",
            "path": null,
            "base64": null
        }),
        json!({
            "type": "FlashImage",
            "imageId": null,
            "url": null,
            "path": "images/flash.png",
            "base64": null
        }),
        json!({
            "type": "Voice",
            "voiceId": "23C477720A37FEB6A9EE4BCCF654014F.amr",
            "url": "http://host.invalid/v.amr",
            "path": null,
            "base64": null,
            "length": 3
        }),
        json!({ "type": "Xml", "xml": "<msg/>" }),
        json!({ "type": "Json", "json": "{\"k\":1}" }),
        json!({ "type": "App", "content": "{}" }),
        json!({ "type": "Poke", "name": "ChuoYiChuo" }),
        json!({ "type": "Dice", "value": 4 }),
        json!({ "type": "MarketFace", "id": 123, "name": "wave" }),
        json!({
            "type": "MusicShare",
            "kind": "NeteaseCloudMusic",
            "title": "song",
            "summary": "artist",
            "jumpUrl": "http://host.invalid/j",
            "pictureUrl": "http://host.invalid/p.jpg",
            "musicUrl": "http://host.invalid/m.mp3",
            "brief": "[share] song"
        }),
        json!({
            "type": "Forward",
            "nodeList": [{
                "senderId": 2,
                "time": 1650000300,
                "senderName": "bob",
                "messageChain": [{ "type": "Plain", "text": "fwd" }],
                "messageId": "m-1"
            }]
        }),
        json!({ "type": "File", "id": "/a.txt", "name": "a.txt", "size": 1024 }),
        json!({ "type": "MiraiCode", "code": "[mirai:atall]" }),
    ];

    assert_eq!(covered(&samples, MessageElement::tag), all(MessageElement::tags()));
}

#[test]
fn every_event_variant_round_trips() {
    let samples = [
        json!({ "type": "BotOnlineEvent", "qq": 10001 }),
        json!({ "type": "BotOfflineEventActive", "qq": 10001 }),
        json!({ "type": "BotOfflineEventForce", "qq": 10001 }),
        json!({ "type": "BotOfflineEventDropped", "qq": 10001 }),
        json!({ "type": "BotReloginEvent", "qq": 10001 }),
        json!({ "type": "FriendInputStatusChangedEvent", "friend": friend(), "inputting": true }),
        json!({ "type": "FriendNickChangedEvent", "friend": friend(), "from": "alice", "to": "alicia" }),
        json!({
            "type": "BotGroupPermissionChangeEvent",
            "origin": "MEMBER",
            "current": "ADMINISTRATOR",
            "group": group()
        }),
        json!({ "type": "BotMuteEvent", "durationSeconds": 600, "operator": member(2) }),
        json!({ "type": "BotUnmuteEvent", "operator": member(2) }),
        json!({ "type": "BotJoinGroupEvent", "group": group(), "invitor": null }),
        json!({ "type": "BotLeaveEventActive", "group": group() }),
        json!({ "type": "BotLeaveEventKick", "group": group(), "operator": member(2) }),
        json!({
            "type": "GroupRecallEvent",
            "authorId": 3,
            "messageId": 77,
            "time": 1650000400,
            "group": group(),
            "operator": member(2)
        }),
        json!({
            "type": "FriendRecallEvent",
            "authorId": 1,
            "messageId": 78,
            "time": 1650000500,
            "operator": 1
        }),
        json!({
            "type": "NudgeEvent",
            "fromId": 1,
            "subject": { "id": 100, "kind": "Group" },
            "action": "poke",
            "suffix": "face",
            "target": 10001
        }),
        json!({
            "type": "GroupNameChangeEvent",
            "origin": "old",
            "current": "new",
            "group": group(),
            "operator": null
        }),
        json!({
            "type": "GroupEntranceAnnouncementChangeEvent",
            "origin": "",
            "current": "welcome",
            "group": group(),
            "operator": member(2)
        }),
        json!({
            "type": "GroupMuteAllEvent",
            "origin": false,
            "current": true,
            "group": group(),
            "operator": member(2)
        }),
        json!({
            "type": "GroupAllowAnonymousChatEvent",
            "origin": true,
            "current": false,
            "group": group(),
            "operator": null
        }),
        json!({
            "type": "GroupAllowConfessTalkEvent",
            "origin": false,
            "current": true,
            "group": group(),
            "isByBot": true
        }),
        json!({
            "type": "GroupAllowMemberInviteEvent",
            "origin": false,
            "current": true,
            "group": group(),
            "operator": member(2)
        }),
        json!({ "type": "MemberJoinEvent", "member": member(3), "invitor": member(2) }),
        json!({ "type": "MemberLeaveEventKick", "member": member(3), "operator": null }),
        json!({ "type": "MemberLeaveEventQuit", "member": member(3) }),
        json!({ "type": "MemberCardChangeEvent", "origin": "a", "current": "b", "member": member(3) }),
        json!({
            "type": "MemberSpecialTitleChangeEvent",
            "origin": "",
            "current": "legend",
            "member": member(3)
        }),
        json!({
            "type": "MemberPermissionChangeEvent",
            "origin": "MEMBER",
            "current": "ADMINISTRATOR",
            "member": member(3)
        }),
        json!({
            "type": "MemberMuteEvent",
            "durationSeconds": 60,
            "member": member(3),
            "operator": member(2)
        }),
        json!({ "type": "MemberUnmuteEvent", "member": member(3), "operator": null }),
        json!({ "type": "MemberHonorChangeEvent", "member": member(3), "action": "achieve", "honor": "talkative" }),
        json!({
            "type": "NewFriendRequestEvent",
            "eventId": 9001,
            "fromId": 4,
            "groupId": 0,
            "nick": "carol",
            "message": "add me"
        }),
        json!({
            "type": "MemberJoinRequestEvent",
            "eventId": 9002,
            "fromId": 4,
            "groupId": 100,
            "groupName": "rustaceans",
            "nick": "carol",
            "message": "let me in"
        }),
        json!({
            "type": "BotInvitedJoinGroupRequestEvent",
            "eventId": 9003,
            "fromId": 4,
            "groupId": 200,
            "groupName": "gophers",
            "nick": "carol",
            "message": "join us"
        }),
        json!({ "type": "OtherClientOnlineEvent", "client": client(), "kind": 69899 }),
        json!({ "type": "OtherClientOfflineEvent", "client": client() }),
        json!({
            "type": "CommandExecutedEvent",
            "name": "help",
            "friend": null,
            "member": member(2),
            "args": [{ "type": "Plain", "text": "all" }]
        }),
    ];

    assert_eq!(covered(&samples, Event::tag), all(Event::tags()));
}
