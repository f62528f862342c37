//! Events pushed by the peer: bot state, friends, groups, requests, clients.

use crate::entity::common::{Client, Friend, Group, Member};
use crate::entity::element::MessageElement;

// ---- bot state

entity! {
    tagged
    /// Bot logged in.
    struct BotOnlineEvent {
        qq: i64,
    }
}

entity! {
    tagged
    /// Bot went offline on purpose.
    struct BotOfflineEventActive {
        qq: i64,
    }
}

entity! {
    tagged
    /// Bot was forced offline by another login.
    struct BotOfflineEventForce {
        qq: i64,
    }
}

entity! {
    tagged
    /// Bot was disconnected by the server or the network.
    struct BotOfflineEventDropped {
        qq: i64,
    }
}

entity! {
    tagged
    struct BotReloginEvent {
        qq: i64,
    }
}

// ---- friends

entity! {
    tagged
    struct FriendInputStatusChangedEvent {
        friend: Friend,
        inputting: bool,
    }
}

entity! {
    tagged
    struct FriendNickChangedEvent {
        friend: Friend,
        /// Old nickname; `from` on the wire.
        from_: String,
        to: String,
    }
}

// ---- groups

entity! {
    tagged
    /// The bot's permission in a group changed. The operator is always the owner.
    struct BotGroupPermissionChangeEvent {
        origin: String,
        current: String,
        group: Group,
    }
}

entity! {
    tagged
    struct BotMuteEvent {
        duration_seconds: i64,
        operator: Member,
    }
}

entity! {
    tagged
    struct BotUnmuteEvent {
        operator: Member,
    }
}

entity! {
    tagged
    struct BotJoinGroupEvent {
        group: Group,
        invitor: Option<Member>,
    }
}

entity! {
    tagged
    struct BotLeaveEventActive {
        group: Group,
    }
}

entity! {
    tagged
    struct BotLeaveEventKick {
        group: Group,
        operator: Member,
    }
}

entity! {
    tagged
    struct GroupRecallEvent {
        author_id: i64,
        message_id: i64,
        time: i64,
        group: Group,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct FriendRecallEvent {
        author_id: i64,
        message_id: i64,
        time: i64,
        operator: i64,
    }
}

entity! {
    untagged
    /// Where a nudge happened.
    struct NudgeSubject {
        id: i64,
        kind: String,
    }
}

entity! {
    tagged
    struct NudgeEvent {
        from_id: i64,
        subject: NudgeSubject,
        action: String,
        suffix: String,
        target: i64,
    }
}

entity! {
    tagged
    struct GroupNameChangeEvent {
        origin: String,
        current: String,
        group: Group,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct GroupEntranceAnnouncementChangeEvent {
        origin: String,
        current: String,
        group: Group,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct GroupMuteAllEvent {
        origin: bool,
        current: bool,
        group: Group,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct GroupAllowAnonymousChatEvent {
        origin: bool,
        current: bool,
        group: Group,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct GroupAllowConfessTalkEvent {
        origin: bool,
        current: bool,
        group: Group,
        is_by_bot: bool,
    }
}

entity! {
    tagged
    struct GroupAllowMemberInviteEvent {
        origin: bool,
        current: bool,
        group: Group,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct MemberJoinEvent {
        member: Member,
        invitor: Option<Member>,
    }
}

entity! {
    tagged
    /// A member (not the bot) was kicked.
    struct MemberLeaveEventKick {
        member: Member,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    /// A member (not the bot) left on their own.
    struct MemberLeaveEventQuit {
        member: Member,
    }
}

entity! {
    tagged
    struct MemberCardChangeEvent {
        origin: String,
        current: String,
        member: Member,
    }
}

entity! {
    tagged
    struct MemberSpecialTitleChangeEvent {
        origin: String,
        current: String,
        member: Member,
    }
}

entity! {
    tagged
    struct MemberPermissionChangeEvent {
        origin: String,
        current: String,
        member: Member,
    }
}

entity! {
    tagged
    struct MemberMuteEvent {
        duration_seconds: i64,
        member: Member,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct MemberUnmuteEvent {
        member: Member,
        operator: Option<Member>,
    }
}

entity! {
    tagged
    struct MemberHonorChangeEvent {
        member: Member,
        action: String,
        honor: String,
    }
}

// ---- requests

entity! {
    tagged
    struct NewFriendRequestEvent {
        event_id: i64,
        from_id: i64,
        group_id: i64,
        nick: String,
        message: String,
    }
}

entity! {
    tagged
    /// Someone asks to join a group the bot administers.
    struct MemberJoinRequestEvent {
        event_id: i64,
        from_id: i64,
        group_id: i64,
        group_name: String,
        nick: String,
        message: String,
    }
}

entity! {
    tagged
    struct BotInvitedJoinGroupRequestEvent {
        event_id: i64,
        from_id: i64,
        group_id: i64,
        group_name: String,
        nick: String,
        message: String,
    }
}

// ---- other clients

entity! {
    tagged
    struct OtherClientOnlineEvent {
        client: Client,
        kind: Option<i64>,
    }
}

entity! {
    tagged
    struct OtherClientOfflineEvent {
        client: Client,
    }
}

// ---- commands

entity! {
    tagged
    /// A console command was executed; `friend` and `member` name the caller, if any.
    struct CommandExecutedEvent {
        name: String,
        friend: Option<Friend>,
        member: Option<Member>,
        args: Vec<MessageElement>,
    }
}

family! {
    /// Any non-message push, tagged by `type`.
    enum Event {
        BotOnlineEvent,
        BotOfflineEventActive,
        BotOfflineEventForce,
        BotOfflineEventDropped,
        BotReloginEvent,
        FriendInputStatusChangedEvent,
        FriendNickChangedEvent,
        BotGroupPermissionChangeEvent,
        BotMuteEvent,
        BotUnmuteEvent,
        BotJoinGroupEvent,
        BotLeaveEventActive,
        BotLeaveEventKick,
        GroupRecallEvent,
        FriendRecallEvent,
        NudgeEvent,
        GroupNameChangeEvent,
        GroupEntranceAnnouncementChangeEvent,
        GroupMuteAllEvent,
        GroupAllowAnonymousChatEvent,
        GroupAllowConfessTalkEvent,
        GroupAllowMemberInviteEvent,
        MemberJoinEvent,
        MemberLeaveEventKick,
        MemberLeaveEventQuit,
        MemberCardChangeEvent,
        MemberSpecialTitleChangeEvent,
        MemberPermissionChangeEvent,
        MemberMuteEvent,
        MemberUnmuteEvent,
        MemberHonorChangeEvent,
        NewFriendRequestEvent,
        MemberJoinRequestEvent,
        BotInvitedJoinGroupRequestEvent,
        OtherClientOnlineEvent,
        OtherClientOfflineEvent,
        CommandExecutedEvent,
    }
}
