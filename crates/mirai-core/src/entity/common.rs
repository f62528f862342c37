//! Untagged value entities shared by messages and events.

entity! {
    untagged
    /// A friend of the bot.
    struct Friend {
        id: i64,
        nickname: String,
        remark: String,
    }
}

entity! {
    untagged
    /// A group the bot is in; `permission` is the bot's own role there.
    struct Group {
        id: i64,
        name: String,
        permission: String,
    }
}

entity! {
    untagged
    /// A group member, together with the group it belongs to.
    struct Member {
        id: i64,
        member_name: String,
        permission: String,
        special_title: String,
        join_timestamp: i64,
        last_speak_timestamp: i64,
        mute_time_remaining: i64,
        group: Group,
    }
}

entity! {
    untagged
    /// Another client logged in as the same account.
    struct Client {
        id: i64,
        platform: String,
    }
}
