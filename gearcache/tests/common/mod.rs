#![allow(dead_code)]

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use gearcache::{Cache, CacheConfig};
use gearcache_lib::util::markers::{ChannelId, EmojiId, GuildId, UserId};

pub fn cache() -> Cache {
    Cache::new(CacheConfig::default()).unwrap()
}

pub fn cache_with(config: CacheConfig) -> Cache {
    Cache::new(config).unwrap()
}

fn id<T: DeserializeOwned>(id: u64) -> T {
    serde_json::from_value(json!(id.to_string())).unwrap()
}

pub fn guild_id(id_: u64) -> GuildId {
    id(id_)
}

pub fn channel_id(id_: u64) -> ChannelId {
    id(id_)
}

pub fn user_id(id_: u64) -> UserId {
    id(id_)
}

pub fn emoji_id(id_: u64) -> EmojiId {
    id(id_)
}

pub fn bytes(value: Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

pub fn channel(id: u64, guild: Option<u64>, name: &str) -> Value {
    let mut channel = json!({"id": id.to_string(), "type": 0, "name": name});
    if let Some(guild) = guild {
        channel["guild_id"] = json!(guild.to_string());
    }
    channel
}

pub fn user(id: u64, username: &str) -> Value {
    json!({"id": id.to_string(), "username": username, "discriminator": "0001", "avatar": null})
}

pub fn member(guild: u64, user_id: u64, username: &str) -> Value {
    json!({
        "guild_id": guild.to_string(),
        "user": user(user_id, username),
        "nick": null,
        "roles": [],
        "joined_at": "2021-03-15T12:00:00.000000+00:00"
    })
}

/// A guild create payload, channels and members as the gateway sends them (no guild ids on
/// the channels, full users on the members).
pub fn guild(id: u64, channel_ids: &[u64], member_ids: &[u64]) -> Value {
    let channels: Vec<Value> = channel_ids
        .iter()
        .map(|channel_id| json!({"id": channel_id.to_string(), "type": 0, "name": format!("channel-{}", channel_id)}))
        .collect();
    let members: Vec<Value> = member_ids
        .iter()
        .map(|user_id| json!({"user": user(*user_id, &format!("user-{}", user_id)), "roles": []}))
        .collect();
    json!({
        "id": id.to_string(),
        "name": format!("guild-{}", id),
        "unavailable": false,
        "member_count": member_ids.len(),
        "members": members,
        "channels": channels,
        "emojis": [{"id": "900", "name": "gear", "roles": [], "animated": false}],
        "roles": [{"id": id.to_string(), "name": "@everyone", "permissions": "0", "position": 0}],
        "premium_tier": 1
    })
}

pub fn unavailable_guild(id: u64) -> Value {
    json!({"id": id.to_string(), "unavailable": true})
}
