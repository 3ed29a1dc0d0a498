use serde::{Deserialize, Serialize};
use twilight_model::datetime::Timestamp;

use crate::model::{Channel, Extra, Guild, Member, User};
use crate::util::markers::{ChannelId, GuildId};
use crate::util::unset::{zero_id_as_none, zero_time_as_none};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Ready {
    #[serde(default)]
    pub v: u8,
    pub user: User,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuild>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct UnavailableGuild {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelCreate(pub Channel);

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelUpdate(pub Channel);

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelDelete(pub Channel);

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ChannelPinsUpdate {
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    #[serde(default, deserialize_with = "zero_time_as_none")]
    pub last_pin_timestamp: Option<Timestamp>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserUpdate(pub User);

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VoiceServerUpdate {
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub guild_id: Option<GuildId>,
    pub token: String,
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberAdd(pub Member);

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MemberRemove {
    pub guild_id: GuildId,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GuildCreate(pub Guild);

#[derive(Clone, Debug, PartialEq)]
pub struct GuildUpdate(pub Guild);

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GuildDelete {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
}
