use serde::{Deserialize, Serialize};

use crate::model::Extra;
use crate::util::markers::{ChannelId, GuildId, UserId};
use crate::util::unset::zero_id_as_none;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VoiceState {
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    pub user_id: UserId,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub self_deaf: bool,
    #[serde(default)]
    pub self_mute: bool,
    #[serde(default)]
    pub self_stream: bool,
    #[serde(default)]
    pub self_video: bool,
    #[serde(flatten)]
    pub extra: Extra,
}
