use serde::{Deserialize, Serialize};
use twilight_model::datetime::Timestamp;

use crate::model::Extra;
use crate::util::markers::{ChannelId, GuildId};
use crate::util::unset::{zero_id_as_none, zero_time_as_none};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Channel {
    pub id: ChannelId,
    // dm channels don't belong to a guild
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub guild_id: Option<GuildId>,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "zero_time_as_none")]
    pub last_pin_timestamp: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Extra,
}
