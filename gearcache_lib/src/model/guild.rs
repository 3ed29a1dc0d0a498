use serde::{Deserialize, Serialize};

use crate::model::{Channel, Extra, Member};
use crate::util::markers::{EmojiId, GuildId, RoleId, UserId};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Guild {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub member_count: u64,
    // only filled on the way in (guild create) and on the way out (reads), the cache keeps
    // channels in their own store
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Guild {
    /// Copy of everything except the member list, for reads on guilds too big to copy whole.
    pub fn clone_without_members(&self) -> Guild {
        Guild {
            id: self.id,
            unavailable: self.unavailable,
            name: self.name.clone(),
            members: Vec::new(),
            member_count: self.member_count,
            channels: self.channels.clone(),
            emojis: self.emojis.clone(),
            roles: self.roles.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Takes the embedded channels out, stamped with this guild's id since gateway guild
    /// payloads leave it off their channels.
    pub fn take_channels(&mut self) -> Vec<Channel> {
        let guild_id = self.id;
        let mut channels = std::mem::take(&mut self.channels);
        for channel in &mut channels {
            channel.guild_id = Some(guild_id);
        }
        channels
    }

    pub fn member_position(&self, user_id: UserId) -> Option<usize> {
        self.members.iter().position(|member| member.user_id() == Some(user_id))
    }

    /// Gets the member list and counter back in line after a payload replaced either of them.
    /// The counter always follows the cached list, whatever count the payload reported.
    pub fn reconcile_members(&mut self) {
        let guild_id = self.id;
        for member in &mut self.members {
            member.user_id = member.user_id();
            member.guild_id.get_or_insert(guild_id);
        }
        self.member_count = self.members.len() as u64;
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Emoji {
    pub id: EmojiId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub animated: bool,
    #[serde(default = "available_default")]
    pub available: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

fn available_default() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Role {
    // cache role id as well since we need it for role ordering
    pub id: RoleId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub position: i64,
    // the gateway sends permissions as a stringified bitfield
    #[serde(default)]
    pub permissions: String,
    #[serde(default)]
    pub managed: bool,
    #[serde(flatten)]
    pub extra: Extra,
}
