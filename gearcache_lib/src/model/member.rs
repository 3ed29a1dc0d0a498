use serde::{Deserialize, Serialize};
use twilight_model::datetime::Timestamp;

use crate::model::{Extra, User};
use crate::util::markers::{GuildId, RoleId, UserId};
use crate::util::unset::zero_id_as_none;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Member {
    // gateway payloads carry the full user, cached members only keep the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, deserialize_with = "zero_id_as_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub joined_at: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Member {
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id.or_else(|| self.user.as_ref().map(|user| user.id))
    }

    /// Pin the user id down and drop the embedded user, the user store is the only home for it.
    pub fn detach_user(&mut self) {
        self.user_id = self.user_id();
        self.user = None;
    }
}
