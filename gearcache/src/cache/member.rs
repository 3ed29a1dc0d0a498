use tracing::{debug, trace, warn};

use gearcache_lib::decode::Payload;
use gearcache_lib::model::Member;
use gearcache_lib::util::markers::{GuildId, UserId};
use gearcache_lib::util::DecodeResult;

use crate::cache::Cache;

impl Cache {
    pub fn get_member(&self, guild_id: &GuildId, user_id: &UserId) -> Option<Member> {
        let guilds = self.guilds.lock();
        let guild = guilds.get(guild_id)?;
        guild
            .member_position(*user_id)
            .map(|position| guild.members[position].clone())
    }

    /// Returns if there was a cached member to remove.
    pub(crate) fn cache_member_remove(&self, guild_id: GuildId, user_id: UserId) -> bool {
        let removed = self
            .guilds
            .lock()
            .update(&guild_id, |guild| match guild.member_position(user_id) {
                Some(position) => {
                    guild.members.swap_remove(position);
                    guild.member_count = guild.member_count.saturating_sub(1);
                    true
                }
                None => false,
            })
            .unwrap_or(false);

        if removed {
            self.metrics.members.dec();
        }
        removed
    }

    pub(crate) fn cache_member_add(&self, member: &Member, payload: &Payload) -> DecodeResult<()> {
        let user = match &member.user {
            Some(user) => user,
            None => {
                warn!("Received a member add without a user, can't place it");
                return Ok(());
            }
        };
        let user_id = user.id;

        // users first, and let go of them before the guilds get locked. A partial user from
        // a member add should never replace a richer cached one
        {
            let mut users = self.users.lock();
            if !users.contains_key(&user_id) {
                for (evicted_id, _) in users.set(user_id, user.clone()) {
                    debug!("Evicted user {} from the cache", evicted_id);
                }
                self.metrics.users.set(users.len() as i64);
            }
        }

        let guild_id = match member.guild_id {
            Some(guild_id) => guild_id,
            None => {
                warn!("Received a member add for user {} without a guild id", user_id);
                return Ok(());
            }
        };

        let mut guilds = self.guilds.lock();
        let merged = match guilds.get(&guild_id) {
            Some(guild) => match guild.member_position(user_id) {
                Some(position) => Some((position, payload.merge_onto(&guild.members[position])?)),
                None => None,
            },
            None => {
                trace!("Got a member add event for an uncached guild: {}", guild_id);
                return Ok(());
            }
        };
        let is_new = merged.is_none();

        guilds.update(&guild_id, |guild| match merged {
            Some((position, mut existing)) => {
                existing.detach_user();
                guild.members[position] = existing;
            }
            None => {
                let mut new = member.clone();
                new.detach_user();
                guild.members.push(new);
                guild.member_count += 1;
            }
        });

        if is_new {
            self.metrics.members.inc();
        }
        Ok(())
    }
}
