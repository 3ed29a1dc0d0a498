use tracing::{debug, trace};

use gearcache_lib::decode::Payload;
use gearcache_lib::model::Guild;
use gearcache_lib::util::markers::GuildId;
use gearcache_lib::util::DecodeResult;

use crate::cache::{Cache, TlruStore};

impl Cache {
    /// Copy of a guild with its channels pulled from the channel store. Members are left out
    /// when the cache is configured not to return them.
    pub fn get_guild(&self, guild_id: &GuildId) -> Option<Guild> {
        let mut guild = {
            let guilds = self.guilds.lock();
            let guild = guilds.get(guild_id)?;
            if self.return_guild_members {
                guild.clone()
            } else {
                guild.clone_without_members()
            }
        };

        guild.channels = self.get_guild_channels(guild_id);
        Some(guild)
    }

    pub(crate) fn cache_guild_create(&self, guild: &Guild, payload: &Payload) -> DecodeResult<()> {
        let mut guilds = self.guilds.lock();
        let existing = guilds
            .get(&guild.id)
            .map(|old| (old.unavailable, old.members.is_empty()));

        match existing {
            // seems like an update event came before the create, merge so the members we
            // learned about since don't get thrown out
            Some((false, false)) => self.merge_guild(&mut guilds, guild.id, payload)?,
            Some((false, true)) => trace!("Ignoring duplicate guild create for {}", guild.id),
            Some((true, _)) => {
                trace!("Guild {} is available again", guild.id);
                self.install_guild(&mut guilds, guild.clone(), true)
            }
            None => self.install_guild(&mut guilds, guild.clone(), true),
        }
        Ok(())
    }

    pub(crate) fn cache_guild_update(&self, guild: &Guild, payload: &Payload) -> DecodeResult<()> {
        let mut guilds = self.guilds.lock();
        match guilds.get(&guild.id).map(|old| old.unavailable) {
            Some(false) => self.merge_guild(&mut guilds, guild.id, payload)?,
            // an update for an unavailable guild means it's back
            Some(true) => self.install_guild(&mut guilds, guild.clone(), false),
            None => self.install_guild(&mut guilds, guild.clone(), false),
        }
        Ok(())
    }

    pub(crate) fn cache_guild_delete(&self, guild_id: GuildId) -> Option<Guild> {
        let mut guilds = self.guilds.lock();
        let old = guilds.delete(&guild_id);
        if let Some(old) = &old {
            self.metrics.members.sub(old.members.len() as i64);
        }
        self.metrics.guilds.set(guilds.len() as i64);

        let mut domain = self.channels.write();
        let dropped = domain.drop_guild(guild_id);
        trace!("Removed guild {} along with {} channels", guild_id, dropped);
        self.metrics.channels.set(domain.channels.len() as i64);

        old
    }

    fn merge_guild(&self, guilds: &mut TlruStore<GuildId, Guild>, guild_id: GuildId, payload: &Payload) -> DecodeResult<()> {
        let (mut merged, old_members) = match guilds.get(&guild_id) {
            Some(existing) => (payload.merge_onto(existing)?, existing.members.len()),
            None => return Ok(()),
        };
        // the channel index is the only source of channels once a guild is cached
        merged.channels.clear();
        merged.reconcile_members();
        let new_members = merged.members.len();

        guilds.update(&guild_id, |existing| *existing = merged);
        self.metrics.members.add(new_members as i64 - old_members as i64);
        Ok(())
    }

    /// Put a guild in wholesale, replacing whatever was there. With `reseed` the channel store
    /// and index are rebuilt from the channels embedded in the guild.
    fn install_guild(&self, guilds: &mut TlruStore<GuildId, Guild>, mut guild: Guild, reseed: bool) {
        let guild_id = guild.id;
        let channels = guild.take_channels();
        guild.reconcile_members();

        let added = guild.members.len() as i64;
        let replaced = guilds.peek(&guild_id).map_or(0, |old| old.members.len()) as i64;
        let evicted = guilds.set(guild_id, guild);
        let evicted_members: usize = evicted.iter().map(|(_, old)| old.members.len()).sum();

        self.metrics.members.add(added - replaced - evicted_members as i64);
        self.metrics.guilds.set(guilds.len() as i64);

        if !reseed && evicted.is_empty() {
            return;
        }

        let mut domain = self.channels.write();
        if reseed {
            domain.reseed(guild_id, channels);
        }
        for (evicted_id, _) in &evicted {
            let dropped = domain.drop_guild(*evicted_id);
            debug!("Evicted guild {} from the cache, dropping {} channels with it", evicted_id, dropped);
        }
        self.metrics.channels.set(domain.channels.len() as i64);
    }
}
