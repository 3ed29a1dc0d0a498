use tracing::{debug, trace};
use twilight_model::datetime::Timestamp;

use gearcache_lib::decode::Payload;
use gearcache_lib::model::Channel;
use gearcache_lib::util::markers::{ChannelId, GuildId};
use gearcache_lib::util::DecodeResult;

use crate::cache::{Cache, GuildChannelIndex, TlruStore};
use crate::util::config::StoreLimits;

/// Channel store plus the guild -> channels index. Both live under the same lock and every
/// mutation here keeps them in line with each other.
pub struct ChannelDomain {
    pub channels: TlruStore<ChannelId, Channel>,
    pub relationships: GuildChannelIndex,
}

impl ChannelDomain {
    pub fn new(limits: StoreLimits) -> Self {
        ChannelDomain {
            channels: TlruStore::new(limits),
            relationships: GuildChannelIndex::default(),
        }
    }

    /// Insert or overwrite a channel and index it under its guild.
    pub fn store(&mut self, channel: Channel) {
        let channel_id = channel.id;
        let guild_id = channel.guild_id;
        // peek, an expired entry that wasn't purged yet is still registered under its guild
        if let Some(previous) = self.channels.peek(&channel_id).map(|old| old.guild_id) {
            if previous != guild_id {
                self.relationships.unregister(previous, channel_id);
            }
        }
        self.relationships.register(guild_id, channel_id);

        let evicted = self.channels.set(channel_id, channel);
        self.unlink(evicted);
    }

    pub fn remove(&mut self, guild_id: Option<GuildId>, channel_id: ChannelId) -> Option<Channel> {
        let old = self.channels.delete(&channel_id);
        self.relationships.unregister(guild_id, channel_id);
        if let Some(old) = &old {
            if old.guild_id != guild_id {
                self.relationships.unregister(old.guild_id, channel_id);
            }
        }
        old
    }

    /// Throw out everything known about a guild's channels and start over from a full guild
    /// payload. Stale channels that are not in the new list are dropped.
    pub fn reseed(&mut self, guild_id: GuildId, channels: Vec<Channel>) {
        let previous = self
            .relationships
            .replace_all(guild_id, channels.iter().map(|channel| channel.id));
        for channel_id in previous {
            self.channels.delete(&channel_id);
        }
        for channel in channels {
            self.store(channel);
        }
    }

    /// Cascade for a guild that's gone, returns how many channels went with it.
    pub fn drop_guild(&mut self, guild_id: GuildId) -> usize {
        let channel_ids = self.relationships.remove_guild(guild_id);
        for channel_id in &channel_ids {
            self.channels.delete(channel_id);
        }
        channel_ids.len()
    }

    /// Channels of a guild in index order. Ids the store no longer has (evicted or expired
    /// but not purged yet) are skipped.
    pub fn guild_channels(&self, guild_id: GuildId) -> Vec<Channel> {
        self.relationships
            .channels_of(guild_id)
            .filter_map(|channel_id| self.channels.get(&channel_id).cloned())
            .collect()
    }

    fn unlink(&mut self, evicted: Vec<(ChannelId, Channel)>) {
        for (channel_id, channel) in evicted {
            debug!("Evicted channel {} from the cache", channel_id);
            self.relationships.unregister(channel.guild_id, channel_id);
        }
    }
}

impl Cache {
    pub fn get_channel(&self, channel_id: &ChannelId) -> Option<Channel> {
        self.channels.read().channels.get(channel_id).cloned()
    }

    pub fn get_guild_channels(&self, guild_id: &GuildId) -> Vec<Channel> {
        self.channels.read().guild_channels(*guild_id)
    }

    pub(crate) fn cache_channel_create(&self, channel: &Channel, payload: &Payload) -> DecodeResult<()> {
        let mut domain = self.channels.write();
        let new = match domain.channels.get(&channel.id) {
            Some(existing) => {
                trace!("Channel {} was already cached, merging the create into it", channel.id);
                payload.merge_onto(existing)?
            }
            None => channel.clone(),
        };
        domain.store(new);
        self.metrics.channels.set(domain.channels.len() as i64);
        Ok(())
    }

    pub(crate) fn cache_channel_update(&self, channel_id: ChannelId, payload: &Payload) -> DecodeResult<Channel> {
        let mut domain = self.channels.write();
        let channel = match domain.channels.get(&channel_id) {
            Some(existing) => payload.merge_onto(existing)?,
            None => {
                // updates can beat the create to us
                trace!("Received an update for uncached channel {}, caching it as new", channel_id);
                payload.shape::<Channel>()?
            }
        };
        domain.store(channel.clone());
        self.metrics.channels.set(domain.channels.len() as i64);
        Ok(channel)
    }

    pub(crate) fn cache_channel_delete(&self, guild_id: Option<GuildId>, channel_id: ChannelId) -> Option<Channel> {
        let mut domain = self.channels.write();
        let old = domain.remove(guild_id, channel_id);
        self.metrics.channels.set(domain.channels.len() as i64);
        old
    }

    /// Returns if the channel was known.
    pub(crate) fn cache_channel_pins(&self, channel_id: ChannelId, timestamp: Timestamp) -> bool {
        self.channels
            .write()
            .channels
            .update(&channel_id, |channel| channel.last_pin_timestamp = Some(timestamp))
            .is_some()
    }
}
