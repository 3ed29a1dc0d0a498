use std::collections::HashMap;

use gearcache_lib::util::markers::{ChannelId, GuildId};
use indexmap::IndexSet;

/// Which channels belong to which guild, in the order they were registered.
///
/// Lives next to the channel store under the same lock, the two are only ever
/// changed together.
#[derive(Default)]
pub struct GuildChannelIndex {
    relationships: HashMap<GuildId, IndexSet<ChannelId>>,
}

impl GuildChannelIndex {
    pub fn register(&mut self, guild_id: Option<GuildId>, channel_id: ChannelId) {
        if let Some(guild_id) = guild_id {
            self.relationships.entry(guild_id).or_default().insert(channel_id);
        }
    }

    pub fn unregister(&mut self, guild_id: Option<GuildId>, channel_id: ChannelId) {
        let guild_id = match guild_id {
            Some(guild_id) => guild_id,
            None => return,
        };
        if let Some(channels) = self.relationships.get_mut(&guild_id) {
            channels.shift_remove(&channel_id);
            // don't keep empty sets around for every guild we ever saw
            if channels.is_empty() {
                self.relationships.remove(&guild_id);
            }
        }
    }

    /// Installs a fresh channel list for a guild, handing back the one it replaced.
    pub fn replace_all(
        &mut self,
        guild_id: GuildId,
        channel_ids: impl IntoIterator<Item = ChannelId>,
    ) -> Vec<ChannelId> {
        let channels: IndexSet<ChannelId> = channel_ids.into_iter().collect();
        let previous = if channels.is_empty() {
            self.relationships.remove(&guild_id)
        } else {
            self.relationships.insert(guild_id, channels)
        };
        previous.map(|channels| channels.into_iter().collect()).unwrap_or_default()
    }

    pub fn channels_of(&self, guild_id: GuildId) -> impl Iterator<Item = ChannelId> + '_ {
        self.relationships
            .get(&guild_id)
            .into_iter()
            .flat_map(|channels| channels.iter().copied())
    }

    pub fn remove_guild(&mut self, guild_id: GuildId) -> Vec<ChannelId> {
        self.relationships
            .remove(&guild_id)
            .map(|channels| channels.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn guild_count(&self) -> usize {
        self.relationships.len()
    }
}
