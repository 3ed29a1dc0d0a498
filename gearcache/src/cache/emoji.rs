use gearcache_lib::model::Emoji;
use gearcache_lib::util::markers::{EmojiId, GuildId};

use crate::cache::Cache;

impl Cache {
    pub fn get_guild_emoji(&self, guild_id: &GuildId, emoji_id: &EmojiId) -> Option<Emoji> {
        let guilds = self.guilds.lock();
        guilds
            .get(guild_id)?
            .emojis
            .iter()
            .find(|emoji| emoji.id == *emoji_id)
            .cloned()
    }

    /// `None` if the guild isn't cached, an empty list if it simply has no emoji.
    pub fn get_guild_emojis(&self, guild_id: &GuildId) -> Option<Vec<Emoji>> {
        self.guilds.lock().get(guild_id).map(|guild| guild.emojis.clone())
    }
}
