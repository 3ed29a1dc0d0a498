use gearcache_lib::model::VoiceState;
use gearcache_lib::util::markers::{GuildId, UserId};

use crate::cache::Cache;

// Nothing in the event handlers writes voice states yet, the store only exists so it has
// its own limits and lock once voice state updates get cached.
impl Cache {
    pub fn get_voice_state(&self, guild_id: &GuildId, user_id: &UserId) -> Option<VoiceState> {
        self.voice_states.lock().get(&(*guild_id, *user_id)).cloned()
    }
}
