use gearcache_lib::model::Role;
use gearcache_lib::util::markers::GuildId;

use crate::cache::Cache;

impl Cache {
    pub fn get_guild_roles(&self, guild_id: &GuildId) -> Option<Vec<Role>> {
        self.guilds.lock().get(guild_id).map(|guild| guild.roles.clone())
    }
}
