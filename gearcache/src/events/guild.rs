use tracing::{info, trace};

use gearcache_lib::model::event::{GuildCreate, GuildDelete, GuildUpdate};
use gearcache_lib::model::Guild;
use gearcache_lib::util::DecodeResult;

use crate::cache::Cache;
use crate::events::observed;

pub fn on_guild_create(cache: &Cache, data: &[u8]) -> DecodeResult<GuildCreate> {
    observed(cache, "GUILD_CREATE", || {
        let payload = cache.decode(data)?;
        let guild: Guild = payload.shape()?;
        trace!("Guild create for {} with {} channels", guild.id, guild.channels.len());
        cache.cache_guild_create(&guild, &payload)?;
        Ok(GuildCreate(guild))
    })
}

pub fn on_guild_update(cache: &Cache, data: &[u8]) -> DecodeResult<GuildUpdate> {
    observed(cache, "GUILD_UPDATE", || {
        let payload = cache.decode(data)?;
        let guild: Guild = payload.shape()?;
        cache.cache_guild_update(&guild, &payload)?;
        Ok(GuildUpdate(guild))
    })
}

pub fn on_guild_delete(cache: &Cache, data: &[u8]) -> DecodeResult<GuildDelete> {
    observed(cache, "GUILD_DELETE", || {
        let payload = cache.decode(data)?;
        let event: GuildDelete = payload.shape()?;
        if cache.cache_guild_delete(event.id).is_some() {
            if event.unavailable {
                info!("Guild {} became unavailable", event.id)
            } else {
                info!("Removed from guild {}", event.id)
            }
        } else {
            trace!("Received a guild delete event for a server that wasn't cached: {}", event.id);
        }
        Ok(event)
    })
}
