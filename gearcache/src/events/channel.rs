use tracing::trace;

use gearcache_lib::decode::IdHolder;
use gearcache_lib::model::event::{ChannelCreate, ChannelDelete, ChannelPinsUpdate, ChannelUpdate};
use gearcache_lib::model::Channel;
use gearcache_lib::util::markers::ChannelId;
use gearcache_lib::util::DecodeResult;

use crate::cache::Cache;
use crate::events::observed;

pub fn on_channel_create(cache: &Cache, data: &[u8]) -> DecodeResult<ChannelCreate> {
    observed(cache, "CHANNEL_CREATE", || {
        let payload = cache.decode(data)?;
        let channel: Channel = payload.shape()?;
        cache.cache_channel_create(&channel, &payload)?;
        Ok(ChannelCreate(channel))
    })
}

pub fn on_channel_update(cache: &Cache, data: &[u8]) -> DecodeResult<ChannelUpdate> {
    observed(cache, "CHANNEL_UPDATE", || {
        let payload = cache.decode(data)?;
        // only the id for now, the full decode only happens if it turns out to be a new channel
        let holder: IdHolder<ChannelId> = payload.shape()?;
        let channel = cache.cache_channel_update(holder.id, &payload)?;
        Ok(ChannelUpdate(channel))
    })
}

pub fn on_channel_delete(cache: &Cache, data: &[u8]) -> DecodeResult<ChannelDelete> {
    observed(cache, "CHANNEL_DELETE", || {
        let payload = cache.decode(data)?;
        let channel: Channel = payload.shape()?;
        if cache.cache_channel_delete(channel.guild_id, channel.id).is_none() {
            trace!("Received a delete for uncached channel {}", channel.id);
        }
        Ok(ChannelDelete(channel))
    })
}

pub fn on_channel_pins_update(cache: &Cache, data: &[u8]) -> DecodeResult<ChannelPinsUpdate> {
    observed(cache, "CHANNEL_PINS_UPDATE", || {
        let payload = cache.decode(data)?;
        let update: ChannelPinsUpdate = payload.shape()?;
        // no timestamp means "not set", not "unpinned everything"
        if let Some(timestamp) = update.last_pin_timestamp {
            if !cache.cache_channel_pins(update.channel_id, timestamp) {
                trace!("Ignoring pins update for uncached channel {}", update.channel_id);
            }
        }
        Ok(update)
    })
}
