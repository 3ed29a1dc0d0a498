use tracing::debug;

use gearcache_lib::model::event::{
    ChannelCreate, ChannelDelete, ChannelPinsUpdate, ChannelUpdate, GuildCreate, GuildDelete, GuildUpdate,
    MemberAdd, MemberRemove, Ready, UserUpdate, VoiceServerUpdate,
};
use gearcache_lib::util::DecodeResult;

pub use channel::{on_channel_create, on_channel_delete, on_channel_pins_update, on_channel_update};
pub use guild::{on_guild_create, on_guild_delete, on_guild_update};
pub use member::{on_member_add, on_member_remove};
pub use other::{on_ready, on_user_update};
pub use voice::on_voice_server_update;

use crate::cache::Cache;

mod channel;
mod guild;
mod member;
mod other;
mod voice;

/// Typed result of a cache handler, ready to be passed on to whoever listens for events.
#[derive(Clone, Debug, PartialEq)]
pub enum CacheEvent {
    Ready(Box<Ready>),
    ChannelCreate(ChannelCreate),
    ChannelUpdate(ChannelUpdate),
    ChannelDelete(ChannelDelete),
    ChannelPinsUpdate(ChannelPinsUpdate),
    UserUpdate(UserUpdate),
    VoiceServerUpdate(VoiceServerUpdate),
    MemberAdd(Box<MemberAdd>),
    MemberRemove(MemberRemove),
    GuildCreate(Box<GuildCreate>),
    GuildUpdate(Box<GuildUpdate>),
    GuildDelete(GuildDelete),
}

//Just a hub function to fan out to the relevant handlers, `None` for events the cache doesn't care about
pub fn handle_event(cache: &Cache, kind: &str, data: &[u8]) -> DecodeResult<Option<CacheEvent>> {
    let event = match kind {
        "READY" => CacheEvent::Ready(Box::new(on_ready(cache, data)?)),
        "CHANNEL_CREATE" => CacheEvent::ChannelCreate(on_channel_create(cache, data)?),
        "CHANNEL_UPDATE" => CacheEvent::ChannelUpdate(on_channel_update(cache, data)?),
        "CHANNEL_DELETE" => CacheEvent::ChannelDelete(on_channel_delete(cache, data)?),
        "CHANNEL_PINS_UPDATE" => CacheEvent::ChannelPinsUpdate(on_channel_pins_update(cache, data)?),
        "USER_UPDATE" => CacheEvent::UserUpdate(on_user_update(cache, data)?),
        "VOICE_SERVER_UPDATE" => CacheEvent::VoiceServerUpdate(on_voice_server_update(cache, data)?),
        "GUILD_MEMBER_ADD" => CacheEvent::MemberAdd(Box::new(on_member_add(cache, data)?)),
        "GUILD_MEMBER_REMOVE" => CacheEvent::MemberRemove(on_member_remove(cache, data)?),
        "GUILD_CREATE" => CacheEvent::GuildCreate(Box::new(on_guild_create(cache, data)?)),
        "GUILD_UPDATE" => CacheEvent::GuildUpdate(Box::new(on_guild_update(cache, data)?)),
        "GUILD_DELETE" => CacheEvent::GuildDelete(on_guild_delete(cache, data)?),
        _ => return Ok(None),
    };
    Ok(Some(event))
}

// counts the event and any decode failure so bad payloads show up in the metrics
fn observed<T>(cache: &Cache, kind: &'static str, handler: impl FnOnce() -> DecodeResult<T>) -> DecodeResult<T> {
    cache.metrics.gateway_events.with_label_values(&[kind]).inc();
    handler().map_err(|e| {
        cache.metrics.decode_failures.with_label_values(&[kind]).inc();
        debug!("Failed to decode {} payload: {}", kind, e);
        e
    })
}
