use gearcache_lib::model::event::VoiceServerUpdate;
use gearcache_lib::util::DecodeResult;

use crate::cache::Cache;
use crate::events::observed;

// voice server info isn't cached, this is only here so it gets decoded like everything else
pub fn on_voice_server_update(cache: &Cache, data: &[u8]) -> DecodeResult<VoiceServerUpdate> {
    observed(cache, "VOICE_SERVER_UPDATE", || cache.decode(data)?.shape())
}
