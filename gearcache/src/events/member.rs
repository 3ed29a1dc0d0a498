use tracing::trace;

use gearcache_lib::model::event::{MemberAdd, MemberRemove};
use gearcache_lib::model::Member;
use gearcache_lib::util::DecodeResult;

use crate::cache::Cache;
use crate::events::observed;

pub fn on_member_add(cache: &Cache, data: &[u8]) -> DecodeResult<MemberAdd> {
    observed(cache, "GUILD_MEMBER_ADD", || {
        let payload = cache.decode(data)?;
        let member: Member = payload.shape()?;
        cache.cache_member_add(&member, &payload)?;
        Ok(MemberAdd(member))
    })
}

pub fn on_member_remove(cache: &Cache, data: &[u8]) -> DecodeResult<MemberRemove> {
    observed(cache, "GUILD_MEMBER_REMOVE", || {
        let payload = cache.decode(data)?;
        let event: MemberRemove = payload.shape()?;
        trace!("User {} left {}", event.user.id, event.guild_id);
        // members we never saw leaving is fine, not every guild has its members cached
        if !cache.cache_member_remove(event.guild_id, event.user.id) {
            trace!("User {} wasn't cached as member of {}", event.user.id, event.guild_id);
        }
        Ok(event)
    })
}
