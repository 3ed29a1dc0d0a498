use tracing::info;

use gearcache_lib::model::event::{Ready, UserUpdate};
use gearcache_lib::model::User;
use gearcache_lib::util::DecodeResult;

use crate::cache::Cache;
use crate::events::observed;

pub fn on_ready(cache: &Cache, data: &[u8]) -> DecodeResult<Ready> {
    observed(cache, "READY", || {
        let payload = cache.decode(data)?;
        let mut ready: Ready = payload.shape()?;
        // the ready always carries the current user as it is cached after this
        ready.user = cache.cache_current_user(&ready.user, &payload.section("user"))?;
        info!(
            "Ready as {} ({}) with {} guilds",
            ready.user.username,
            ready.user.id,
            ready.guilds.len()
        );
        Ok(ready)
    })
}

pub fn on_user_update(cache: &Cache, data: &[u8]) -> DecodeResult<UserUpdate> {
    observed(cache, "USER_UPDATE", || {
        let payload = cache.decode(data)?;
        let user: User = payload.shape()?;
        let user = cache.cache_current_user(&user, &payload)?;
        Ok(UserUpdate(user))
    })
}
