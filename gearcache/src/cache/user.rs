use tracing::trace;

use gearcache_lib::decode::Payload;
use gearcache_lib::model::User;
use gearcache_lib::util::markers::UserId;
use gearcache_lib::util::DecodeResult;

use crate::cache::Cache;

impl Cache {
    pub fn get_user(&self, user_id: &UserId) -> Option<User> {
        self.users.lock().get(user_id).cloned()
    }

    pub fn get_current_user(&self) -> Option<User> {
        self.current_user.lock().clone()
    }

    /// Apply a (partial) user payload onto the current user and hand back a copy of the result.
    /// The first one we get is taken as is.
    pub(crate) fn cache_current_user(&self, user: &User, payload: &Payload) -> DecodeResult<User> {
        let mut current = self.current_user.lock();
        let new = match current.as_ref() {
            Some(existing) => payload.merge_onto(existing)?,
            None => {
                trace!("Caching current user {}", user.id);
                user.clone()
            }
        };
        *current = Some(new.clone());
        Ok(new)
    }
}
