use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::util::error::ConfigError;

/// Bounds for a single store, zero means that dimension is unbounded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StoreLimits {
    pub max_items: usize,
    pub max_bytes: usize,
    pub max_age: Duration,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CacheConfig {
    pub users: StoreLimits,
    pub voice_states: StoreLimits,
    pub channels: StoreLimits,
    pub guilds: StoreLimits,
    // big guilds make guild reads expensive, this allows leaving members out of them
    pub return_guild_members: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            users: StoreLimits::default(),
            voice_states: StoreLimits::default(),
            channels: StoreLimits::default(),
            guilds: StoreLimits::default(),
            return_guild_members: true,
        }
    }
}

impl CacheConfig {
    /// Reads `GEARCACHE_<STORE>_MAX_ITEMS`, `_MAX_BYTES` and `_MAX_AGE_SECS` for the user,
    /// voice state, channel and guild stores, and `GEARCACHE_OMIT_GUILD_MEMBERS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let omit_members: bool = parse(&lookup, "GEARCACHE_OMIT_GUILD_MEMBERS")?.unwrap_or(false);
        Ok(CacheConfig {
            users: store_limits(&lookup, "USER")?,
            voice_states: store_limits(&lookup, "VOICE_STATE")?,
            channels: store_limits(&lookup, "CHANNEL")?,
            guilds: store_limits(&lookup, "GUILD")?,
            return_guild_members: !omit_members,
        })
    }
}

fn store_limits(lookup: &impl Fn(&str) -> Option<String>, store: &str) -> Result<StoreLimits, ConfigError> {
    let max_items = parse(lookup, &format!("GEARCACHE_{}_MAX_ITEMS", store))?;
    let max_bytes = parse(lookup, &format!("GEARCACHE_{}_MAX_BYTES", store))?;
    let max_age = parse(lookup, &format!("GEARCACHE_{}_MAX_AGE_SECS", store))?;
    Ok(StoreLimits {
        max_items: max_items.unwrap_or_default(),
        max_bytes: max_bytes.unwrap_or_default(),
        max_age: Duration::from_secs(max_age.unwrap_or_default()),
    })
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
    }
}
