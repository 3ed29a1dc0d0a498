use parking_lot::{Mutex, RwLock};

use gearcache_lib::decode::{JsonDecoder, Payload, PayloadDecoder};
use gearcache_lib::model::{Guild, User, VoiceState};
use gearcache_lib::util::markers::{GuildId, UserId};
use gearcache_lib::util::DecodeResult;

use crate::util::config::CacheConfig;
use crate::util::error::CacheError;
use crate::util::CacheMetrics;

pub use channel::ChannelDomain;
pub use relationships::GuildChannelIndex;
pub use store::{TlruStore, Weigh};

pub mod channel;
pub mod emoji;
pub mod guild;
pub mod member;
pub mod relationships;
pub mod role;
pub mod store;
pub mod user;
pub mod voice_state;

/// Every lock guards its own domain. The only nesting allowed is guilds -> channels,
/// users and guilds are never held at the same time.
pub struct Cache {
    decoder: Box<dyn PayloadDecoder>,
    pub metrics: CacheMetrics,
    return_guild_members: bool,

    // read a lot more than it's written, so it doesn't share a lock with anything
    current_user: Mutex<Option<User>>,

    channels: RwLock<ChannelDomain>,
    guilds: Mutex<TlruStore<GuildId, Guild>>,
    users: Mutex<TlruStore<UserId, User>>,
    voice_states: Mutex<TlruStore<(GuildId, UserId), VoiceState>>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub guilds: usize,
    pub members: usize,
    pub channels: usize,
    pub indexed_guilds: usize,
    pub users: usize,
    pub voice_states: usize,
}

impl Cache {
    pub fn new(config: CacheConfig) -> Result<Self, CacheError> {
        Ok(Cache {
            decoder: Box::new(JsonDecoder),
            metrics: CacheMetrics::new()?,
            return_guild_members: config.return_guild_members,
            current_user: Mutex::new(None),
            channels: RwLock::new(ChannelDomain::new(config.channels)),
            guilds: Mutex::new(TlruStore::new(config.guilds)),
            users: Mutex::new(TlruStore::new(config.users)),
            voice_states: Mutex::new(TlruStore::new(config.voice_states)),
        })
    }

    /// Swap out the payload decoder. Needs exclusive access so it can only happen before
    /// the cache is shared with whatever feeds it events.
    pub fn register_decoder(&mut self, decoder: impl PayloadDecoder + 'static) {
        self.decoder = Box::new(decoder);
    }

    pub fn decode(&self, data: &[u8]) -> DecodeResult<Payload> {
        self.decoder.decode_document(data).map(Payload::new)
    }

    pub fn stats(&self) -> CacheStats {
        // one lock at a time, these numbers are only indicative anyways
        let (guilds, members) = {
            let guilds = self.guilds.lock();
            let members = guilds.values().map(|guild| guild.members.len()).sum::<usize>();
            (guilds.len(), members)
        };
        let (channels, indexed_guilds) = {
            let domain = self.channels.read();
            (domain.channels.len(), domain.relationships.guild_count())
        };
        let users = self.users.lock().len();
        let voice_states = self.voice_states.lock().len();

        CacheStats {
            guilds,
            members,
            channels,
            indexed_guilds,
            users,
            voice_states,
        }
    }
}
