use serde_json::{Map, Value};

pub mod channel;
pub mod event;
pub mod guild;
pub mod member;
pub mod user;
pub mod voice_state;

pub use channel::Channel;
pub use guild::{Emoji, Guild, Role};
pub use member::Member;
pub use user::User;
pub use voice_state::VoiceState;

/// Payload fields the cache doesn't interpret but still has to hand back on reads.
pub type Extra = Map<String, Value>;
