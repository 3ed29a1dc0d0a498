use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use git_version::git_version;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use gearcache::events::handle_event;
use gearcache::{Cache, CacheConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_VERSION: &str = git_version!(fallback = "unknown");

/// A single line of a gateway event log.
#[derive(Deserialize)]
struct Envelope {
    t: Option<String>,
    #[serde(default)]
    d: Value,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt::init();
    info!("gearcache v{} ({}) initializing!", VERSION, GIT_VERSION);

    let path = env::args()
        .nth(1)
        .ok_or("Usage: gearcache <event log>, one gateway payload per line")?;
    let config = CacheConfig::from_env()?;
    let cache = Cache::new(config)?;

    let reader = BufReader::new(File::open(&path)?);
    let mut handled = 0u64;
    let mut failed = 0u64;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let envelope: Envelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Line {} is not a gateway payload: {}", number + 1, e);
                failed += 1;
                continue;
            }
        };
        // op codes other than dispatch don't carry an event name
        let kind = match envelope.t {
            Some(kind) => kind,
            None => continue,
        };

        let data = serde_json::to_vec(&envelope.d)?;
        match handle_event(&cache, &kind, &data) {
            Ok(Some(_)) => {
                trace!("Applied {} from line {}", kind, number + 1);
                handled += 1;
            }
            Ok(None) => debug!("Skipping {}, not a cache event", kind),
            Err(e) => {
                warn!("Failed to apply {} from line {}: {}", kind, number + 1, e);
                failed += 1;
            }
        }
    }

    let stats = cache.stats();
    info!(
        "Replay done: {} events applied, {} failed. Cached: {} guilds, {} members, {} channels ({} guilds indexed), {} users",
        handled, failed, stats.guilds, stats.members, stats.channels, stats.indexed_guilds, stats.users
    );

    io::stdout().write_all(&cache.metrics.encode()?)?;
    Ok(())
}
