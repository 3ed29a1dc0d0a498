use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

pub struct CacheMetrics {
    pub registry: Registry,

    pub gateway_events: IntCounterVec,
    pub decode_failures: IntCounterVec,

    pub guilds: IntGauge,
    pub channels: IntGauge,
    pub members: IntGauge,
    pub users: IntGauge,
}

impl CacheMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("gearcache".to_string()), None)?;

        let gateway_events = IntCounterVec::new(
            Opts::new("gateway_events", "Gateway events handed to the cache"),
            &["event"],
        )?;
        registry.register(Box::new(gateway_events.clone()))?;

        let decode_failures = IntCounterVec::new(
            Opts::new("decode_failures", "Gateway events that failed to decode"),
            &["event"],
        )?;
        registry.register(Box::new(decode_failures.clone()))?;

        let guilds = IntGauge::new("guilds", "Cached guilds")?;
        registry.register(Box::new(guilds.clone()))?;

        let channels = IntGauge::new("channels", "Cached channels")?;
        registry.register(Box::new(channels.clone()))?;

        let members = IntGauge::new("members", "Total cached members")?;
        registry.register(Box::new(members.clone()))?;

        let users = IntGauge::new("users", "Total cached users")?;
        registry.register(Box::new(users.clone()))?;

        Ok(CacheMetrics {
            registry,
            gateway_events,
            decode_failures,
            guilds,
            channels,
            members,
            users,
        })
    }

    /// Prometheus text exposition of everything in the registry.
    pub fn encode(&self) -> prometheus::Result<Vec<u8>> {
        let mut buffer = vec![];
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}
