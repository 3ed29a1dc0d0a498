mod common;

use std::thread::sleep;
use std::time::Duration;

use serde_json::json;
use twilight_model::datetime::Timestamp;

use gearcache::events::{
    on_channel_create, on_channel_delete, on_channel_pins_update, on_channel_update, on_guild_create, on_guild_delete,
};
use gearcache::{CacheConfig, StoreLimits};

use common::*;

fn expiring_channels() -> gearcache::Cache {
    cache_with(CacheConfig {
        channels: StoreLimits {
            max_age: Duration::from_millis(250),
            ..StoreLimits::default()
        },
        ..CacheConfig::default()
    })
}

fn pin_timestamp(value: &str) -> Timestamp {
    serde_json::from_value(json!(value)).unwrap()
}

#[test]
fn create_stores_and_indexes() {
    let cache = cache();
    let event = on_channel_create(&cache, &bytes(channel(10, Some(1), "general"))).unwrap();
    assert_eq!(event.0.id, channel_id(10));

    let stored = cache.get_channel(&channel_id(10)).unwrap();
    assert_eq!(stored.name.as_deref(), Some("general"));
    assert_eq!(stored.guild_id, Some(guild_id(1)));
    assert_eq!(
        cache.get_guild_channels(&guild_id(1)).iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![channel_id(10)]
    );
}

#[test]
fn double_create_merges_and_registers_once() {
    let cache = cache();
    let mut first = channel(10, Some(1), "general");
    first["topic"] = json!("welcome");
    on_channel_create(&cache, &bytes(first)).unwrap();

    let second = json!({"id": "10", "guild_id": "1", "name": "chat"});
    let event = on_channel_create(&cache, &bytes(second)).unwrap();
    // the event is the standalone payload, not the merged value
    assert!(event.0.extra.get("topic").is_none());

    let stored = cache.get_channel(&channel_id(10)).unwrap();
    assert_eq!(stored.name.as_deref(), Some("chat"));
    assert_eq!(stored.extra.get("topic"), Some(&json!("welcome")));
    assert_eq!(cache.get_guild_channels(&guild_id(1)).len(), 1);
    assert_eq!(cache.stats().channels, 1);
}

#[test]
fn update_before_create_inserts_and_indexes() {
    let cache = cache();
    let event = on_channel_update(&cache, &bytes(channel(11, Some(2), "late"))).unwrap();
    assert_eq!(event.0.name.as_deref(), Some("late"));
    assert!(cache.get_channel(&channel_id(11)).is_some());
    assert_eq!(cache.get_guild_channels(&guild_id(2)).len(), 1);
}

#[test]
fn update_merges_onto_known_channel() {
    let cache = cache();
    let mut original = channel(12, Some(2), "before");
    original["nsfw"] = json!(true);
    on_channel_create(&cache, &bytes(original)).unwrap();

    let event = on_channel_update(&cache, &bytes(json!({"id": "12", "name": "after"}))).unwrap();
    assert_eq!(event.0.name.as_deref(), Some("after"));
    assert_eq!(event.0.guild_id, Some(guild_id(2)));
    assert_eq!(event.0.extra.get("nsfw"), Some(&json!(true)));
    assert_eq!(cache.get_channel(&channel_id(12)), Some(event.0));
}

#[test]
fn delete_unregisters_and_drops_empty_entries() {
    let cache = cache();
    on_channel_create(&cache, &bytes(channel(10, Some(1), "a"))).unwrap();
    on_channel_create(&cache, &bytes(channel(11, Some(1), "b"))).unwrap();

    on_channel_delete(&cache, &bytes(channel(10, Some(1), "a"))).unwrap();
    assert!(cache.get_channel(&channel_id(10)).is_none());
    assert_eq!(cache.get_guild_channels(&guild_id(1)).len(), 1);

    on_channel_delete(&cache, &bytes(channel(11, Some(1), "b"))).unwrap();
    assert!(cache.get_guild_channels(&guild_id(1)).is_empty());
    assert_eq!(cache.stats().indexed_guilds, 0);
}

#[test]
fn deleting_an_unknown_channel_is_fine() {
    let cache = cache();
    let event = on_channel_delete(&cache, &bytes(channel(99, Some(1), "ghost"))).unwrap();
    assert_eq!(event.0.id, channel_id(99));
}

#[test]
fn dm_channels_are_never_indexed() {
    let cache = cache();
    on_channel_create(&cache, &bytes(json!({"id": "20", "type": 1}))).unwrap();
    assert!(cache.get_channel(&channel_id(20)).is_some());
    assert_eq!(cache.stats().indexed_guilds, 0);
}

#[test]
fn guild_delete_cascades_after_any_channel_history() {
    let cache = cache();
    on_guild_create(&cache, &bytes(guild(1, &[10, 11], &[]))).unwrap();
    on_channel_create(&cache, &bytes(channel(12, Some(1), "new"))).unwrap();
    on_channel_update(&cache, &bytes(json!({"id": "12", "name": "renamed"}))).unwrap();
    on_channel_delete(&cache, &bytes(channel(11, Some(1), "gone"))).unwrap();
    on_channel_create(&cache, &bytes(channel(11, Some(1), "back"))).unwrap();

    on_guild_delete(&cache, &bytes(json!({"id": "1"}))).unwrap();
    for id in [10, 11, 12] {
        assert!(cache.get_channel(&channel_id(id)).is_none());
    }
    assert!(cache.get_guild_channels(&guild_id(1)).is_empty());
    assert_eq!(cache.stats().indexed_guilds, 0);
    assert_eq!(cache.stats().channels, 0);
}

#[test]
fn pins_update_sets_the_timestamp() {
    let cache = cache();
    on_channel_create(&cache, &bytes(channel(10, Some(1), "general"))).unwrap();
    on_channel_pins_update(
        &cache,
        &bytes(json!({"guild_id": "1", "channel_id": "10", "last_pin_timestamp": "2021-03-15T12:00:00.000000+00:00"})),
    )
    .unwrap();
    assert_eq!(
        cache.get_channel(&channel_id(10)).unwrap().last_pin_timestamp,
        Some(pin_timestamp("2021-03-15T12:00:00.000000+00:00"))
    );
}

#[test]
fn pins_update_without_timestamp_changes_nothing() {
    let cache = cache();
    let mut pinned = channel(10, Some(1), "general");
    pinned["last_pin_timestamp"] = json!("2021-03-15T12:00:00.000000+00:00");
    on_channel_create(&cache, &bytes(pinned)).unwrap();

    on_channel_pins_update(&cache, &bytes(json!({"channel_id": "10", "last_pin_timestamp": null}))).unwrap();
    on_channel_pins_update(&cache, &bytes(json!({"channel_id": "10"}))).unwrap();
    assert_eq!(
        cache.get_channel(&channel_id(10)).unwrap().last_pin_timestamp,
        Some(pin_timestamp("2021-03-15T12:00:00.000000+00:00"))
    );
}

#[test]
fn pins_update_for_unknown_channel_is_ignored() {
    let cache = cache();
    let event = on_channel_pins_update(
        &cache,
        &bytes(json!({"channel_id": "77", "last_pin_timestamp": "2021-03-15T12:00:00.000000+00:00"})),
    )
    .unwrap();
    assert_eq!(event.channel_id, channel_id(77));
    assert!(cache.get_channel(&channel_id(77)).is_none());
}

#[test]
fn malformed_payloads_leave_the_cache_alone() {
    let cache = cache();
    on_channel_create(&cache, &bytes(channel(10, Some(1), "general"))).unwrap();

    assert!(on_channel_create(&cache, b"{\"id\": \"10\", \"name\": ").is_err());
    assert!(on_channel_update(&cache, &bytes(json!({"id": "10", "name": 5}))).is_err());
    assert!(on_channel_delete(&cache, &bytes(json!({"name": "no id"}))).is_err());

    let stored = cache.get_channel(&channel_id(10)).unwrap();
    assert_eq!(stored.name.as_deref(), Some("general"));
    assert_eq!(cache.get_guild_channels(&guild_id(1)).len(), 1);
}

#[test]
fn evicted_channels_leave_the_index() {
    let cache = cache_with(CacheConfig {
        channels: StoreLimits {
            max_items: 2,
            ..StoreLimits::default()
        },
        ..CacheConfig::default()
    });
    for id in [10, 11, 12] {
        on_channel_create(&cache, &bytes(channel(id, Some(1), "c"))).unwrap();
    }
    assert!(cache.get_channel(&channel_id(10)).is_none());
    assert_eq!(
        cache.get_guild_channels(&guild_id(1)).iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![channel_id(11), channel_id(12)]
    );
    assert_eq!(cache.stats().channels, 2);
}

#[test]
fn expired_channel_recreated_in_another_guild_moves_over() {
    let cache = expiring_channels();
    on_channel_create(&cache, &bytes(channel(10, Some(1), "first home"))).unwrap();
    sleep(Duration::from_millis(300));
    assert!(cache.get_channel(&channel_id(10)).is_none());

    on_channel_create(&cache, &bytes(channel(10, Some(2), "second home"))).unwrap();
    assert!(cache.get_guild_channels(&guild_id(1)).is_empty());
    assert_eq!(cache.get_guild_channels(&guild_id(2)).len(), 1);
    assert_eq!(cache.stats().indexed_guilds, 1);

    // the old guild going away must not take the moved channel with it
    on_guild_delete(&cache, &bytes(json!({"id": "1"}))).unwrap();
    assert_eq!(cache.get_channel(&channel_id(10)).unwrap().guild_id, Some(guild_id(2)));
}

#[test]
fn deleting_an_expired_channel_unregisters_its_stored_guild() {
    let cache = expiring_channels();
    on_channel_create(&cache, &bytes(channel(10, Some(1), "general"))).unwrap();
    sleep(Duration::from_millis(300));

    on_channel_delete(&cache, &bytes(json!({"id": "10", "type": 0}))).unwrap();
    assert_eq!(cache.stats().indexed_guilds, 0);
    assert_eq!(cache.stats().channels, 0);
}

#[test]
fn zero_guild_id_means_no_guild() {
    let cache = cache();
    on_channel_create(&cache, &bytes(json!({"id": "10", "type": 1, "guild_id": "0"}))).unwrap();
    on_channel_create(&cache, &bytes(json!({"id": "11", "type": 1, "guild_id": 0}))).unwrap();

    assert_eq!(cache.get_channel(&channel_id(10)).unwrap().guild_id, None);
    assert_eq!(cache.get_channel(&channel_id(11)).unwrap().guild_id, None);
    assert_eq!(cache.stats().indexed_guilds, 0);

    let event = on_channel_pins_update(&cache, &bytes(json!({"guild_id": "0", "channel_id": "10"}))).unwrap();
    assert_eq!(event.guild_id, None);
}

#[test]
fn zero_time_pins_update_changes_nothing() {
    let cache = cache();
    let mut pinned = channel(10, Some(1), "general");
    pinned["last_pin_timestamp"] = json!("2021-03-15T12:00:00.000000+00:00");
    on_channel_create(&cache, &bytes(pinned)).unwrap();

    let event = on_channel_pins_update(
        &cache,
        &bytes(json!({"channel_id": "10", "last_pin_timestamp": "0001-01-01T00:00:00Z"})),
    )
    .unwrap();
    assert_eq!(event.last_pin_timestamp, None);
    assert_eq!(
        cache.get_channel(&channel_id(10)).unwrap().last_pin_timestamp,
        Some(pin_timestamp("2021-03-15T12:00:00.000000+00:00"))
    );
}

#[test]
fn returned_channels_are_copies() {
    let cache = cache();
    on_channel_create(&cache, &bytes(channel(10, Some(1), "general"))).unwrap();
    let mut copy = cache.get_channel(&channel_id(10)).unwrap();
    copy.name = Some("mutated".to_string());
    copy.guild_id = None;
    let mut listed = cache.get_guild_channels(&guild_id(1));
    listed.clear();

    let stored = cache.get_channel(&channel_id(10)).unwrap();
    assert_eq!(stored.name.as_deref(), Some("general"));
    assert_eq!(cache.get_guild_channels(&guild_id(1)).len(), 1);
}
