//! Gateway payloads send zero values where a field is unset: guild id `0` for "no guild" and
//! the zero time for "never". These map both to `None` so they never reach the cache as values.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use twilight_model::datetime::Timestamp;
use twilight_model::id::Id;

const ZERO_TIME: &str = "0001-01-01T00:00:00";

pub fn zero_id_as_none<'de, D, T>(deserializer: D) -> Result<Option<Id<T>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) if id == "0" => Ok(None),
        Some(Value::Number(id)) if id.as_u64() == Some(0) => Ok(None),
        Some(other) => Id::deserialize(other).map(Some).map_err(D::Error::custom),
    }
}

pub fn zero_time_as_none<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(time)) if time.starts_with(ZERO_TIME) => Ok(None),
        Some(other) => Timestamp::deserialize(other).map(Some).map_err(D::Error::custom),
    }
}
