use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::util::error::DecodeError;
use crate::util::DecodeResult;

/// Turns raw gateway bytes into a document the cache can shape into typed values.
///
/// The cache never looks at the wire format itself, so anything that can produce a
/// `serde_json::Value` (plain json, a zlib inflating wrapper, etf, ...) can be plugged in.
pub trait PayloadDecoder: Send + Sync {
    fn decode_document(&self, data: &[u8]) -> DecodeResult<Value>;
}

/// Plain json payloads, the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonDecoder;

impl PayloadDecoder for JsonDecoder {
    fn decode_document(&self, data: &[u8]) -> DecodeResult<Value> {
        serde_json::from_slice(data).map_err(DecodeError::Syntax)
    }
}

/// A decoded event payload, kept as a document so it can be shaped more than once
/// (id only first, full value later) or merged onto values that are already cached.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    document: Value,
}

impl Payload {
    pub fn new(document: Value) -> Self {
        Payload { document }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn shape<T: DeserializeOwned>(&self) -> DecodeResult<T> {
        T::deserialize(&self.document).map_err(DecodeError::Shape)
    }

    /// Sub-document for a single field, used when only part of an event maps onto cached state.
    /// A missing field is an empty object so merging it changes nothing.
    pub fn section(&self, field: &str) -> Payload {
        let document = match self.document.get(field) {
            Some(section) => section.clone(),
            None => {
                trace!("Payload has no {} field, using an empty section", field);
                Value::Object(Default::default())
            }
        };
        Payload { document }
    }

    /// Applies the fields present in this payload on top of `target` and returns the result.
    /// `target` itself is left alone so a failed merge never leaves half applied state behind.
    pub fn merge_onto<T: Serialize + DeserializeOwned>(&self, target: &T) -> DecodeResult<T> {
        let mut base = serde_json::to_value(target).map_err(DecodeError::Encode)?;
        merge_documents(&mut base, &self.document);
        T::deserialize(&base).map_err(DecodeError::Shape)
    }
}

/// Objects merge key by key, everything else (arrays, scalars, null) replaces what was there.
pub fn merge_documents(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(key) {
                    Some(current) if current.is_object() && value.is_object() => merge_documents(current, value),
                    _ => {
                        existing.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

/// Only the identifying field of an event, for handlers that want to look before decoding everything.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct IdHolder<T> {
    pub id: T,
}
