use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{SplitgateError, SplitgateResult};

/// Reserved top-level key holding the shadow-traffic split.
pub const MIRROR_KEY: &str = "mirror";

/// A traffic weight exactly as the caller wrote it.
///
/// Weights are not interpreted; `"90"` and `90` both become `90` on the
/// control-plane command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TrafficWeight(String);

impl TrafficWeight {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Value> for TrafficWeight {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.clone()),
            other => Self(other.to_string()),
        }
    }
}

impl fmt::Display for TrafficWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Decoded traffic split, split into the mirror and production halves.
///
/// Both halves keep the key order of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficSpec {
    mirror: Option<Vec<(String, TrafficWeight)>>,
    production: Vec<(String, TrafficWeight)>,
}

impl TrafficSpec {
    /// Decode a JSON traffic document such as
    /// `{"mirror": {"shadow": 10}, "blue": 90, "green": 10}`.
    pub fn parse(raw: &str) -> SplitgateResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| SplitgateError::MalformedTrafficSpec(e.to_string()))?;

        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(SplitgateError::MalformedTrafficSpec(format!(
                    "expected an object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mirror = match map.get(MIRROR_KEY) {
            Some(Value::Object(entries)) => Some(weights(entries)),
            Some(other) => {
                tracing::warn!(
                    kind = json_kind(other),
                    "ignoring non-object mirror entry in traffic specification"
                );
                None
            }
            None => None,
        };

        let production = map
            .iter()
            .filter(|(key, _)| key.as_str() != MIRROR_KEY)
            .map(|(key, value)| (key.clone(), TrafficWeight::from(value)))
            .collect();

        Ok(Self { mirror, production })
    }

    /// Shadow-traffic entries, or `None` when no mirror object was given.
    pub fn mirror(&self) -> Option<&[(String, TrafficWeight)]> {
        self.mirror.as_deref()
    }

    /// Every top-level entry except the mirror object.
    pub fn production(&self) -> &[(String, TrafficWeight)] {
        &self.production
    }

    pub fn update_count(&self) -> usize {
        self.mirror.as_ref().map_or(0, Vec::len) + self.production.len()
    }
}

fn weights(entries: &Map<String, Value>) -> Vec<(String, TrafficWeight)> {
    entries
        .iter()
        .map(|(key, value)| (key.clone(), TrafficWeight::from(value)))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
