//! Shape validation of inbound API payloads.
//!
//! Every response is checked against a JSON Schema before it is turned into a
//! typed value, so malformed server data never reaches drafts or the cache.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value as JsonValue, json};

use crate::{
    Result, SigmapError,
    model::{COMBO_KEY_PATTERN, MappingDocument, Signal, SignalList},
};

/// A typed payload with a declared JSON Schema.
pub trait Shape: DeserializeOwned {
    /// Returns the schema the raw payload must satisfy.
    fn schema() -> JsonValue;
}

/// Validates `payload` against `T`'s schema and converts it.
///
/// Fails with [`SigmapError::SchemaViolation`] naming the offending field as a
/// `$`-rooted JSON pointer.
pub fn conform<T: Shape>(payload: JsonValue) -> Result<T> {
    let validator = jsonschema::options().build(&T::schema()).map_err(|err| SigmapError::Convert(format!("invalid schema: {}", err)))?;

    validator.validate(&payload).map_err(|error| SigmapError::SchemaViolation {
        field: format!("${}", error.instance_path()),
        message: error.to_string(),
    })?;

    serde_json::from_value::<T>(payload).map_err(|err| SigmapError::SchemaViolation {
        field: "$".to_string(),
        message: err.to_string(),
    })
}

fn action_schema() -> JsonValue {
    json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "bit": { "type": ["integer", "null"], "minimum": 0, "maximum": u32::MAX }
        }
    })
}

fn signal_schema() -> JsonValue {
    json!({
        "type": "object",
        "required": ["name", "actions"],
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "actions": { "type": "array", "items": action_schema() }
        }
    })
}

impl Shape for Signal {
    fn schema() -> JsonValue {
        signal_schema()
    }
}

impl Shape for SignalList {
    fn schema() -> JsonValue {
        json!({
            "type": "object",
            "required": ["signals"],
            "properties": {
                "signals": { "type": "array", "items": signal_schema() }
            }
        })
    }
}

impl Shape for MappingDocument {
    fn schema() -> JsonValue {
        json!({
            "type": "object",
            "propertyNames": { "pattern": COMBO_KEY_PATTERN },
            "additionalProperties": {
                "oneOf": [
                    { "type": "array", "items": { "type": "string" } },
                    { "type": "null" }
                ]
            }
        })
    }
}

/// Acknowledgement of a mutation, e.g. `{"updated": true}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(serde_json::Map<String, JsonValue>);

impl Ack {
    pub fn flag(
        &self,
        key: &str,
    ) -> bool {
        self.0.get(key).and_then(JsonValue::as_bool).unwrap_or(false)
    }
}

impl Shape for Ack {
    fn schema() -> JsonValue {
        json!({ "type": "object" })
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
}

impl Shape for Health {
    fn schema() -> JsonValue {
        json!({
            "type": "object",
            "required": ["ok"],
            "properties": { "ok": { "type": "boolean" } }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation_field(err: SigmapError) -> String {
        match err {
            SigmapError::SchemaViolation {
                field,
                ..
            } => field,
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_conform_signal_list() {
        let list: SignalList = conform(json!({
            "signals": [
                { "name": "EEG", "actions": [{ "name": "blink", "bit": 1 }, { "name": "wink", "bit": null }] },
                { "name": "jaw", "actions": [] }
            ]
        }))
        .unwrap();

        assert_eq!(list.signals.len(), 2);
        assert_eq!(list.signals[0].actions[0].bit, Some(1));
        assert_eq!(list.signals[0].actions[1].bit, None);
    }

    #[test]
    fn test_conform_names_offending_field() {
        let err = conform::<SignalList>(json!({
            "signals": [
                { "name": "EEG", "actions": [{ "name": "blink", "bit": "one" }] }
            ]
        }))
        .unwrap_err();
        assert_eq!(violation_field(err), "$/signals/0/actions/0/bit");

        let err = conform::<Signal>(json!({ "name": "EEG", "actions": [{ "name": "", "bit": 2 }] })).unwrap_err();
        assert_eq!(violation_field(err), "$/actions/0/name");
    }

    #[test]
    fn test_conform_rejects_negative_bit() {
        let err = conform::<Signal>(json!({ "name": "EEG", "actions": [{ "name": "blink", "bit": -1 }] })).unwrap_err();
        assert_eq!(err.scope(), crate::ErrorScope::Page);
        assert_eq!(violation_field(err), "$/actions/0/bit");
    }

    #[test]
    fn test_conform_mapping_document() {
        let doc: MappingDocument = conform(json!({
            "['open', 'clenched']": ["grip", "hold"],
            "['closed', 'clenched']": null
        }))
        .unwrap();
        assert_eq!(doc.len(), 2);

        let err = conform::<MappingDocument>(json!({ "['open', 'clenched']": "grip" })).unwrap_err();
        assert!(matches!(err, SigmapError::SchemaViolation { .. }));

        let err = conform::<MappingDocument>(json!({ "openclenched": null })).unwrap_err();
        assert!(matches!(err, SigmapError::SchemaViolation { .. }));
    }

    #[test]
    fn test_conform_mapping_key_with_line_break() {
        let key = crate::model::ComboKey::new("half\nopen", "clenched");
        let doc: MappingDocument = conform(json!({ (key.as_str()): ["grip"] })).unwrap();
        assert_eq!(doc.get(key.as_str()), Some(Some(&["grip".to_string()][..])));
    }

    #[test]
    fn test_conform_top_level_type() {
        let err = conform::<SignalList>(json!([])).unwrap_err();
        assert_eq!(violation_field(err), "$");
    }

    #[test]
    fn test_ack_and_health() {
        let ack: Ack = conform(json!({ "updated": true })).unwrap();
        assert!(ack.flag("updated"));
        assert!(!ack.flag("deleted"));

        let health: Health = conform(json!({ "ok": true })).unwrap();
        assert!(health.ok);
        assert!(conform::<Health>(json!({})).is_err());
    }
}
