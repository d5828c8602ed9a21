use serde::{Deserialize, Serialize};

/// A named, optionally bit-indexed operation of one signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub bit: Option<u32>,
}

impl Action {
    pub fn new(
        name: impl Into<String>,
        bit: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            bit,
        }
    }
}

/// A named input channel and its ordered actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Signal {
    /// State labels used by the mapping view: the action names in declared order.
    pub fn states(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.name.clone()).collect()
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// Body of `GET /ui/signals`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalList {
    pub signals: Vec<Signal>,
}

/// Body of `POST /ui/signals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSignalRequest {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Body of `PUT /ui/signals/{name}/actions`. Always the full list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutActionsRequest {
    pub actions: Vec<Action>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_signal_missing_bit_is_null() {
        let signal: Signal = serde_json::from_value(json!({
            "name": "EEG",
            "actions": [{ "name": "blink" }, { "name": "wink", "bit": 3 }]
        }))
        .unwrap();

        assert_eq!(signal.actions[0].bit, None);
        assert_eq!(signal.actions[1].bit, Some(3));
        assert_eq!(signal.states(), vec!["blink", "wink"]);
    }

    #[test]
    fn test_put_actions_serializes_null_bits() {
        let body = PutActionsRequest {
            actions: vec![Action::new("blink", None)],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "actions": [{ "name": "blink", "bit": null }] })
        );
    }
}
