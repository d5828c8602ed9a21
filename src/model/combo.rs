//! Combination keys and the combination set of the mapping view.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Signal;

/// Format: `['<state a>', '<state b>']`, exact quoting and spacing. States may
/// contain any character, line breaks included.
pub const COMBO_KEY_PATTERN: &str = r"^\['([\s\S]*)', '([\s\S]*)'\]$";

static COMBO_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(COMBO_KEY_PATTERN).unwrap());

/// Serializes a state pair into the key the server indexes mappings by.
pub fn combo_key(
    a: &str,
    b: &str,
) -> String {
    format!("['{}', '{}']", a, b)
}

/// Canonical combination key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComboKey(String);

impl ComboKey {
    pub fn new(
        a: &str,
        b: &str,
    ) -> Self {
        Self(combo_key(a, b))
    }

    /// Accepts only strings in the exact key format.
    pub fn parse(key: &str) -> Option<Self> {
        COMBO_KEY_RE.is_match(key).then(|| Self(key.to_string()))
    }

    /// Recovers the state pair.
    ///
    /// The format does not escape quotes, so a first state containing `', '`
    /// splits at the last occurrence.
    pub fn states(&self) -> (String, String) {
        match COMBO_KEY_RE.captures(&self.0) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => (String::new(), String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComboKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComboKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the mapping view: a focal state paired with a state of another signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub state: String,
    pub other_signal: String,
    pub other_state: String,
}

impl Combination {
    pub fn key(&self) -> ComboKey {
        ComboKey::new(&self.state, &self.other_state)
    }

    pub fn pair(&self) -> (&str, &str) {
        (&self.state, &self.other_state)
    }
}

/// Builds the combination set for `focal`.
///
/// Outer loop over the focal states, then the other signals in declared
/// order, then each of their states. Empty when the focal signal is unknown,
/// has no states, or is the only signal.
pub fn enumerate_combinations(
    focal: &str,
    signals: &[Signal],
) -> Vec<Combination> {
    let Some(focal_signal) = signals.iter().find(|s| s.name == focal) else {
        return Vec::new();
    };

    let mut combos = Vec::new();
    for state in focal_signal.states() {
        for other in signals.iter().filter(|s| s.name != focal) {
            for other_state in other.states() {
                combos.push(Combination {
                    state: state.clone(),
                    other_signal: other.name.clone(),
                    other_state,
                });
            }
        }
    }
    combos
}
