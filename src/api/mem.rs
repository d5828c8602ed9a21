//! In-memory stand-in for the admin API server.
//!
//! Reproduces the server contract (status codes, uniqueness and duplicate-bit
//! checks, cascading deletes) so clients can run without a network.

use std::{
    collections::{BTreeMap, VecDeque},
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};
use tracing::trace;

use crate::{
    Result, ShareLock, SigmapError,
    api::{HttpMethod, Transport},
    model::{Action, ComboKey, CreateSignalRequest, MappingDocument, MappingEntryRequest, PutActionsRequest, split_list},
};

#[derive(Debug, Default)]
struct MemState {
    signals: BTreeMap<String, Vec<Action>>,
    mapping: MappingDocument,
    failures: VecDeque<(u16, String)>,
    requests: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemTransport {
    state: ShareLock<MemState>,
}

impl MemTransport {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemState::default())),
        }
    }

    /// Seeds a signal, replacing any existing one with the same name.
    pub fn with_signal(
        self,
        name: &str,
        actions: Vec<Action>,
    ) -> Self {
        self.state.write().unwrap().signals.insert(name.to_string(), actions);
        self
    }

    /// Seeds one mapping entry.
    pub fn with_mapping(
        self,
        key: &ComboKey,
        value: Option<Vec<String>>,
    ) -> Self {
        self.state.write().unwrap().mapping.insert(key.as_str(), value);
        self
    }

    /// Makes the next request fail with `status` before it is routed.
    pub fn fail_next(
        &self,
        status: u16,
        detail: &str,
    ) {
        self.state.write().unwrap().failures.push_back((status, detail.to_string()));
    }

    /// Requests seen so far, formatted as `METHOD /path`.
    pub fn requests(&self) -> Vec<String> {
        self.state.read().unwrap().requests.clone()
    }

    pub fn actions(
        &self,
        name: &str,
    ) -> Option<Vec<Action>> {
        self.state.read().unwrap().signals.get(name).cloned()
    }

    pub fn mapping(&self) -> MappingDocument {
        self.state.read().unwrap().mapping.clone()
    }

    fn route(
        state: &mut MemState,
        method: HttpMethod,
        path: &[&str],
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        match (method, path) {
            (HttpMethod::GET, ["health"]) => Ok(json!({ "ok": true })),
            (HttpMethod::GET, ["ui", "signals"]) => {
                let signals: Vec<JsonValue> = state.signals.iter().map(|(name, actions)| json!({ "name": name, "actions": actions })).collect();
                Ok(json!({ "signals": signals }))
            }
            (HttpMethod::POST, ["ui", "signals"]) => {
                let req: CreateSignalRequest = parse_body(body)?;
                let name = req.name.trim().to_string();
                if name.is_empty() {
                    return Err(SigmapError::transport(Some(400), "Signal name cannot be empty"));
                }
                if state.signals.contains_key(&name) {
                    return Err(SigmapError::transport(Some(409), "Signal already exists"));
                }
                let actions = req.actions.iter().flat_map(|a| split_list(a)).map(|a| Action::new(a, None)).collect();
                state.signals.insert(name.clone(), actions);
                Ok(json!({ "created": true, "name": name }))
            }
            (HttpMethod::GET, ["ui", "signals", name]) => {
                let actions = state.signals.get(*name).ok_or_else(not_found)?;
                Ok(json!({ "name": name, "actions": actions }))
            }
            (HttpMethod::DELETE, ["ui", "signals", name]) => {
                state.signals.remove(*name).ok_or_else(not_found)?;
                let signals = &state.signals;
                state.mapping.retain(|key, _| match ComboKey::parse(key) {
                    Some(key) => reachable(signals, &key),
                    None => false,
                });
                Ok(json!({ "deleted": true }))
            }
            (HttpMethod::PUT, ["ui", "signals", name, "actions"]) => {
                if !state.signals.contains_key(*name) {
                    return Err(not_found());
                }
                let req: PutActionsRequest = parse_body(body)?;
                let mut seen: BTreeMap<u32, String> = BTreeMap::new();
                let mut actions = Vec::with_capacity(req.actions.len());
                for action in req.actions {
                    let action_name = action.name.trim().to_string();
                    if action_name.is_empty() {
                        return Err(SigmapError::transport(Some(422), "action name cannot be empty"));
                    }
                    if let Some(bit) = action.bit {
                        if let Some(first) = seen.get(&bit) {
                            return Err(SigmapError::transport(
                                Some(400),
                                format!("Duplicate bit {} for actions '{}' and '{}'", bit, first, action_name),
                            ));
                        }
                        seen.insert(bit, action_name.clone());
                    }
                    actions.push(Action::new(action_name, action.bit));
                }
                state.signals.insert(name.to_string(), actions);
                Ok(json!({ "updated": true }))
            }
            (HttpMethod::GET, ["ui", "combinations"]) => Ok(serde_json::to_value(&state.mapping)?),
            (HttpMethod::POST, ["ui", "combinations"]) => {
                let req: MappingEntryRequest = parse_body(body)?;
                let key = ComboKey::parse(&req.signal).ok_or_else(|| SigmapError::transport(Some(400), format!("invalid combination key {}", req.signal)))?;
                state.mapping.insert(key.as_str(), req.mapsto);
                Ok(json!({ "updated": true }))
            }
            _ => Err(not_found()),
        }
    }
}

#[async_trait]
impl Transport for MemTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &[&str],
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        let line = format!("{} /{}", method.as_ref(), path.join("/"));
        trace!("mem::{}", line);

        let mut state = self.state.write().unwrap();
        state.requests.push(line);
        if let Some((status, detail)) = state.failures.pop_front() {
            return Err(SigmapError::transport(Some(status), detail));
        }
        Self::route(&mut state, method, path, body)
    }
}

fn not_found() -> SigmapError {
    SigmapError::transport(Some(404), "Not Found")
}

fn parse_body<T: DeserializeOwned>(body: Option<JsonValue>) -> Result<T> {
    serde_json::from_value(body.unwrap_or(JsonValue::Null)).map_err(|err| SigmapError::transport(Some(422), err.to_string()))
}

/// Whether both states of `key` still belong to two distinct signals.
fn reachable(
    signals: &BTreeMap<String, Vec<Action>>,
    key: &ComboKey,
) -> bool {
    let (a, b) = key.states();
    let has = |actions: &Vec<Action>, state: &str| actions.iter().any(|x| x.name == state);
    signals.iter().any(|(left, la)| has(la, &a) && signals.iter().any(|(right, ra)| right != left && has(ra, &b)))
}
