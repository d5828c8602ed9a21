use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::Result;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

/// Raw request/response seam between the API client and the server.
///
/// `path` holds unencoded path segments, e.g. `["ui", "signals", "EEG"]`.
/// Implementations return the decoded JSON body of a 2xx response and map
/// anything else to [`crate::SigmapError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &[&str],
        body: Option<JsonValue>,
    ) -> Result<JsonValue>;
}
