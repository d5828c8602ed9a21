use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::{
    Result, SigmapError,
    api::{HttpMethod, Transport},
    config::ApiConfig,
};

/// [`Transport`] speaking JSON over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
    // request timeout in milliseconds
    timeout: u64,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| SigmapError::Config(format!("invalid api base url '{}': {}", config.base_url, err)))?;
        if base_url.cannot_be_a_base() {
            return Err(SigmapError::Config(format!("invalid api base url '{}'", config.base_url)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("accept"), HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("cache-control"), HeaderValue::from_static("no-store"));
        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url,
            client,
            timeout: config.timeout_ms,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(
        &self,
        path: &[&str],
    ) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SigmapError::Config(format!("invalid api base url '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &[&str],
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        let url = self.url(path)?;
        trace!("http::{}({})", method.as_ref(), url);

        let mut request = self
            .client
            .request(
                method.as_ref().parse().map_err(|_| SigmapError::Convert(format!("invalid method '{:?}'", method)))?,
                url,
            )
            .timeout(Duration::from_millis(self.timeout));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let res = request.send().await.map_err(|err| SigmapError::transport(None, err.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            let detail = res.json::<JsonValue>().await.ok().and_then(|v| v.get("detail").and_then(JsonValue::as_str).map(str::to_string));
            let message = detail.unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(SigmapError::transport(Some(status.as_u16()), message));
        }

        let text = res.text().await?;
        if text.trim().is_empty() {
            return Ok(JsonValue::Object(Default::default()));
        }
        serde_json::from_str(&text).map_err(|err| SigmapError::SchemaViolation {
            field: "$".to_string(),
            message: format!("response is not JSON: {}", err),
        })
    }
}
