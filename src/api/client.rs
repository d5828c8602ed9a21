use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::{
    Result,
    api::{HttpMethod, Transport},
    common::{CacheKey, ResponseCache},
    model::{Action, CreateSignalRequest, MappingDocument, MappingEntryRequest, PutActionsRequest, Signal, SignalList},
    schema::{Ack, Health, Shape, conform},
};

/// Typed access to the admin API.
///
/// Reads go through the shared [`ResponseCache`]; every response is validated
/// with [`conform`] before it is cached or returned. Mutations never touch the
/// cache, the dispatcher decides what to invalidate.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: ResponseCache,
    ) -> Self {
        Self {
            transport,
            cache,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    async fn call<T: Shape>(
        &self,
        method: HttpMethod,
        path: &[&str],
        body: Option<impl Serialize>,
    ) -> Result<T> {
        let body = body.map(serde_json::to_value).transpose()?;
        let payload = self.transport.request(method, path, body).await?;
        conform(payload)
    }

    pub async fn health(&self) -> Result<bool> {
        let health: Health = self.call(HttpMethod::GET, &["health"], None::<()>).await?;
        Ok(health.ok)
    }

    pub async fn signals(&self) -> Result<Arc<Vec<Signal>>> {
        if let Some(signals) = self.cache.signals() {
            debug!("cache hit: signals");
            return Ok(signals);
        }
        let list: SignalList = self.call(HttpMethod::GET, &["ui", "signals"], None::<()>).await?;
        let signals = Arc::new(list.signals);
        self.cache.set_signals(signals.clone());
        Ok(signals)
    }

    pub async fn signal(
        &self,
        name: &str,
    ) -> Result<Arc<Signal>> {
        if let Some(signal) = self.cache.signal(name) {
            debug!("cache hit: signal {}", name);
            return Ok(signal);
        }
        let signal: Signal = self.call(HttpMethod::GET, &["ui", "signals", name], None::<()>).await?;
        let signal = Arc::new(signal);
        self.cache.set_signal(signal.clone());
        Ok(signal)
    }

    pub async fn mapping(&self) -> Result<Arc<MappingDocument>> {
        if let Some(mapping) = self.cache.mapping() {
            debug!("cache hit: mapping");
            return Ok(mapping);
        }
        let mapping: MappingDocument = self.call(HttpMethod::GET, &["ui", "combinations"], None::<()>).await?;
        let mapping = Arc::new(mapping);
        self.cache.set_mapping(mapping.clone());
        Ok(mapping)
    }

    pub async fn create_signal(
        &self,
        req: &CreateSignalRequest,
    ) -> Result<Ack> {
        self.call(HttpMethod::POST, &["ui", "signals"], Some(req)).await
    }

    pub async fn delete_signal(
        &self,
        name: &str,
    ) -> Result<Ack> {
        self.call(HttpMethod::DELETE, &["ui", "signals", name], None::<()>).await
    }

    pub async fn put_actions(
        &self,
        name: &str,
        actions: Vec<Action>,
    ) -> Result<Ack> {
        let body = PutActionsRequest {
            actions,
        };
        self.call(HttpMethod::PUT, &["ui", "signals", name, "actions"], Some(&body)).await
    }

    pub async fn put_mapping_entry(
        &self,
        req: &MappingEntryRequest,
    ) -> Result<Ack> {
        self.call(HttpMethod::POST, &["ui", "combinations"], Some(req)).await
    }

    pub fn invalidate(
        &self,
        keys: &[CacheKey],
    ) {
        self.cache.invalidate(keys);
    }
}
