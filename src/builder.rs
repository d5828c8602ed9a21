use std::sync::Arc;

use crate::{Config, Console, Result, api::Transport};

#[derive(Default)]
pub struct ConsoleBuilder {
    config: Config,
    transport: Option<Arc<dyn Transport>>,
}

impl ConsoleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn base_url(
        mut self,
        url: &str,
    ) -> Self {
        self.config.api.base_url = url.to_string();
        self
    }

    pub fn timeout_ms(
        mut self,
        ms: u64,
    ) -> Self {
        self.config.api.timeout_ms = ms;
        self
    }

    pub fn cache_capacity(
        mut self,
        n: usize,
    ) -> Self {
        self.config.cache.capacity = n;
        self
    }

    pub fn toast_ttl_ms(
        mut self,
        ms: u64,
    ) -> Self {
        self.config.notify.ttl_ms = ms;
        self
    }

    /// Replaces the HTTP transport, e.g. with [`crate::api::MemTransport`].
    pub fn transport(
        mut self,
        transport: Arc<dyn Transport>,
    ) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(&self) -> Result<Console> {
        let config = self.config.clone();
        match &self.transport {
            Some(transport) => Ok(Console::new_with_transport(config, transport.clone())),
            None => Console::new_with_config(config),
        }
    }
}
