//! Admin console - the root object of the client.
//!
//! The console owns the wiring shared by every view:
//! - The transport to the admin API and the response cache
//! - The mutation dispatcher
//! - The notification center

use std::sync::Arc;

use tracing::info;

use crate::{
    Config, Result,
    api::{ApiClient, HttpTransport, Transport},
    common::ResponseCache,
    dispatcher::Dispatcher,
    notify::ToastCenter,
    view::{MappingEditor, SignalDirectory, SignalEditor},
};

/// Entry point for driving the console.
///
/// # Example
///
/// ```rust,ignore
/// let console = ConsoleBuilder::new().base_url("http://127.0.0.1:7001").build()?;
///
/// let mut editor = console.open_signal("EEG").await?;
/// editor.add_row();
/// editor.save().await?;
/// ```
pub struct Console {
    /// Dispatcher shared by all views.
    dispatcher: Arc<Dispatcher>,
    /// Toasts raised by mutations.
    toasts: Arc<ToastCenter>,
    config: Config,
}

impl Console {
    /// Creates a console talking HTTP to the configured API host.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config.api)?);
        Ok(Self::new_with_transport(config, transport))
    }

    pub fn new_with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let toasts = Arc::new(ToastCenter::new(config.notify.ttl_ms, config.notify.queue_size));
        let client = ApiClient::new(transport, ResponseCache::new(config.cache.capacity));
        let dispatcher = Arc::new(Dispatcher::new(client, toasts.clone()));
        info!("console ready for {}", config.api.base_url);

        Self {
            dispatcher,
            toasts,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    pub fn notifications(&self) -> Arc<ToastCenter> {
        self.toasts.clone()
    }

    pub async fn health(&self) -> Result<bool> {
        self.dispatcher.client().health().await
    }

    pub async fn directory(&self) -> Result<SignalDirectory> {
        SignalDirectory::open(self.dispatcher.clone()).await
    }

    pub async fn open_signal(
        &self,
        name: &str,
    ) -> Result<SignalEditor> {
        SignalEditor::open(self.dispatcher.clone(), name).await
    }

    pub async fn open_mapping(
        &self,
        focal: &str,
    ) -> Result<MappingEditor> {
        MappingEditor::open(self.dispatcher.clone(), focal).await
    }
}
