use std::sync::Arc;

use tracing::{debug, warn};

use crate::{Result, dispatcher::Dispatcher, model::Signal};

/// The signal list with create and a two-step delete.
pub struct SignalDirectory {
    dispatcher: Arc<Dispatcher>,
    signals: Arc<Vec<Signal>>,
    // the list predates a mutation whose re-read failed
    stale: bool,
    // name awaiting confirmation
    pending_delete: Option<String>,
}

impl SignalDirectory {
    pub async fn open(dispatcher: Arc<Dispatcher>) -> Result<Self> {
        let signals = dispatcher.client().signals().await?;
        Ok(Self {
            dispatcher,
            signals,
            stale: false,
            pending_delete: None,
        })
    }

    /// Rereads the list, from the cache when it is still valid.
    pub async fn refresh(&mut self) -> Result<()> {
        self.signals = self.dispatcher.client().signals().await?;
        self.stale = false;
        Ok(())
    }

    /// Rereads the list after a successful mutation. A failed read keeps the
    /// previous list and marks it stale; the mutation outcome is unaffected.
    async fn refresh_after_mutation(&mut self) {
        if let Err(err) = self.refresh().await {
            warn!("signal list refresh failed, keeping previous list: {}", err);
            self.stale = true;
        }
    }

    pub fn list(&self) -> &[Signal] {
        &self.signals
    }

    /// Whether the list may miss the last successful create or delete.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Creates a signal and refreshes the list. Returns the stored name.
    pub async fn create(
        &mut self,
        name: &str,
        actions: &str,
    ) -> Result<String> {
        let name = self.dispatcher.create_signal(name, actions).await?;
        self.refresh_after_mutation().await;
        Ok(name)
    }

    /// First step of a delete. Returns false when `name` is not listed.
    pub fn request_delete(
        &mut self,
        name: &str,
    ) -> bool {
        if self.get(name).is_none() {
            return false;
        }
        debug!("delete requested for signal {}", name);
        self.pending_delete = Some(name.to_string());
        true
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the pending signal. `Ok(false)` when nothing was requested.
    ///
    /// The request is consumed even if the delete fails.
    pub async fn confirm_delete(&mut self) -> Result<bool> {
        let Some(name) = self.pending_delete.take() else {
            return Ok(false);
        };
        self.dispatcher.delete_signal(&name).await?;
        self.refresh_after_mutation().await;
        Ok(true)
    }
}
