//! Mutation dispatcher.
//!
//! The dispatcher is responsible for:
//! - Validating drafts before anything is sent
//! - Submitting full-replacement payloads to the API
//! - Invalidating exactly the cache entries a mutation can affect
//! - Notifying the user of the outcome
//!
//! Failed submissions are never retried; the caller keeps its draft.

mod validate;

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    Result, ValidationError,
    api::ApiClient,
    common::CacheKey,
    draft::ActionDraft,
    model::{Action, ComboKey, CreateSignalRequest, MappingEntryRequest, parse_action_list, split_list},
    notify::Notifier,
};

pub use validate::validate_actions;

pub struct Dispatcher {
    /// Typed API access and the shared response cache.
    client: ApiClient,
    /// Where outcomes are reported.
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    pub fn new(
        client: ApiClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            notifier,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    /// Validates `draft` and replaces the signal's actions with it.
    ///
    /// Returns the submitted (trimmed) actions. Validation failures abort
    /// before any request and are not notified; they belong next to the input.
    pub async fn submit_actions(
        &self,
        signal: &str,
        draft: &ActionDraft,
    ) -> Result<Vec<Action>> {
        let actions = validate_actions(draft.rows())?;

        match self.client.put_actions(signal, actions.clone()).await {
            Ok(_) => {
                self.client.invalidate(&[CacheKey::Signals, CacheKey::Signal(signal.to_string())]);
                info!("saved {} actions for signal {}", actions.len(), signal);
                self.notifier.success("Saved");
                Ok(actions)
            }
            Err(err) => {
                warn!("saving actions for signal {} failed: {}", signal, err);
                self.notifier.error("Save failed");
                Err(err)
            }
        }
    }

    /// Creates a signal from a name and comma-separated initial actions.
    ///
    /// Returns the name the server stored.
    pub async fn create_signal(
        &self,
        name: &str,
        actions: &str,
    ) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptySignalName.into());
        }

        let req = CreateSignalRequest {
            name: name.to_string(),
            actions: split_list(actions),
        };
        match self.client.create_signal(&req).await {
            Ok(_) => {
                self.client.invalidate(&[CacheKey::Signals]);
                info!("created signal {}", name);
                self.notifier.success("Signal created");
                Ok(req.name)
            }
            Err(err) => {
                warn!("creating signal {} failed: {}", name, err);
                self.notifier.error("Create failed");
                Err(err)
            }
        }
    }

    /// Deletes a signal. The server cascades the delete to its mappings.
    pub async fn delete_signal(
        &self,
        name: &str,
    ) -> Result<()> {
        match self.client.delete_signal(name).await {
            Ok(_) => {
                self.client.invalidate(&[CacheKey::Signals, CacheKey::Signal(name.to_string()), CacheKey::Mapping]);
                info!("deleted signal {}", name);
                self.notifier.success("Signal deleted");
                Ok(())
            }
            Err(err) => {
                warn!("deleting signal {} failed: {}", name, err);
                self.notifier.error("Delete failed");
                Err(err)
            }
        }
    }

    /// Saves one combination. Other combinations are untouched.
    ///
    /// Blank input is stored as null, meaning "explicitly no action".
    pub async fn save_mapping_entry(
        &self,
        key: &ComboKey,
        input: &str,
    ) -> Result<Option<Vec<String>>> {
        let req = MappingEntryRequest {
            signal: key.to_string(),
            mapsto: parse_action_list(input),
        };
        match self.client.put_mapping_entry(&req).await {
            Ok(_) => {
                self.client.invalidate(&[CacheKey::Mapping]);
                info!("saved mapping {}", key);
                self.notifier.success("Mapping saved");
                Ok(req.mapsto)
            }
            Err(err) => {
                warn!("saving mapping {} failed: {}", key, err);
                self.notifier.error("Save failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        SigmapError,
        api::MemTransport,
        common::ResponseCache,
        draft::Field,
        notify::{ToastCenter, ToastKind},
    };

    fn dispatcher(mem: &MemTransport) -> (Dispatcher, Arc<ToastCenter>) {
        let toasts = Arc::new(ToastCenter::new(3000, 8));
        let client = ApiClient::new(Arc::new(mem.clone()), ResponseCache::new(16));
        (Dispatcher::new(client, toasts.clone()), toasts)
    }

    fn draft(rows: &[(&str, &str)]) -> ActionDraft {
        let mut draft = ActionDraft::new();
        for (name, bit) in rows {
            let i = draft.add_row();
            draft.update_field(i, Field::Name, name).unwrap();
            draft.update_field(i, Field::Bit, bit).unwrap();
        }
        draft
    }

    #[tokio::test]
    async fn test_duplicate_bit_never_reaches_server() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let (dispatcher, toasts) = dispatcher(&mem);
        let d = draft(&[("blink", "1"), ("wink", "1")]);

        let err = dispatcher.submit_actions("EEG", &d).await.unwrap_err();
        assert_eq!(
            err,
            SigmapError::Validation(ValidationError::DuplicateBit {
                bit: 1,
                row: 1
            })
        );
        assert!(mem.requests().is_empty());
        assert!(toasts.active().is_empty());
    }

    #[tokio::test]
    async fn test_submit_trims_and_invalidates() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let (dispatcher, toasts) = dispatcher(&mem);
        dispatcher.client().signal("EEG").await.unwrap();
        dispatcher.client().signals().await.unwrap();
        dispatcher.client().mapping().await.unwrap();

        let actions = dispatcher.submit_actions("EEG", &draft(&[(" blink ", "1"), ("wink", "")])).await.unwrap();
        assert_eq!(actions, vec![Action::new("blink", Some(1)), Action::new("wink", None)]);
        assert_eq!(mem.actions("EEG").unwrap(), actions);

        let cache = dispatcher.client().cache();
        assert!(!cache.contains(&CacheKey::Signal("EEG".to_string())));
        assert!(!cache.contains(&CacheKey::Signals));
        assert!(cache.contains(&CacheKey::Mapping));

        let active = toasts.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, ToastKind::Success);
        assert_eq!(active[0].message, "Saved");
    }

    #[tokio::test]
    async fn test_submit_failure_notifies() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let (dispatcher, toasts) = dispatcher(&mem);
        mem.fail_next(500, "boom");

        let err = dispatcher.submit_actions("EEG", &draft(&[("blink", "1")])).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(toasts.active()[0].message, "Save failed");
        assert_eq!(mem.actions("EEG").unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_create_signal() {
        let mem = MemTransport::new();
        let (dispatcher, toasts) = dispatcher(&mem);

        let name = dispatcher.create_signal("  jaw ", "clenched, relaxed,").await.unwrap();
        assert_eq!(name, "jaw");
        assert_eq!(mem.actions("jaw").unwrap(), vec![Action::new("clenched", None), Action::new("relaxed", None)]);
        assert_eq!(toasts.active()[0].message, "Signal created");

        let err = dispatcher.create_signal("jaw", "").await.unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(toasts.active()[1].message, "Create failed");

        let err = dispatcher.create_signal(" ", "a").await.unwrap_err();
        assert_eq!(err, SigmapError::Validation(ValidationError::EmptySignalName));
    }

    #[tokio::test]
    async fn test_delete_invalidates_mapping() {
        let mem = MemTransport::new().with_signal("jaw", vec![]);
        let (dispatcher, _) = dispatcher(&mem);
        dispatcher.client().mapping().await.unwrap();

        dispatcher.delete_signal("jaw").await.unwrap();
        assert!(!dispatcher.client().cache().contains(&CacheKey::Mapping));
        assert!(mem.actions("jaw").is_none());
    }

    #[tokio::test]
    async fn test_save_mapping_entry() {
        let mem = MemTransport::new();
        let (dispatcher, _) = dispatcher(&mem);
        let open = ComboKey::new("open", "clenched");
        let closed = ComboKey::new("closed", "clenched");

        let saved = dispatcher.save_mapping_entry(&open, "grip, hold").await.unwrap();
        assert_eq!(saved, Some(vec!["grip".to_string(), "hold".to_string()]));
        let saved = dispatcher.save_mapping_entry(&closed, "  ").await.unwrap();
        assert_eq!(saved, None);

        let mapping = mem.mapping();
        assert_eq!(mapping.get(open.as_str()), Some(Some(&["grip".to_string(), "hold".to_string()][..])));
        assert_eq!(mapping.get(closed.as_str()), Some(None));
    }
}
