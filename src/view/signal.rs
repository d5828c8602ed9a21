use std::sync::Arc;

use tracing::debug;

use crate::{
    Result,
    common::CacheKey,
    dispatcher::Dispatcher,
    draft::{ActionDraft, Field, FieldUpdate},
    lock::{LockPolicy, LockState},
    model::Signal,
    view::Edit,
};

/// Action editor for one signal.
pub struct SignalEditor {
    name: String,
    dispatcher: Arc<Dispatcher>,
    /// Last server value this session started from.
    server: Arc<Signal>,
    draft: ActionDraft,
    lock: LockPolicy,
}

impl SignalEditor {
    pub async fn open(
        dispatcher: Arc<Dispatcher>,
        name: &str,
    ) -> Result<Self> {
        let server = dispatcher.client().signal(name).await?;
        let mut draft = ActionDraft::new();
        draft.initialize(&server.actions);

        Ok(Self {
            name: name.to_string(),
            dispatcher,
            lock: LockPolicy::from_server(&server),
            server,
            draft,
        })
    }

    /// Refetches the signal and starts a new session from it: the draft is
    /// replaced and the lock policy recomputed.
    pub async fn reload(&mut self) -> Result<()> {
        let client = self.dispatcher.client();
        client.invalidate(&[CacheKey::Signal(self.name.clone())]);
        let server = client.signal(&self.name).await?;

        self.draft.initialize(&server.actions);
        self.lock = LockPolicy::from_server(&server);
        self.server = server;
        debug!("reloaded signal {} ({})", self.name, self.lock.state().as_ref());
        Ok(())
    }

    pub fn add_row(&mut self) -> Edit<usize> {
        if self.lock.is_locked() {
            return Edit::Locked;
        }
        Edit::Applied(self.draft.add_row())
    }

    /// Returns the row that should receive focus.
    pub fn remove_row(
        &mut self,
        index: usize,
    ) -> Edit<Option<usize>> {
        if self.lock.is_locked() {
            return Edit::Locked;
        }
        Edit::Applied(self.draft.remove_row(index))
    }

    pub fn update_field(
        &mut self,
        index: usize,
        field: Field,
        value: &str,
    ) -> Result<Edit<FieldUpdate>> {
        if self.lock.is_locked() {
            return Ok(Edit::Locked);
        }
        Ok(Edit::Applied(self.draft.update_field(index, field, value)?))
    }

    /// Submits the draft.
    ///
    /// `Ok(false)` when locked. On success the signal locks and the draft is
    /// replaced with what was stored; on failure the draft is left as is.
    pub async fn save(&mut self) -> Result<bool> {
        if self.lock.is_locked() {
            return Ok(false);
        }
        let actions = self.dispatcher.submit_actions(&self.name, &self.draft).await?;
        self.draft.initialize(&actions);
        self.lock.lock();
        Ok(true)
    }

    /// Whether the save control is enabled: editable and every row named.
    pub fn can_save(&self) -> bool {
        !self.lock.is_locked() && self.draft.unnamed_rows().is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> &Signal {
        &self.server
    }

    pub fn draft(&self) -> &ActionDraft {
        &self.draft
    }

    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    pub fn lock_policy(&self) -> LockPolicy {
        self.lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        SigmapError, ValidationError,
        api::{ApiClient, HttpMethod, MemTransport, Transport},
        common::ResponseCache,
        draft::ActionRow,
        lock::LockReason,
        model::Action,
        notify::ToastCenter,
    };

    fn dispatcher(mem: &MemTransport) -> Arc<Dispatcher> {
        let client = ApiClient::new(Arc::new(mem.clone()), ResponseCache::new(16));
        Arc::new(Dispatcher::new(client, Arc::new(ToastCenter::new(3000, 8))))
    }

    fn fill(
        editor: &mut SignalEditor,
        name: &str,
        bit: &str,
    ) {
        let i = editor.add_row().applied().unwrap();
        editor.update_field(i, Field::Name, name).unwrap();
        editor.update_field(i, Field::Bit, bit).unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_bit_keeps_draft() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let mut editor = SignalEditor::open(dispatcher(&mem), "EEG").await.unwrap();
        assert_eq!(editor.lock_state(), LockState::Editable);

        fill(&mut editor, "blink", "1");
        fill(&mut editor, "wink", "1");
        let before = editor.draft().clone();

        let err = editor.save().await.unwrap_err();
        assert_eq!(
            err,
            SigmapError::Validation(ValidationError::DuplicateBit {
                bit: 1,
                row: 1
            })
        );
        assert_eq!(editor.draft(), &before);
        assert_eq!(editor.lock_state(), LockState::Editable);
    }

    #[tokio::test]
    async fn test_save_locks_signal() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let mut editor = SignalEditor::open(dispatcher(&mem), "EEG").await.unwrap();

        fill(&mut editor, "blink", "1");
        assert!(editor.save().await.unwrap());
        assert_eq!(editor.lock_state(), LockState::Locked);
        assert_eq!(editor.lock_policy().reason(), Some(LockReason::Saved));

        let rows = editor.draft().clone();
        assert_eq!(editor.add_row(), Edit::Locked);
        assert_eq!(editor.remove_row(0), Edit::Locked);
        assert_eq!(editor.update_field(0, Field::Name, "nod").unwrap(), Edit::Locked);
        assert!(!editor.save().await.unwrap());
        assert_eq!(editor.draft(), &rows);
        assert!(!editor.can_save());

        assert_eq!(mem.actions("EEG").unwrap(), vec![Action::new("blink", Some(1))]);
        assert_eq!(mem.requests().iter().filter(|r| r.starts_with("PUT")).count(), 1);
    }

    #[tokio::test]
    async fn test_server_actions_open_locked() {
        let mem = MemTransport::new().with_signal("EEG", vec![Action::new("blink", Some(1))]);
        let mut editor = SignalEditor::open(dispatcher(&mem), "EEG").await.unwrap();

        assert_eq!(editor.lock_policy().reason(), Some(LockReason::Persisted));
        assert_eq!(
            editor.draft().rows(),
            &[ActionRow {
                name: "blink".to_string(),
                bit: Some(1)
            }]
        );
        assert_eq!(editor.add_row(), Edit::Locked);
    }

    #[tokio::test]
    async fn test_transport_failure_stays_editable() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let mut editor = SignalEditor::open(dispatcher(&mem), "EEG").await.unwrap();
        fill(&mut editor, "blink", "1");

        mem.fail_next(500, "boom");
        assert_eq!(editor.save().await.unwrap_err().status(), Some(500));
        assert_eq!(editor.lock_state(), LockState::Editable);
        assert_eq!(editor.draft().len(), 1);

        assert!(editor.save().await.unwrap());
    }

    #[tokio::test]
    async fn test_reload_replaces_draft() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let mut editor = SignalEditor::open(dispatcher(&mem), "EEG").await.unwrap();
        fill(&mut editor, "blink", "");

        mem.request(
            HttpMethod::PUT,
            &["ui", "signals", "EEG", "actions"],
            Some(serde_json::json!({ "actions": [{ "name": "wink", "bit": 2 }] })),
        )
        .await
        .unwrap();
        editor.reload().await.unwrap();

        assert_eq!(editor.draft().rows()[0].name, "wink");
        assert_eq!(editor.lock_state(), LockState::Locked);
    }

    #[tokio::test]
    async fn test_can_save_requires_names() {
        let mem = MemTransport::new().with_signal("EEG", vec![]);
        let mut editor = SignalEditor::open(dispatcher(&mem), "EEG").await.unwrap();
        assert!(editor.can_save());

        editor.add_row();
        assert!(!editor.can_save());
        assert_eq!(
            editor.save().await.unwrap_err(),
            SigmapError::Validation(ValidationError::EmptyName {
                row: 0
            })
        );
    }

    #[tokio::test]
    async fn test_open_missing_signal() {
        let mem = MemTransport::new();
        let err = SignalEditor::open(dispatcher(&mem), "EEG").await.err().unwrap();
        assert_eq!(err.status(), Some(404));
    }
}
