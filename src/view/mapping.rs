use std::sync::Arc;

use crate::{
    Result, SigmapError,
    common::CacheKey,
    dispatcher::Dispatcher,
    draft::{MappingDraft, MappingRow},
    model::{ComboKey, Combination, enumerate_combinations},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MappingStatus {
    Ready,
    /// The focal signal has no states or no other signal exists.
    NoCombinations,
}

/// Mapping editor for one focal signal.
pub struct MappingEditor {
    focal: String,
    dispatcher: Arc<Dispatcher>,
    draft: MappingDraft,
}

impl MappingEditor {
    pub async fn open(
        dispatcher: Arc<Dispatcher>,
        focal: &str,
    ) -> Result<Self> {
        let mut editor = Self {
            focal: focal.to_string(),
            dispatcher,
            draft: MappingDraft::new(),
        };
        editor.load().await?;
        Ok(editor)
    }

    /// Refetches signals and the mapping document and rebuilds every row.
    pub async fn reload(&mut self) -> Result<()> {
        self.dispatcher.client().invalidate(&[CacheKey::Signals, CacheKey::Mapping]);
        self.load().await
    }

    async fn load(&mut self) -> Result<()> {
        let client = self.dispatcher.client();
        let signals = client.signals().await?;
        let mapping = client.mapping().await?;
        self.draft.initialize(enumerate_combinations(&self.focal, &signals), &mapping);
        Ok(())
    }

    pub fn status(&self) -> MappingStatus {
        if self.draft.is_empty() {
            MappingStatus::NoCombinations
        } else {
            MappingStatus::Ready
        }
    }

    pub fn focal(&self) -> &str {
        &self.focal
    }

    pub fn combinations(&self) -> Vec<&Combination> {
        self.draft.rows().iter().map(|r| &r.combination).collect()
    }

    pub fn rows(&self) -> &[MappingRow] {
        self.draft.rows()
    }

    pub fn input(
        &self,
        key: &ComboKey,
    ) -> Option<&str> {
        self.draft.input(key)
    }

    pub fn set_input(
        &mut self,
        key: &ComboKey,
        text: &str,
    ) -> Result<()> {
        self.ensure_ready()?;
        self.draft.set_input(key, text)
    }

    /// Saves the single combination `key`; the other rows keep their input.
    ///
    /// On success the row is rewritten to the normalized list that was stored.
    pub async fn save(
        &mut self,
        key: &ComboKey,
    ) -> Result<Option<Vec<String>>> {
        self.ensure_ready()?;
        let input = self.draft.input(key).ok_or_else(|| SigmapError::Draft(format!("unknown combination {}", key)))?.to_string();

        let saved = self.dispatcher.save_mapping_entry(key, &input).await?;
        self.draft.set_input(key, &saved.as_ref().map(|a| a.join(", ")).unwrap_or_default())?;
        Ok(saved)
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.status() {
            MappingStatus::Ready => Ok(()),
            MappingStatus::NoCombinations => Err(SigmapError::Draft(format!("no combinations for signal {}", self.focal))),
        }
    }
}
