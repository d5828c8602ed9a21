use crate::{
    Result, SigmapError,
    model::{ComboKey, Combination, MappingDocument, parse_action_list},
};

/// Free-text action list for one combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub combination: Combination,
    pub key: ComboKey,
    pub input: String,
}

/// Per-combination inputs of the mapping view, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingDraft {
    rows: Vec<MappingRow>,
}

impl MappingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every row. Existing entries are rendered joined by `", "`,
    /// unmapped and absent entries as empty input.
    pub fn initialize(
        &mut self,
        combinations: Vec<Combination>,
        mapping: &MappingDocument,
    ) {
        self.rows = combinations
            .into_iter()
            .map(|combination| {
                let key = combination.key();
                let input = mapping.get(key.as_str()).flatten().map(|actions| actions.join(", ")).unwrap_or_default();
                MappingRow {
                    combination,
                    key,
                    input,
                }
            })
            .collect();
    }

    /// Sets the input of every row with this key. Two other signals may share
    /// a state label, so one key can appear on several rows.
    pub fn set_input(
        &mut self,
        key: &ComboKey,
        text: &str,
    ) -> Result<()> {
        let mut found = false;
        for row in self.rows.iter_mut().filter(|r| &r.key == key) {
            row.input = text.to_string();
            found = true;
        }
        if !found {
            return Err(unknown(key));
        }
        Ok(())
    }

    pub fn input(
        &self,
        key: &ComboKey,
    ) -> Option<&str> {
        self.rows.iter().find(|r| &r.key == key).map(|r| r.input.as_str())
    }

    /// The value that saving `key` would submit.
    pub fn parsed(
        &self,
        key: &ComboKey,
    ) -> Result<Option<Vec<String>>> {
        let input = self.input(key).ok_or_else(|| unknown(key))?;
        Ok(parse_action_list(input))
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn unknown(key: &ComboKey) -> SigmapError {
    SigmapError::Draft(format!("unknown combination {}", key))
}
