use tracing::warn;

use crate::{Result, SigmapError, model::Action};

/// One editable action row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRow {
    pub name: String,
    pub bit: Option<u32>,
}

impl From<&Action> for ActionRow {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            bit: action.bit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Bit,
}

/// What `update_field` stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    /// The input was stored as given.
    Set,
    /// Empty bit input cleared the bit.
    Cleared,
    /// The bit input was not a non-negative integer and was stored as null.
    Coerced,
}

/// Ordered working copy of a signal's actions. Rows are addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionDraft {
    rows: Vec<ActionRow>,
}

impl ActionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every row with the server value.
    pub fn initialize(
        &mut self,
        actions: &[Action],
    ) {
        self.rows = actions.iter().map(ActionRow::from).collect();
    }

    /// Appends an empty row and returns its position.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(ActionRow::default());
        self.rows.len() - 1
    }

    /// Removes the row at `index` and returns the row that should take focus:
    /// the one now at `index`, else the one before it, else none.
    pub fn remove_row(
        &mut self,
        index: usize,
    ) -> Option<usize> {
        if index >= self.rows.len() {
            return None;
        }
        self.rows.remove(index);
        if index < self.rows.len() {
            Some(index)
        } else {
            index.checked_sub(1)
        }
    }

    pub fn update_field(
        &mut self,
        index: usize,
        field: Field,
        value: &str,
    ) -> Result<FieldUpdate> {
        let len = self.rows.len();
        let row = self.rows.get_mut(index).ok_or_else(|| SigmapError::Draft(format!("row {} out of range ({} rows)", index, len)))?;

        match field {
            Field::Name => {
                row.name = value.to_string();
                Ok(FieldUpdate::Set)
            }
            Field::Bit => {
                let (bit, update) = parse_bit(value);
                if update == FieldUpdate::Coerced {
                    warn!("bit input {:?} in row {} is not a non-negative integer, stored as null", value, index);
                }
                row.bit = bit;
                Ok(update)
            }
        }
    }

    pub fn rows(&self) -> &[ActionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Positions of rows whose name is empty or whitespace.
    pub fn unnamed_rows(&self) -> Vec<usize> {
        self.rows.iter().enumerate().filter(|(_, r)| r.name.trim().is_empty()).map(|(i, _)| i).collect()
    }
}

fn parse_bit(value: &str) -> (Option<u32>, FieldUpdate) {
    let value = value.trim();
    if value.is_empty() {
        return (None, FieldUpdate::Cleared);
    }
    match value.parse::<u32>() {
        Ok(bit) => (Some(bit), FieldUpdate::Set),
        Err(_) => (None, FieldUpdate::Coerced),
    }
}
