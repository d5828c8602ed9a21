use std::collections::HashSet;

use crate::{ValidationError, draft::ActionRow, model::Action};

/// Checks an actions draft and builds the submission payload.
///
/// Completeness first (any blank name fails), then bit uniqueness in row
/// order. Names are trimmed in the returned payload.
pub fn validate_actions(rows: &[ActionRow]) -> Result<Vec<Action>, ValidationError> {
    if let Some(row) = rows.iter().position(|r| r.name.trim().is_empty()) {
        return Err(ValidationError::EmptyName {
            row,
        });
    }

    let mut seen = HashSet::new();
    for (row, action) in rows.iter().enumerate() {
        if let Some(bit) = action.bit {
            if !seen.insert(bit) {
                return Err(ValidationError::DuplicateBit {
                    bit,
                    row,
                });
            }
        }
    }

    Ok(rows.iter().map(|r| Action::new(r.name.trim(), r.bit)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        name: &str,
        bit: Option<u32>,
    ) -> ActionRow {
        ActionRow {
            name: name.to_string(),
            bit,
        }
    }

    #[test]
    fn test_rejects_blank_names() {
        assert_eq!(
            validate_actions(&[row("blink", Some(1)), row("  ", None)]),
            Err(ValidationError::EmptyName {
                row: 1
            })
        );
        assert_eq!(
            validate_actions(&[row("", Some(1))]),
            Err(ValidationError::EmptyName {
                row: 0
            })
        );
    }

    #[test]
    fn test_completeness_checked_before_uniqueness() {
        let rows = [row("blink", Some(1)), row("wink", Some(1)), row("", None)];
        assert_eq!(
            validate_actions(&rows),
            Err(ValidationError::EmptyName {
                row: 2
            })
        );
    }

    #[test]
    fn test_first_repeated_bit() {
        let rows = [row("a", Some(1)), row("b", Some(2)), row("c", Some(2)), row("d", Some(1))];
        assert_eq!(
            validate_actions(&rows),
            Err(ValidationError::DuplicateBit {
                bit: 2,
                row: 2
            })
        );
    }

    #[test]
    fn test_null_bits_never_duplicate() {
        let rows = [row("a", None), row("b", None), row("c", Some(0))];
        assert!(validate_actions(&rows).is_ok());
    }

    #[test]
    fn test_names_trimmed() {
        let actions = validate_actions(&[row("  blink ", Some(1)), row("wink", None)]).unwrap();
        assert_eq!(actions, vec![Action::new("blink", Some(1)), Action::new("wink", None)]);
    }

    #[test]
    fn test_empty_draft_is_valid() {
        assert_eq!(validate_actions(&[]), Ok(vec![]));
    }
}
