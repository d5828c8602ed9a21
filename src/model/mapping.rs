use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The mapping document: combination key to action list, or null for an
/// explicit "no action".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingDocument {
    entries: BTreeMap<String, Option<Vec<String>>>,
}

impl MappingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the key is absent, `Some(None)` when explicitly unmapped.
    pub fn get(
        &self,
        key: &str,
    ) -> Option<Option<&[String]>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: Option<Vec<String>>,
    ) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(
        &mut self,
        key: &str,
    ) -> Option<Option<Vec<String>>> {
        self.entries.remove(key)
    }

    pub fn retain(
        &mut self,
        f: impl FnMut(&String, &mut Option<Vec<String>>) -> bool,
    ) {
        self.entries.retain(f);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<Vec<String>>)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, Option<Vec<String>>)> for MappingDocument {
    fn from_iter<I: IntoIterator<Item = (String, Option<Vec<String>>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Body of `POST /ui/combinations`: one combination at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntryRequest {
    /// The combination key.
    pub signal: String,
    pub mapsto: Option<Vec<String>>,
}

/// Splits comma-separated text, trimming items and dropping empty ones.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// Parses a free-text action list. Blank input means "explicitly no action".
pub fn parse_action_list(text: &str) -> Option<Vec<String>> {
    if text.trim().is_empty() {
        return None;
    }
    Some(split_list(text))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_action_list() {
        assert_eq!(parse_action_list(" grip , , release,"), Some(vec!["grip".to_string(), "release".to_string()]));
        assert_eq!(parse_action_list("point"), Some(vec!["point".to_string()]));
        assert_eq!(parse_action_list(""), None);
        assert_eq!(parse_action_list("   "), None);
    }

    #[test]
    fn test_mapping_document_null_vs_absent() {
        let doc: MappingDocument = serde_json::from_value(json!({
            "['open', 'clenched']": ["grip"],
            "['closed', 'clenched']": null
        }))
        .unwrap();

        assert_eq!(doc.get("['open', 'clenched']"), Some(Some(&["grip".to_string()][..])));
        assert_eq!(doc.get("['closed', 'clenched']"), Some(None));
        assert_eq!(doc.get("['open', 'relaxed']"), None);
        assert_eq!(doc.len(), 2);
    }
}
