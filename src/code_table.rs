use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable mapping from cheat codes to the labels shown when they are typed.
///
/// Codes are lowercased on the way in, so lookups only need to lowercase the
/// candidate string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct CodeTable {
    codes: BTreeMap<String, String>,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::doom()
    }
}

impl CodeTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let codes = entries
            .into_iter()
            .map(|(code, label)| (code.as_ref().to_lowercase(), label.into()))
            .collect();
        Self { codes }
    }

    /// The classic DOOM cheat codes.
    pub fn doom() -> Self {
        Self::new([
            ("idfa", "All Weapons + Ammo"),
            ("idkfa", "All Weapons + Ammo + Keys"),
            ("idbeholds", "Beserk Pack"),
            ("idclev31", "Bonus Level"),
        ])
    }

    pub fn lookup(&self, sequence: &str) -> Option<&str> {
        if let Some(label) = self.codes.get(sequence) {
            return Some(label.as_str());
        }
        self.codes
            .get(&sequence.to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for CodeTable {
    fn from(codes: BTreeMap<String, String>) -> Self {
        Self::new(codes)
    }
}

impl From<CodeTable> for BTreeMap<String, String> {
    fn from(table: CodeTable) -> Self {
        table.codes
    }
}
