//! Localized text flattening.
//!
//! Wire entities carry localized strings as a `lang -> text` map. Some stored
//! fields keep them as a list of `{lang, value}` pairs so the store can index
//! the values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Language code -> text.
pub type LocalizedText = HashMap<String, String>;

/// One stored `{lang, value}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableText {
    pub lang: String,
    pub value: String,
}

/// Flatten a localized map. Output order is unspecified.
pub fn flatten(text: &LocalizedText) -> Vec<SearchableText> {
    text.iter()
        .map(|(lang, value)| SearchableText {
            lang: lang.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Rebuild a localized map. A later entry for the same language wins.
pub fn unflatten(entries: &[SearchableText]) -> LocalizedText {
    let mut text = LocalizedText::with_capacity(entries.len());
    for entry in entries {
        text.insert(entry.lang.clone(), entry.value.clone());
    }
    text
}
