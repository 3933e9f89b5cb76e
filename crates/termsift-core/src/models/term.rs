use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::DisplayTerm;

/// One dictionary record per distinct term name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub name: String,
    pub ids: Vec<String>,
    #[serde(rename = "syn")]
    pub synonyms: String,
    pub tokens: BTreeSet<String>,
    #[serde(rename = "nametokens")]
    pub name_tokens: BTreeSet<String>,
    pub ancestors: Vec<DisplayTerm>,
    #[serde(rename = "descendents")]
    pub descendants: Vec<DisplayTerm>,
    pub score: usize,
}

impl TermEntry {
    #[must_use]
    pub fn view(&self) -> TermView {
        TermView {
            name: self.name.clone(),
            ids: self.ids.clone(),
            synonyms: self.synonyms.clone(),
            ancestors: self.ancestors.clone(),
            descendants: self.descendants.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermView {
    pub name: String,
    pub ids: Vec<String>,
    #[serde(rename = "syn")]
    pub synonyms: String,
    pub ancestors: Vec<DisplayTerm>,
    #[serde(rename = "descendents")]
    pub descendants: Vec<DisplayTerm>,
}
