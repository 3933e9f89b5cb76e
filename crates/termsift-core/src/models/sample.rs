use serde::{Deserialize, Serialize};

/// One raw `(key, value)` attribute pair; serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(String, String)> for Attribute {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<Attribute> for (String, String) {
    fn from(attribute: Attribute) -> Self {
        (attribute.key, attribute.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    #[serde(default)]
    pub runs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleType {
    #[serde(rename = "type")]
    pub label: String,
    #[serde(rename = "conf")]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    pub id: String,
    pub title: String,
    #[serde(rename = "recountId", default, skip_serializing_if = "Option::is_none")]
    pub recount_id: Option<String>,
}

impl Study {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            recount_id: None,
        }
    }
}

/// One sample as produced by a [`crate::source::RecordSource`].
///
/// `attributes` still contains the reserved source-name key and any
/// identifier-like noise; the attribute filter strips both during grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub id: String,
    pub study: Study,
    pub attributes: Vec<Attribute>,
    pub name: Option<String>,
    pub term_ids: Vec<String>,
    pub sample_type: Option<SampleType>,
    pub experiments: Vec<Experiment>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SampleMember {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

/// A term as shown to users: one name with every ontology id carrying it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisplayTerm {
    pub name: String,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGroup {
    pub id: String,
    pub study: Study,
    #[serde(rename = "attr")]
    pub attributes: Vec<Attribute>,
    pub samples: Vec<SampleMember>,
    #[serde(rename = "type")]
    pub sample_type: Option<SampleType>,
    #[serde(rename = "dterms")]
    pub display_terms: Vec<DisplayTerm>,
    #[serde(rename = "aterms")]
    pub closure_terms: Vec<String>,
}

impl SampleGroup {
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn view(&self) -> SampleGroupView {
        SampleGroupView {
            study: self.study.clone(),
            attributes: self.attributes.clone(),
            samples: self.samples.clone(),
            sample_type: self.sample_type.clone(),
            display_terms: self.display_terms.clone(),
        }
    }
}

/// API shape of a sample group; the closure terms stay internal to the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGroupView {
    pub study: Study,
    #[serde(rename = "attr")]
    pub attributes: Vec<Attribute>,
    pub samples: Vec<SampleMember>,
    #[serde(rename = "type")]
    pub sample_type: Option<SampleType>,
    #[serde(rename = "dterms")]
    pub display_terms: Vec<DisplayTerm>,
}
