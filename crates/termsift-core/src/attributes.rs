use crate::models::Attribute;

/// Attribute key whose value becomes the sample's display name.
pub const SOURCE_NAME_KEY: &str = "source_name";

/// Sample-level identifier keys that carry no grouping information.
///
/// Matched case-insensitively; entries are stored lower-cased.
pub const ATTRIBUTE_GROUPING_BLACKLIST: &[&str] = &[
    "gap_sample_id",
    "gap_subject_id",
    "submitted sample id",
    "submitted subject id",
    "sample id",
    "sample_id",
    "individual",
    "c1 chip id",
    "biospecimen repository sample id",
    "replicate",
    "section",
    "mrna-seq reads",
    "subject_id",
    "flowcell",
    "brain_number",
    "donor id",
    "biological replicate",
    "experimental batch",
    "md5_checksum",
    "c1capturesite",
    "c1plateid",
    "lane",
    "flowcellid",
    "libraryid",
    "sampleid",
    "siteandparticipantcode",
    "technical batch",
    "well number",
    "patient_code",
    "patient_identifier",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredAttributes {
    /// Sorted by key then value, without duplicates.
    pub attributes: Vec<Attribute>,
    pub display_name: Option<String>,
}

#[must_use]
pub fn is_blacklisted_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    ATTRIBUTE_GROUPING_BLACKLIST.contains(&lower.as_str())
}

/// Split the display name off `attributes` and drop identifier-like noise.
///
/// When several source-name pairs exist the last one wins.
#[must_use]
pub fn filter_attributes(attributes: &[Attribute]) -> FilteredAttributes {
    let mut display_name = None;
    let mut kept = Vec::with_capacity(attributes.len());
    for attribute in attributes {
        if attribute.key == SOURCE_NAME_KEY {
            display_name = Some(attribute.value.clone());
        } else if !is_blacklisted_key(&attribute.key) {
            kept.push(attribute.clone());
        }
    }
    kept.sort();
    kept.dedup();
    FilteredAttributes {
        attributes: kept,
        display_name,
    }
}
