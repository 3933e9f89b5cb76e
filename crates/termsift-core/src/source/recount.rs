use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::SampleGroup;

/// Studies that also appear in an external secondary catalog.
///
/// Read from a CSV whose first column holds study ids; a listed study gets
/// its own id as `recountId`. Every row is read, so a header row just adds a
/// value no study carries.
#[derive(Debug, Clone, Default)]
pub struct SecondaryCatalog {
    study_ids: HashSet<String>,
}

impl SecondaryCatalog {
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_csv_reader(file)?;
        info!(
            path = %path.display(),
            studies = catalog.len(),
            "loaded secondary study catalog"
        );
        Ok(catalog)
    }

    pub fn from_csv_reader(reader: impl Read) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut study_ids = HashSet::new();
        for record in csv_reader.records() {
            let record = record?;
            if let Some(study_id) = record.get(0).map(str::trim)
                && !study_id.is_empty()
            {
                study_ids.insert(study_id.to_string());
            }
        }
        Ok(Self { study_ids })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.study_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.study_ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, study_id: &str) -> bool {
        self.study_ids.contains(study_id)
    }

    /// Tag every group whose study is listed. Returns how many were tagged.
    pub fn apply(&self, groups: &mut [SampleGroup]) -> usize {
        let mut tagged = 0;
        for group in groups.iter_mut() {
            if self.contains(&group.study.id) {
                group.study.recount_id = Some(group.study.id.clone());
                tagged += 1;
            }
        }
        tagged
    }
}
