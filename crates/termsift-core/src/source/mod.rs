use crate::error::Result;
use crate::models::SampleRecord;

mod recount;
mod sqlite;

pub use recount::SecondaryCatalog;
pub use sqlite::SqliteSnapshotSource;

/// Producer of raw sample records for one rebuild.
pub trait RecordSource {
    fn records(&self) -> Result<Vec<SampleRecord>>;
}

impl RecordSource for Vec<SampleRecord> {
    fn records(&self) -> Result<Vec<SampleRecord>> {
        Ok(self.clone())
    }
}
