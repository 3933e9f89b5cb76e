use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, params};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Attribute, Experiment, SampleRecord, SampleType, Study};

use super::RecordSource;

const SRA_INDEX_SQL: &str = r"
    CREATE INDEX IF NOT EXISTS sample_attr_ind
    ON sample_attribute(sample_accession);
    CREATE INDEX IF NOT EXISTS experiment_sample_ind
    ON experiment(sample_accession, experiment_accession);
    CREATE INDEX IF NOT EXISTS run_experiment_ind
    ON run(experiment_accession, run_accession);
";

const ANNOTATION_INDEX_SQL: &str = r"
    CREATE INDEX IF NOT EXISTS mapped_ontology_terms_ind
    ON mapped_ontology_terms(sample_accession);
    CREATE INDEX IF NOT EXISTS sample_type_ind
    ON sample_type(sample_accession);
";

const IPS_CELL_LINE: &str = "induced pluripotent stem cell line";
const IPS_CELL_LINE_SHORT: &str = "iPS cell line";

/// Reads samples from two SQLite snapshots: the SRA metadata subset
/// (`sample`, `experiment`, `study`, `sample_attribute`, `run`) and the
/// annotation output (`mapped_ontology_terms`, `sample_type`).
#[derive(Debug, Clone)]
pub struct SqliteSnapshotSource {
    sra_path: PathBuf,
    annotation_path: PathBuf,
}

impl SqliteSnapshotSource {
    pub fn new(sra_path: impl Into<PathBuf>, annotation_path: impl Into<PathBuf>) -> Self {
        Self {
            sra_path: sra_path.into(),
            annotation_path: annotation_path.into(),
        }
    }

    fn open(path: &Path) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }
}

impl RecordSource for SqliteSnapshotSource {
    fn records(&self) -> Result<Vec<SampleRecord>> {
        let sra = Self::open(&self.sra_path)?;
        let annotations = Self::open(&self.annotation_path)?;
        sra.execute_batch(SRA_INDEX_SQL)?;
        annotations.execute_batch(ANNOTATION_INDEX_SQL)?;
        debug!("ensured snapshot lookup indices");

        let mut stmt = sra.prepare(
            r"
            SELECT DISTINCT sample_accession, study_accession, study_title
            FROM (sample JOIN experiment USING (sample_accession))
                 JOIN study USING (study_accession)
            ORDER BY study_accession, sample_accession
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (sample_id, study_id, study_title) = row?;
            out.push(SampleRecord {
                attributes: lookup_attributes(&sra, &sample_id)?,
                term_ids: lookup_term_ids(&annotations, &sample_id)?,
                sample_type: lookup_sample_type(&annotations, &sample_id)?,
                experiments: lookup_experiments(&sra, &sample_id)?,
                study: Study::new(study_id, study_title.unwrap_or_default()),
                name: None,
                id: sample_id,
            });
        }
        info!(
            samples = out.len(),
            sra = %self.sra_path.display(),
            annotations = %self.annotation_path.display(),
            "read sample snapshot"
        );
        Ok(out)
    }
}

fn lookup_attributes(conn: &Connection, sample_id: &str) -> Result<Vec<Attribute>> {
    let mut stmt = conn.prepare_cached(
        "SELECT tag, value FROM sample_attribute WHERE sample_accession = ?1",
    )?;
    let rows = stmt.query_map(params![sample_id], |row| {
        Ok(Attribute::new(
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn lookup_term_ids(conn: &Connection, sample_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT term_id FROM mapped_ontology_terms WHERE sample_accession = ?1",
    )?;
    let rows = stmt.query_map(params![sample_id], |row| row.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    out.sort();
    out.dedup();
    Ok(out)
}

fn lookup_sample_type(conn: &Connection, sample_id: &str) -> Result<Option<SampleType>> {
    let mut stmt = conn.prepare_cached(
        "SELECT sample_type, confidence FROM sample_type WHERE sample_accession = ?1",
    )?;
    let mut rows = stmt.query_map(params![sample_id], |row| {
        Ok(SampleType {
            label: shorten_sample_type(row.get::<_, String>(0)?),
            confidence: row.get::<_, f64>(1)?,
        })
    })?;
    Ok(rows.next().transpose()?)
}

fn lookup_experiments(conn: &Connection, sample_id: &str) -> Result<Vec<Experiment>> {
    let mut stmt = conn.prepare_cached(
        "SELECT experiment_accession FROM experiment WHERE sample_accession = ?1 ORDER BY experiment_accession",
    )?;
    let ids = stmt
        .query_map(params![sample_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut runs_stmt = conn.prepare_cached(
        "SELECT run_accession FROM run WHERE experiment_accession = ?1 ORDER BY run_accession",
    )?;
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        let runs = runs_stmt
            .query_map(params![id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        out.push(Experiment { id, runs });
    }
    Ok(out)
}

fn shorten_sample_type(label: String) -> String {
    if label == IPS_CELL_LINE {
        IPS_CELL_LINE_SHORT.to_string()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn seed(dir: &Path) -> (PathBuf, PathBuf) {
        let sra_path = dir.join("sra.sqlite3");
        let annotation_path = dir.join("annotations.sqlite3");
        let sra = Connection::open(&sra_path).expect("sra");
        sra.execute_batch(
            r"
            CREATE TABLE study (study_accession TEXT, study_title TEXT);
            CREATE TABLE sample (sample_accession TEXT);
            CREATE TABLE experiment (experiment_accession TEXT, sample_accession TEXT, study_accession TEXT);
            CREATE TABLE run (run_accession TEXT, experiment_accession TEXT);
            CREATE TABLE sample_attribute (sample_accession TEXT, tag TEXT, value TEXT);

            INSERT INTO study VALUES ('SRP1', 'Stem cell atlas');
            INSERT INTO sample VALUES ('SRS1');
            INSERT INTO experiment VALUES ('SRX1', 'SRS1', 'SRP1');
            INSERT INTO experiment VALUES ('SRX2', 'SRS1', 'SRP1');
            INSERT INTO run VALUES ('SRR1', 'SRX1');
            INSERT INTO run VALUES ('SRR2', 'SRX1');
            INSERT INTO run VALUES ('SRR3', 'SRX2');
            INSERT INTO sample_attribute VALUES ('SRS1', 'source_name', 'iPSC line 7');
            INSERT INTO sample_attribute VALUES ('SRS1', 'cell type', 'iPSC');
            ",
        )
        .expect("seed sra");
        let annotations = Connection::open(&annotation_path).expect("annotations");
        annotations
            .execute_batch(
                r"
                CREATE TABLE mapped_ontology_terms (sample_accession TEXT, term_id TEXT);
                CREATE TABLE sample_type (sample_accession TEXT, sample_type TEXT, confidence REAL);

                INSERT INTO mapped_ontology_terms VALUES ('SRS1', 'EFO:0004905');
                INSERT INTO mapped_ontology_terms VALUES ('SRS1', 'CL:0000034');
                INSERT INTO sample_type VALUES ('SRS1', 'induced pluripotent stem cell line', 0.82);
                ",
            )
            .expect("seed annotations");
        (sra_path, annotation_path)
    }

    #[test]
    fn reads_one_record_per_sample_with_runs_and_short_type() {
        let temp = tempdir().expect("tempdir");
        let (sra_path, annotation_path) = seed(temp.path());
        let records = SqliteSnapshotSource::new(sra_path, annotation_path)
            .records()
            .expect("records");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "SRS1");
        assert_eq!(record.study, Study::new("SRP1", "Stem cell atlas"));
        assert_eq!(record.term_ids, vec!["CL:0000034", "EFO:0004905"]);
        let sample_type = record.sample_type.as_ref().expect("sample type");
        assert_eq!(sample_type.label, "iPS cell line");
        assert_eq!(record.attributes.len(), 2);

        let mut experiments = record.experiments.clone();
        experiments.sort();
        assert_eq!(
            experiments,
            vec![
                Experiment {
                    id: "SRX1".to_string(),
                    runs: vec!["SRR1".to_string(), "SRR2".to_string()],
                },
                Experiment {
                    id: "SRX2".to_string(),
                    runs: vec!["SRR3".to_string()],
                },
            ]
        );
    }

    #[test]
    fn other_sample_types_pass_through() {
        assert_eq!(shorten_sample_type("tissue".to_string()), "tissue");
    }
}
