use std::path::PathBuf;

use clap::{Args, ValueEnum};

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// SQLite snapshot of the SRA tables (study, sample, experiment, run, sample_attribute).
    #[arg(long)]
    pub sra_db: PathBuf,
    /// SQLite snapshot of mapped ontology terms and predicted sample types.
    #[arg(long)]
    pub metasra_db: PathBuf,
    /// OBO file to merge into the ontology graph; repeat for several files.
    #[arg(long = "ontology", value_name = "OBO", required = true)]
    pub ontology: Vec<PathBuf>,
    /// CSV whose first column lists study ids present in the Recount catalog.
    #[arg(long)]
    pub recount_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleFormat {
    Json,
    Csv,
    RunsCsv,
    RunIds,
}

#[derive(Debug, Args)]
pub struct SamplesArgs {
    /// Comma separated ontology ids every sample must carry.
    #[arg(long)]
    pub and: Option<String>,
    /// Comma separated ontology ids no sample may carry.
    #[arg(long)]
    pub not: Option<String>,
    #[arg(long)]
    pub study: Option<String>,
    #[arg(long)]
    pub sampletype: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub skip: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,
    #[arg(long, value_enum, default_value_t = SampleFormat::Json)]
    pub format: SampleFormat,
}

#[derive(Debug, Args)]
pub struct TermsArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub q: Option<String>,
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, default_value_t = 8787)]
    pub port: u16,
}
