use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use termsift_core::Termsift;
use termsift_core::export::{run_ids_text, runs_csv, samples_csv};
use termsift_core::ontology::OboOntology;
use termsift_core::source::{SecondaryCatalog, SqliteSnapshotSource};

use crate::cli::{BuildArgs, Commands, GenerationsCommand, SampleFormat, SamplesArgs, TermsArgs};

mod support;
mod web;

#[cfg(test)]
mod tests;

use self::support::{print_json, print_text, sample_params, term_params, user_error};
use self::web::{WebServeOptions, serve};

pub(crate) fn run_from_root(root: &Path, command: Commands) -> Result<()> {
    let app = Termsift::open(root)
        .with_context(|| format!("failed to open termsift root {}", root.display()))?;

    match command {
        Commands::Build(args) => run_build(&app, &args),
        Commands::Samples(args) => run_samples(&app, args),
        Commands::Terms(args) => run_terms(&app, args),
        Commands::Generations(args) => match args.command {
            GenerationsCommand::List => print_json(&app.generations()?),
            GenerationsCommand::Rollback => {
                let live = app.rollback().context("rollback failed")?;
                print_json(&serde_json::json!({
                    "status": "ok",
                    "live": live,
                }))
            }
        },
        Commands::Serve(args) => serve(
            &app,
            WebServeOptions {
                host: &args.host,
                port: args.port,
            },
        ),
    }
}

fn run_build(app: &Termsift, args: &BuildArgs) -> Result<()> {
    let ontology = OboOntology::load(args.ontology.as_slice())
        .context("failed to load ontology files")?;
    info!(terms = ontology.len(), "ontology ready");
    let catalog = args
        .recount_csv
        .as_deref()
        .map(SecondaryCatalog::from_csv_path)
        .transpose()
        .context("failed to read recount catalog")?;
    let source = SqliteSnapshotSource::new(&args.sra_db, &args.metasra_db);

    let report = app
        .rebuild(&source, &ontology, catalog.as_ref())
        .context("rebuild failed; the live generation is unchanged")?;
    print_json(&report)
}

fn run_samples(app: &Termsift, args: SamplesArgs) -> Result<()> {
    let format = args.format;
    let result = match app.search_samples(&sample_params(args)) {
        Ok(result) => result,
        Err(err) if err.is_user_facing() => return user_error(&err, false),
        Err(err) => return Err(err).context("sample search failed"),
    };
    match format {
        SampleFormat::Json => print_json(&result),
        SampleFormat::Csv => print_text(&samples_csv(&result)?),
        SampleFormat::RunsCsv => print_text(&runs_csv(&result)?),
        SampleFormat::RunIds => print_text(&run_ids_text(&result)),
    }
}

fn run_terms(app: &Termsift, args: TermsArgs) -> Result<()> {
    match app.lookup_terms(&term_params(args)) {
        Ok(result) => print_json(&result),
        Err(err) if err.is_user_facing() => user_error(&err, true),
        Err(err) => Err(err).context("term lookup failed"),
    }
}
