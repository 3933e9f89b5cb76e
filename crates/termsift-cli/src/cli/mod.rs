use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;
mod generations;


pub use args::{BuildArgs, SampleFormat, SamplesArgs, ServeArgs, TermsArgs};
pub use generations::{GenerationsArgs, GenerationsCommand};

#[derive(Debug, Parser)]
#[command(name = "termsift")]
#[command(about = "Ontology-annotated sample search index", version)]
pub struct Cli {
    /// Directory holding the generation store.
    #[arg(long, default_value = ".termsift")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild the index from raw snapshots and publish it as the live generation.
    Build(BuildArgs),
    /// Faceted sample search against the live generation.
    Samples(SamplesArgs),
    /// Term autocomplete against the live generation.
    Terms(TermsArgs),
    Generations(GenerationsArgs),
    /// Serve the HTTP read API.
    Serve(ServeArgs),
}
