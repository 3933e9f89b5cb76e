use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct GenerationsArgs {
    #[command(subcommand)]
    pub command: GenerationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GenerationsCommand {
    /// Stored generations, newest first, with their role.
    List,
    /// Make the previous generation live again.
    Rollback,
}
