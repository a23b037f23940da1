use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "items-api", about = "Demonstration CRUD backend for CI/CD practice")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (the default when no subcommand is given).
    Serve {
        /// Listen port; overrides the PORT environment variable.
        #[arg(long)]
        port: Option<u16>,
    },
}
