//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use catkin_env::ops::EnvironmentOptions;

/// catkin-env - classify workspace packages as source-built or system-provided
#[derive(Parser)]
#[command(name = "catkin-env")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register workspace paths and list the buildable packages in them
    Scan(ScanArgs),

    /// Classify package names
    Query(QueryArgs),

    /// Check configuration and dependency database availability
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct DatabaseArgs {
    /// Dependency database index file (repeatable, overrides config)
    #[arg(
        long = "database",
        global = true,
        env = "CATKIN_ENV_DATABASE",
        value_delimiter = ','
    )]
    pub database: Vec<PathBuf>,

    /// Ignore the dependency database entirely
    #[arg(long, global = true)]
    pub no_database: bool,
}

impl DatabaseArgs {
    pub fn to_options(&self) -> EnvironmentOptions {
        EnvironmentOptions {
            database: self.database.clone(),
            no_database: self.no_database,
        }
    }
}

#[derive(Args)]
pub struct ScanArgs {
    /// Paths to register (defaults to configured paths, then the current directory)
    pub paths: Vec<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Package names to classify
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Workspace path to register before querying (repeatable)
    #[arg(short, long = "path")]
    pub paths: Vec<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
