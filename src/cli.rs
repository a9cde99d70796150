//! Command-line interface for the bridge's debug tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "astbridge")]
#[command(about = "Replay a recorded front-end build through the AST bridge", long_about = None)]
pub struct Cli {
    /// Log phase advances and recorded problems to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the declaration trees, problems, tasks and class files of a fixture
    Dump {
        /// Recorded front-end, as JSON
        fixture: PathBuf,

        /// Bridge options, as JSON
        #[arg(long)]
        options: Option<PathBuf>,

        /// Last callback to run
        #[arg(long, value_enum, default_value_t = Stage::Generate)]
        stage: Stage,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Stage {
    Populate,
    Resolve,
    Analyse,
    Generate,
}
