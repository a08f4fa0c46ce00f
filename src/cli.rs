use crate::types::FunnelStage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Funnelscope - Overlap statistics across engagement funnel stages
#[derive(Parser, Debug)]
#[command(name = "funnelscope")]
#[command(about = "A terminal dashboard for audience overlap between funnel stages")]
#[command(version)]
pub struct Cli {
    /// Dashboard configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the stage CSV files are read from.
    ///
    /// Overrides `data_dir` from the configuration file.
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive dashboard (default)
    Dashboard,
    /// Print the overlap report for a selection and exit
    Report {
        /// Stage to include; repeat for several (e.g. --select download-brochure)
        #[arg(short, long = "select", required = true, num_args = 1..)]
        select: Vec<FunnelStage>,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        file: PathBuf,
    },
    /// Write a default configuration file
    InitConfig {
        /// Where to write the configuration
        path: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether this invocation runs the interactive dashboard
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Dashboard))
    }
}
