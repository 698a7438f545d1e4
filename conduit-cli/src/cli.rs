//! Command-line interface definition.

use clap::{Parser, Subcommand};
use conduit_core::DEFAULT_LAYER;
use std::path::PathBuf;

pub const DEFAULT_PATH_DAYS: u32 = 30;

#[derive(Debug, Parser)]
#[command(name = "conduit")]
#[command(author, version, about = "Task/agent orchestration demo host", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file (falls back to CONDUIT_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print compact instead of pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Register the reference agents and run one task end to end
    Demo {
        /// Learning path length in days
        #[arg(long, default_value_t = DEFAULT_PATH_DAYS)]
        days: u32,
    },

    /// Print the plan resolved for a category and subcategory
    Plan {
        /// Category label (e.g. technical, volume_2, infra)
        category: String,
        /// Subcategory label (e.g. 4.0)
        subcategory: String,
    },

    /// Print the four impact assessments for a focus label
    Estimate {
        /// Focus label (business domain, product name, ...)
        focus: String,
        /// Layer ordinal
        #[arg(long, default_value_t = DEFAULT_LAYER)]
        layer: u8,
        /// Timing constraint text
        #[arg(long, default_value = "")]
        timing: String,
        /// Resource level text
        #[arg(long, default_value = "")]
        resources: String,
    },

    /// Print a learning path for a category
    LearningPath {
        category: String,
        #[arg(long, default_value_t = DEFAULT_PATH_DAYS)]
        days: u32,
    },
}
