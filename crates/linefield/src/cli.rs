//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file to use instead of the default location.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fixed RNG seed, overrides the config file.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Grow a complete field and write it out.
    Export {
        /// Viewport width in pixels.
        #[arg(long, default_value_t = 1920)]
        width: i32,

        /// Viewport height in pixels.
        #[arg(long, default_value_t = 1080)]
        height: i32,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Svg)]
        format: ExportFormat,

        /// Output file. Stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Json,
}
