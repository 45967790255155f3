use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runtrace")]
#[command(about = "Trace file provenance across recorded container tool runs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "~/.runtrace", global = true)]
    pub data_dir: String,

    #[arg(
        long,
        default_value = "warn",
        global = true,
        help = "Log filter (error, warn, info, debug, trace)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show what produced a file, transitively")]
    Fanin {
        #[arg(help = "File to analyze")]
        file: PathBuf,
    },

    #[command(about = "Show what a file went on to produce, transitively")]
    Fanout {
        #[arg(help = "File to analyze")]
        file: PathBuf,
    },
}
