use anyhow::Result;
use env_logger::Env;
use std::path::{Path, PathBuf};

use crate::args::{Cli, Commands};
use crate::config::Config;
use crate::handlers;
use runtrace_graph::Direction;

pub fn run(cli: Cli) -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    let data_dir = expand_tilde(&cli.data_dir);

    let Some(command) = cli.command else {
        show_guidance(&data_dir);
        return Ok(());
    };

    let config = Config::load_from(&data_dir.join("config.toml"))?;
    let log_path = config.resolve_log_path(&data_dir);

    match command {
        Commands::Fanin { file } => handlers::inspect::handle(&log_path, &file, Direction::FanIn),
        Commands::Fanout { file } => handlers::inspect::handle(&log_path, &file, Direction::FanOut),
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}

fn show_guidance(data_dir: &Path) {
    let log_exists = data_dir.join("command_log.jsonl").exists();

    println!("runtrace - File provenance for container tool runs\n");

    if !log_exists {
        println!("No command log yet. Runs recorded by a runtrace-enabled tool");
        println!("front end will appear under {}\n", data_dir.display());
        println!("Once runs are recorded:");
    } else {
        println!("Quick commands:");
    }
    println!("  runtrace fanin <file>             # What produced this file");
    println!("  runtrace fanout <file>            # What this file produced\n");
    println!("For more options:");
    println!("  runtrace --help");
}
