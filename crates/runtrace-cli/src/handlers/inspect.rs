use anyhow::Result;
use std::path::Path;

use runtrace_graph::{Direction, Inspector, normalize_path};
use runtrace_store::LogFile;

/// Shared handler for the fanin/fanout queries: load the log, anchor an
/// inspector at the current directory, print one tree.
pub fn handle(log_path: &Path, file: &Path, direction: Direction) -> Result<()> {
    let log = LogFile::new(log_path).load()?;
    log::debug!("{} entries loaded from {}", log.len(), log_path.display());

    let work_dir = std::env::current_dir()?;
    let inspector = Inspector::new(&log, &work_dir);

    let anchor = normalize_path(file);
    let tree = match direction {
        Direction::FanIn => inspector.fan_in(&anchor)?,
        Direction::FanOut => inspector.fan_out(&anchor)?,
    };

    println!("{}", tree);
    Ok(())
}
