use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use runtrace_types::CommandEntry;

use crate::store::CommandLog;
use crate::Result;

/// JSONL persistence for the command log: one entry per line, append-only.
///
/// Lines keep their write order on reload, so reverse-chronological scans
/// over the loaded store remain meaningful.
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries.
    ///
    /// A missing file is an empty store. So is a malformed one: a fresh or
    /// damaged installation degrades to "no history" rather than failing
    /// the query, and damage is reported as a warning instead of being
    /// presented as partial provenance.
    pub fn load(&self) -> Result<CommandLog> {
        if !self.path.exists() {
            log::debug!("no command log at {}", self.path.display());
            return Ok(CommandLog::new());
        }

        let text = std::fs::read_to_string(&self.path)?;
        let mut entries = CommandLog::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<CommandEntry>(line) {
                Ok(entry) => entries.append(entry),
                Err(err) => {
                    log::warn!(
                        "malformed command log {}: {}; treating the log as empty",
                        self.path.display(),
                        err
                    );
                    return Ok(CommandLog::new());
                }
            }
        }

        log::debug!(
            "loaded {} entries from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    /// Append one entry to the tail of the log.
    ///
    /// Creates the file and its parent directories on first write. I/O
    /// faults are surfaced to the caller, never swallowed.
    pub fn append(&self, entry: &CommandEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtrace_types::{Digest, FileRecord};

    fn entry(name: &str, output: &[u8]) -> CommandEntry {
        let mut entry = CommandEntry::new(vec![name.to_string()]);
        entry
            .out_files
            .push(FileRecord::new("out.bin", Digest::hash_bytes(output)));
        entry
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = LogFile::new(dir.path().join("command_log.jsonl"));
        let log = file.load().unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn append_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = LogFile::new(dir.path().join("logs").join("command_log.jsonl"));

        file.append(&entry("first", b"1")).unwrap();
        file.append(&entry("second", b"2")).unwrap();
        file.append(&entry("third", b"3")).unwrap();

        let log = file.load().unwrap();
        let names: Vec<_> = log.entries().map(|e| e.command[0].as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn reloaded_entries_match_what_was_written() {
        let dir = tempfile::tempdir().unwrap();
        let file = LogFile::new(dir.path().join("command_log.jsonl"));

        let written = entry("cat", b"abc");
        file.append(&written).unwrap();

        let log = file.load().unwrap();
        assert_eq!(log.entries().next(), Some(&written));
    }

    #[test]
    fn malformed_log_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("command_log.jsonl");
        std::fs::write(&path, "{not json at all\n").unwrap();

        let log = LogFile::new(&path).load().unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let file = LogFile::new(dir.path().join("command_log.jsonl"));

        file.append(&entry("only", b"1")).unwrap();
        let mut raw = std::fs::read_to_string(file.path()).unwrap();
        raw.push('\n');
        std::fs::write(file.path(), raw).unwrap();

        let log = file.load().unwrap();
        assert_eq!(log.len(), 1);
    }
}
