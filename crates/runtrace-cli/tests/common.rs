//! Shared fixture for CLI integration tests.
//!
//! Note: Clippy cannot track usage across integration test files, hence
//! the `allow(dead_code)` annotation.
#![allow(dead_code)]

use assert_cmd::Command;
use runtrace_store::LogFile;
use runtrace_types::{CommandEntry, Digest, FileRecord};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    data_dir: PathBuf,
    work_dir: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".runtrace");
        let work_dir = temp_dir.path().join("work");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        Self {
            _temp_dir: temp_dir,
            data_dir,
            work_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("command_log.jsonl")
    }

    /// Write a file into the working directory and return its absolute path.
    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.work_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Append an entry to the fixture's command log. Paths are recorded in
    /// resolved form, the way a runner records them.
    pub fn record(&self, command: &[&str], inputs: &[(&Path, &[u8])], outputs: &[(&Path, &[u8])]) {
        self.record_to(&self.log_path(), command, inputs, outputs);
    }

    pub fn record_to(
        &self,
        log_path: &Path,
        command: &[&str],
        inputs: &[(&Path, &[u8])],
        outputs: &[(&Path, &[u8])],
    ) {
        let mut entry = CommandEntry::new(command.iter().map(|s| s.to_string()).collect());
        for (path, content) in inputs {
            entry
                .in_files
                .push(FileRecord::new(resolve(path), Digest::hash_bytes(content)));
        }
        for (path, content) in outputs {
            entry
                .out_files
                .push(FileRecord::new(resolve(path), Digest::hash_bytes(content)));
        }
        LogFile::new(log_path)
            .append(&entry)
            .expect("Failed to append entry");
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("runtrace");
        cmd.current_dir(&self.work_dir)
            .arg("--data-dir")
            .arg(&self.data_dir);
        cmd
    }
}

fn resolve(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
