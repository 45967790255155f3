use runtrace_types::{CommandEntry, FileRecord, STDERR_PATH, STDIN_PATH, STDOUT_PATH};

use crate::stream::StreamDigest;

/// Accumulates one command run and assembles its immutable log entry.
///
/// Inputs are recorded as they are uploaded, outputs as they are
/// downloaded, and the three standard streams are digested as they flow.
/// Standard-stream records are attached only when the run exited 0.
pub struct EntryRecorder {
    entry: CommandEntry,
    stdin: StreamDigest,
    stdout: StreamDigest,
    stderr: StreamDigest,
}

impl EntryRecorder {
    /// Start recording a run; the entry timestamp is set now.
    pub fn new(command: Vec<String>) -> Self {
        Self {
            entry: CommandEntry::new(command),
            stdin: StreamDigest::new(),
            stdout: StreamDigest::new(),
            stderr: StreamDigest::new(),
        }
    }

    pub fn add_input(&mut self, record: FileRecord) {
        self.entry.in_files.push(record);
    }

    pub fn add_output(&mut self, record: FileRecord) {
        self.entry.out_files.push(record);
    }

    pub fn record_stdin(&mut self, data: &[u8]) {
        self.stdin.update(data);
    }

    pub fn record_stdout(&mut self, data: &[u8]) {
        self.stdout.update(data);
    }

    pub fn record_stderr(&mut self, data: &[u8]) {
        self.stderr.update(data);
    }

    pub fn set_exit_code(&mut self, exit_code: i32) {
        self.entry.exit_code = exit_code;
    }

    /// Close the run and produce its entry.
    pub fn finish(self) -> CommandEntry {
        let mut entry = self.entry;
        if entry.succeeded() {
            if let Some(record) = self.stdin.into_record(STDIN_PATH) {
                entry.in_files.push(record);
            }
            if let Some(record) = self.stdout.into_record(STDOUT_PATH) {
                entry.out_files.push(record);
            }
            if let Some(record) = self.stderr.into_record(STDERR_PATH) {
                entry.out_files.push(record);
            }
        }
        entry
    }
}
