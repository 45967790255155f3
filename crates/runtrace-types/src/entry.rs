use chrono::{DateTime, FixedOffset, Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::record::{Digest, FileRecord};

/// Timestamp format used in the persisted log: local wall-clock time with
/// zone offset, microsecond precision.
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f %z";

/// One recorded command invocation with its file I/O.
///
/// Created when a run completes and immutable afterwards. A path produced
/// again later is superseded by a newer entry, never by mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Argument vector as invoked by the user; element 0 is the tool name.
    pub command: Vec<String>,

    /// Process exit code; 0 denotes success.
    #[serde(default)]
    pub exit_code: i32,

    #[serde(with = "log_time")]
    pub timestamp: DateTime<FixedOffset>,

    /// Files consumed by the command, standard input included when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub in_files: Vec<FileRecord>,

    /// Files produced by the command, standard output and error included
    /// when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub out_files: Vec<FileRecord>,
}

impl CommandEntry {
    /// Start an entry for a command invocation, stamped with the current time.
    pub fn new(command: Vec<String>) -> Self {
        // Truncated to the microsecond precision the log format keeps, so
        // a persisted entry reloads identical to the one in memory.
        let now = Local::now().fixed_offset();
        let timestamp = now
            .with_nanosecond(now.nanosecond() / 1000 * 1000)
            .unwrap_or(now);

        Self {
            command,
            exit_code: 0,
            timestamp,
            in_files: Vec::new(),
            out_files: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// True if any output record carries this digest.
    pub fn wrote_digest(&self, digest: &Digest) -> bool {
        self.out_files.iter().any(|f| &f.digest == digest)
    }

    /// True if any input record carries this digest.
    pub fn read_digest(&self, digest: &Digest) -> bool {
        self.in_files.iter().any(|f| &f.digest == digest)
    }
}

mod log_time {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::LOG_TIME_FORMAT;

    pub fn serialize<S>(ts: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(LOG_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, LOG_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
