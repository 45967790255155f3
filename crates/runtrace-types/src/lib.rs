pub mod entry;
pub mod error;
pub mod record;
pub mod shell;

pub use entry::{CommandEntry, LOG_TIME_FORMAT};
pub use error::{Error, Result};
pub use record::{
    Digest, FileRecord, STDERR_PATH, STDIN_PATH, STDOUT_PATH, STREAM_PATH_PREFIX,
};
