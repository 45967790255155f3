pub mod error;
pub mod mux;
pub mod recorder;
pub mod stream;

pub use error::{Error, Result};
pub use mux::{Frame, FrameReader, StreamKind};
pub use recorder::EntryRecorder;
pub use stream::StreamDigest;

use runtrace_types::CommandEntry;

/// Executes one tool invocation and returns its completed log entry.
///
/// Implemented by the container front end. The provenance core never
/// invokes commands itself; it only consumes the entries a runner records.
pub trait CommandRunner {
    fn run(&mut self, args: &[String]) -> anyhow::Result<CommandEntry>;
}
