// NOTE: Query Surface Rationale
//
// Why digest-keyed queries (not path-keyed)?
// - Paths are reused across runs with different content
// - fanin/fanout answer questions about a *version* of a file, so the
//   anchor is resolved to its current content hash before the log is walked
// - Trade-off: a file rewritten since the run it came from anchors to its
//   current digest, which may legitimately have no recorded history
//
// Why a flat JSONL log (not an indexed database)?
// - Single-user local logs stay small; a reverse scan per query is cheap
// - Append-only writes need no migrations, locking or compaction
// - Trade-off: every query rescans the whole log; a digest index is a
//   possible optimization but must not change result ordering

mod args;
mod commands;
pub mod config;
mod handlers;

pub use args::{Cli, Commands};
pub use commands::run;
