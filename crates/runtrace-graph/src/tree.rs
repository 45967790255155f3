use runtrace_types::{CommandEntry, FileRecord};

/// Which way a tree was grown from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward producers: what made this file, transitively.
    FanIn,
    /// Toward consumers: what this file went on to produce.
    FanOut,
}

/// File level of the alternating provenance tree.
///
/// Levels alternate strictly: files point at commands, commands point at
/// files. A node without children is a frontier — no known producer, not
/// consumed further, or a cycle cut at an already-visited (path, digest).
/// Trees are built per query and discarded after rendering.
#[derive(Debug, Clone)]
pub struct FileNode {
    pub record: FileRecord,
    pub direction: Direction,
    pub children: Vec<CommandNode>,
}

impl FileNode {
    pub fn new(record: FileRecord, direction: Direction) -> Self {
        Self {
            record,
            direction,
            children: Vec::new(),
        }
    }
}

/// Command level of the alternating provenance tree.
#[derive(Debug, Clone)]
pub struct CommandNode {
    pub entry: CommandEntry,
    pub direction: Direction,
    pub children: Vec<FileNode>,
}

impl CommandNode {
    pub fn new(entry: CommandEntry, direction: Direction) -> Self {
        Self {
            entry,
            direction,
            children: Vec::new(),
        }
    }
}
