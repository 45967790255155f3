use std::collections::HashSet;
use std::path::{Path, PathBuf};

use runtrace_store::CommandLog;
use runtrace_types::{Digest, FileRecord, Result, STREAM_PATH_PREFIX};

use crate::tree::{CommandNode, Direction, FileNode};

/// Per-traversal visited set, keyed by the recorded (path, digest) pair.
/// Keys use the recorded path, not the display path, so working-directory
/// relativization cannot merge distinct nodes.
type Visited = HashSet<(PathBuf, Digest)>;

/// Builds provenance trees by walking the command log.
///
/// Matching is digest-exact, never path-based: the same path is reused
/// across runs with different content, and provenance tracks which version
/// of a file a command produced or consumed, not merely its location.
pub struct Inspector<'a> {
    log: &'a CommandLog,
    work_dir: PathBuf,
}

impl<'a> Inspector<'a> {
    pub fn new(log: &'a CommandLog, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            log,
            work_dir: work_dir.into(),
        }
    }

    /// What produced this file, transitively.
    ///
    /// The anchor is hashed here, exactly once; recursion below passes the
    /// recorded digests down and never touches the disk again.
    pub fn fan_in(&self, file: &Path) -> Result<FileNode> {
        let digest = Digest::of_path(file)?;
        Ok(self.fan_in_digest(file, digest))
    }

    /// What this file went on to produce, transitively.
    pub fn fan_out(&self, file: &Path) -> Result<FileNode> {
        let digest = Digest::of_path(file)?;
        Ok(self.fan_out_digest(file, digest))
    }

    /// Fan-in anchored at a known digest; no disk access.
    pub fn fan_in_digest(&self, file: &Path, digest: Digest) -> FileNode {
        self.walk(file, digest, Direction::FanIn, &mut Visited::new())
    }

    /// Fan-out anchored at a known digest; no disk access.
    pub fn fan_out_digest(&self, file: &Path, digest: Digest) -> FileNode {
        self.walk(file, digest, Direction::FanOut, &mut Visited::new())
    }

    fn walk(
        &self,
        file: &Path,
        digest: Digest,
        direction: Direction,
        visited: &mut Visited,
    ) -> FileNode {
        let mut node = FileNode::new(
            FileRecord::new(self.work_path(file), digest.clone()),
            direction,
        );

        // Cut revisited (path, digest) pairs so cyclic logs terminate.
        if !visited.insert((file.to_path_buf(), digest.clone())) {
            return node;
        }

        // The sentinel digest marks unhashable content; it matches nothing.
        if digest.is_empty() {
            return node;
        }

        // Most recent command first; every matching entry is attached, in
        // scan order.
        for entry in self.log.entries_rev() {
            let hit = match direction {
                Direction::FanIn => entry.wrote_digest(&digest),
                Direction::FanOut => entry.read_digest(&digest),
            };
            if !hit {
                continue;
            }

            log::debug!(
                "{} matched [{}] at {}",
                file.display(),
                entry.command.join(" "),
                entry.timestamp
            );

            let mut command = CommandNode::new(entry.clone(), direction);
            let next_files = match direction {
                Direction::FanIn => &entry.in_files,
                Direction::FanOut => &entry.out_files,
            };
            for record in next_files {
                command
                    .children
                    .push(self.walk(&record.path, record.digest.clone(), direction, visited));
            }
            node.children.push(command);
        }
        node
    }

    /// Display form of a path: relative to the working directory when
    /// underneath it, untouched for /dev/* sentinels, absolute otherwise.
    fn work_path(&self, path: &Path) -> PathBuf {
        if path.starts_with(STREAM_PATH_PREFIX) {
            return path.to_path_buf();
        }
        match path.strip_prefix(&self.work_dir) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => normalize_path(path),
        }
    }
}

/// Resolve to an absolute path without requiring the file to exist:
/// canonicalize when possible, else join onto the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}
