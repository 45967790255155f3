use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::Result;

/// Path prefix that marks standard-stream pseudo files in the log.
/// Records under this prefix are never resolved against a working directory.
pub const STREAM_PATH_PREFIX: &str = "/dev/";

/// Sentinel path recorded for data read from standard input.
pub const STDIN_PATH: &str = "/dev/stdin";
/// Sentinel path recorded for data written to standard output.
pub const STDOUT_PATH: &str = "/dev/stdout";
/// Sentinel path recorded for data written to standard error.
pub const STDERR_PATH: &str = "/dev/stderr";

const HASH_CHUNK_SIZE: usize = 2048;

/// 128-bit content hash, stored as lowercase hex.
///
/// The empty string is a sentinel for content that could not be hashed
/// (missing file, directory, device node). A sentinel digest matches no
/// other record, so such files always appear as provenance leaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The "could not hash" sentinel.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated prefix shown in rendered trees.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(16)]
    }

    /// Hash all bytes from a reader.
    pub fn hash_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut hasher = Md5::new();
        let mut chunk = [0u8; HASH_CHUNK_SIZE];
        loop {
            let n = reader.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            hasher.update(&chunk[..n]);
        }
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    pub fn hash_bytes(data: &[u8]) -> Self {
        let mut hasher = Md5::new();
        hasher.update(data);
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Hash the current content of a file on disk.
    ///
    /// A path that does not point at a regular file yields the empty
    /// sentinel digest; read faults on an existing file are surfaced.
    pub fn of_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::empty());
        }
        let file = std::fs::File::open(path)?;
        Self::hash_reader(std::io::BufReader::new(file))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One file as a command run saw it: where it was, and what its bytes
/// hashed to at that moment.
///
/// Graph identity is the (path, digest) pair. The same path observed at a
/// different digest is a different provenance node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub digest: Digest,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, digest: Digest) -> Self {
        Self {
            path: path.into(),
            digest,
        }
    }

    /// Record a file at its current on-disk content.
    pub fn from_disk(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let digest = Digest::of_path(&path)?;
        Ok(Self { path, digest })
    }

    /// True for standard-stream sentinel records.
    pub fn is_stream(&self) -> bool {
        self.path.starts_with(STREAM_PATH_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn known_digest() {
        let digest = Digest::hash_bytes(b"abc");
        assert_eq!(digest.as_str(), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(digest.short(), "900150983cd24fb0");
    }

    #[test]
    fn reader_matches_bytes() {
        // Longer than one chunk to exercise the read loop
        let data = vec![0x5au8; 5000];
        let from_reader = Digest::hash_reader(&data[..]).unwrap();
        assert_eq!(from_reader, Digest::hash_bytes(&data));
    }

    #[test]
    fn missing_file_hashes_to_sentinel() {
        let digest = Digest::of_path(Path::new("/no/such/file/anywhere")).unwrap();
        assert!(digest.is_empty());
        assert_eq!(digest.short(), "");
    }

    #[test]
    fn directory_hashes_to_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let digest = Digest::of_path(dir.path()).unwrap();
        assert!(digest.is_empty());
    }

    #[test]
    fn file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"abc").unwrap();

        let record = FileRecord::from_disk(&path).unwrap();
        assert_eq!(record.digest.as_str(), "900150983cd24fb0d6963f7d28e17f72");
        assert!(!record.is_stream());
    }

    #[test]
    fn stream_sentinels() {
        let record = FileRecord::new(STDOUT_PATH, Digest::hash_bytes(b"out"));
        assert!(record.is_stream());
    }
}
