use md5::{Digest as _, Md5};

use runtrace_types::{Digest, FileRecord};

/// Incremental digest and byte count over one standard stream.
///
/// Runner implementations feed every chunk that crosses the stream here;
/// when the run completes the accumulator becomes the stream's sentinel
/// file record, or nothing at all when no bytes flowed.
pub struct StreamDigest {
    hasher: Md5,
    bytes: u64,
}

impl StreamDigest {
    pub fn new() -> Self {
        Self {
            hasher: Md5::new(),
            bytes: 0,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.bytes += data.len() as u64;
        self.hasher.update(data);
    }

    pub fn byte_count(&self) -> u64 {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }

    /// Finish into a record at the given sentinel path; `None` when the
    /// stream carried no data.
    pub fn into_record(self, path: &str) -> Option<FileRecord> {
        if self.bytes == 0 {
            return None;
        }
        let digest = Digest::new(format!("{:x}", self.hasher.finalize()));
        Some(FileRecord::new(path, digest))
    }
}

impl Default for StreamDigest {
    fn default() -> Self {
        Self::new()
    }
}
