//! Content hashing and the corpus-wide duplicate index.

use blake3::Hash as Blake3Hash;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::{fs::File, io::Read, path::Path};

use crate::error::Result;
use crate::types::DuplicateRecord;

/// Compute the content hash of a file using the Blake3 algorithm
pub fn compute_content_hash<P: AsRef<Path>>(path: P) -> Result<Blake3Hash> {
    let hash = {
        let mut file = File::open(&path)?;
        let mut hasher = blake3::Hasher::new();

        // Read the file in chunks and update the hasher
        let mut buffer = [0; 8192]; // 8KB buffer
        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        hasher.finalize()
    };

    Ok(hash)
}

/// Corpus-wide index of content hashes seen during one audit pass.
///
/// Maps hex hash to the FIRST file name seen with that content. The
/// index only grows; an entry is never overwritten, so every later copy
/// reports the first occurrence rather than the previous one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DuplicateIndex {
    seen: HashMap<String, String>,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// First-seen file name for a hex hash, if any
    pub fn first_seen(&self, hash: &str) -> Option<&str> {
        self.seen.get(hash).map(String::as_str)
    }

    /// Register one file in the index.
    ///
    /// Returns `Ok(Some(record))` when the content was already seen,
    /// `Ok(None)` when this is the first occurrence. On a read failure
    /// the error is returned and the index is left untouched.
    pub fn register(
        &mut self,
        path: &Path,
        file_name: &str,
        class: &str,
    ) -> Result<Option<DuplicateRecord>> {
        let hash = compute_content_hash(path)?;

        match self.seen.entry(hash.to_string()) {
            Entry::Occupied(first) => Ok(Some(DuplicateRecord {
                image_name: file_name.to_string(),
                class: class.to_string(),
                duplicate_of: first.get().clone(),
            })),
            Entry::Vacant(slot) => {
                slot.insert(file_name.to_string());
                Ok(None)
            }
        }
    }

    pub(crate) fn into_inner(self) -> HashMap<String, String> {
        self.seen
    }
}

// -- Tests --
