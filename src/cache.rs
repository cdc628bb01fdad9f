//! Response cache for the Launchpad client.
//!
//! The cache root is an explicit constructor argument rather than anything
//! derived from `$HOME`: the pipeline points it into the run's scratch
//! directory, so the cache disappears with it on every exit path and no
//! process-wide environment is touched.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// On-disk cache of fetched response bodies, keyed by URL digest.
#[derive(Debug)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// Create a cache rooted at `dir`. The directory itself is created lazily
    /// on first write.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Look up a previously stored body for `url`.
    pub fn get(&self, url: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(url)).ok()
    }

    /// Store a response body for `url`.
    ///
    /// Callers treat failures as non-fatal: a missing cache entry only costs
    /// a refetch.
    pub fn put(&self, url: &str, body: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(url), body)
    }

    /// Cache entries are named by the lowercase hex SHA-256 of the URL, which
    /// keeps arbitrary URLs filesystem-safe.
    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        let mut name = String::with_capacity(digest.len() * 2);
        for byte in digest {
            name.push_str(&format!("{byte:02x}"));
        }
        self.dir.join(name)
    }
}
