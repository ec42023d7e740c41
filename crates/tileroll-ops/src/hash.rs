//! Cache keys for rendered results.
//!
//! Hosts cache operator output keyed by a digest of everything that can
//! change it: the operator's build, its parameter values and the identity
//! of its inputs. Each node appends its part to a shared [`CacheHash`] and
//! then delegates upstream.
//!
//! ```rust
//! use tileroll_ops::hash::{CacheHash, BUILD_ID};
//!
//! let mut a = CacheHash::new();
//! a.append_str(BUILD_ID);
//! let mut b = CacheHash::new();
//! b.append_str(BUILD_ID);
//! assert_eq!(a.key(), b.key());
//! ```

use sha2::{Digest, Sha256};

/// Identifier of the operator build, mixed into every cache key.
///
/// Defaults to `<package>-<version>`. Release pipelines can inject a
/// unique value through the `TILEROLL_BUILD_ID` environment variable at
/// compile time so that any rebuild flushes previously cached results.
pub const BUILD_ID: &str = match option_env!("TILEROLL_BUILD_ID") {
    Some(id) => id,
    None => concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")),
};

/// Incremental SHA-256 accumulator.
///
/// Every `append_*` call is framed with a type tag and, for variable
/// length data, a length prefix, so different value sequences cannot
/// produce the same byte stream.
#[derive(Clone, Default)]
pub struct CacheHash {
    hasher: Sha256,
}

impl CacheHash {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw bytes.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update([b'b']);
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    /// Appends a string.
    pub fn append_str(&mut self, s: &str) {
        self.hasher.update([b's']);
        self.hasher.update((s.len() as u64).to_le_bytes());
        self.hasher.update(s.as_bytes());
    }

    /// Appends a float by bit pattern.
    pub fn append_f64(&mut self, v: f64) {
        self.hasher.update([b'f']);
        self.hasher.update(v.to_bits().to_le_bytes());
    }

    /// Appends a signed integer.
    pub fn append_i64(&mut self, v: i64) {
        self.hasher.update([b'i']);
        self.hasher.update(v.to_le_bytes());
    }

    /// Appends a previously computed key, e.g. an input's content digest.
    pub fn append_key(&mut self, key: &CacheKey) {
        self.hasher.update([b'k']);
        self.hasher.update(key.0);
    }

    /// Digest of everything appended so far. The accumulator stays usable.
    pub fn key(&self) -> CacheKey {
        CacheKey(self.hasher.clone().finalize().into())
    }
}

impl std::fmt::Debug for CacheHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CacheHash").field(&self.key()).finish()
    }
}

/// Finalised cache key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(pub [u8; 32]);

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CacheKey({})", self)
    }
}
