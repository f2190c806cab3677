//! Content hashing utilities.
//!
//! Cache keys in the data manager are xxh3 digests over the structure of the
//! input collections, so two calls with equal content but distinct allocations
//! map to the same key.

use chrono::NaiveDate;
use serde_json::Value;
use xxhash_rust::xxh3::{Xxh3, xxh3_64};

/// Compute a content hash for arbitrary bytes
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Streaming structural fingerprint over heterogeneous arguments.
///
/// Every argument is preceded by its tag so that moving content from one
/// argument to the next changes the digest. JSON objects are hashed with keys
/// in sorted order regardless of how the map stores them.
pub struct Fingerprint {
    hasher: Xxh3,
}

impl Fingerprint {
    /// Start a new fingerprint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
        }
    }

    /// Mix in an argument tag.
    pub fn tag(&mut self, tag: &str) -> &mut Self {
        self.hasher.update(&[0xfe]);
        self.hasher.update(tag.as_bytes());
        self.hasher.update(&[0xff]);
        self
    }

    /// Mix in a date.
    pub fn date(&mut self, tag: &str, date: NaiveDate) -> &mut Self {
        self.tag(tag);
        self.hasher.update(date.to_string().as_bytes());
        self
    }

    /// Mix in a float by its bit pattern.
    pub fn float(&mut self, tag: &str, value: f64) -> &mut Self {
        self.tag(tag);
        self.hasher.update(&value.to_bits().to_le_bytes());
        self
    }

    /// Mix in a slice of JSON values.
    pub fn values(&mut self, tag: &str, values: &[Value]) -> &mut Self {
        self.tag(tag);
        self.hasher.update(&(values.len() as u64).to_le_bytes());
        for value in values {
            hash_value(&mut self.hasher, value);
        }
        self
    }

    /// Mix in raw bytes.
    pub fn bytes(&mut self, tag: &str, bytes: &[u8]) -> &mut Self {
        self.tag(tag);
        self.hasher.update(&(bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self
    }

    /// Finish and return the 64-bit digest.
    #[must_use]
    pub fn finish(&self) -> u64 {
        self.hasher.digest()
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

fn hash_value(hasher: &mut Xxh3, value: &Value) {
    match value {
        Value::Null => hasher.update(b"n"),
        Value::Bool(b) => hasher.update(if *b { b"t" } else { b"f" }),
        Value::Number(n) => {
            hasher.update(b"#");
            hasher.update(n.to_string().as_bytes());
            hasher.update(b";");
        }
        Value::String(s) => {
            hasher.update(b"s");
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }
        Value::Array(items) => {
            hasher.update(b"[");
            hasher.update(&(items.len() as u64).to_le_bytes());
            for item in items {
                hash_value(hasher, item);
            }
        }
        Value::Object(map) => {
            hasher.update(b"{");
            hasher.update(&(map.len() as u64).to_le_bytes());
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            for key in keys {
                hasher.update(&(key.len() as u64).to_le_bytes());
                hasher.update(key.as_bytes());
                hash_value(hasher, &map[key]);
            }
        }
    }
}
