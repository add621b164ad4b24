//! Stable hashing helpers for plans, configs, and emitted rows.

use blake3::Hasher;
use serde::Serialize;

use crate::types::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        // blake3 hex(32b) is 64 hex chars
        let mut s = String::with_capacity(64);
        for b in &self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub fn hash_bytes(bytes: &[u8]) -> Hash256 {
    let mut h = Hasher::new();
    h.update(bytes);
    let out = h.finalize();
    Hash256(out.into())
}

pub fn hash_str(s: &str) -> Hash256 {
    hash_bytes(s.as_bytes())
}

/// Hash any serde-serializable value deterministically (via JSON).
pub fn hash_serde<T: Serialize>(v: &T) -> Result<Hash256, crate::error::Error> {
    let bytes = serde_json::to_vec(v)?;
    Ok(hash_bytes(&bytes))
}

/// Incremental digest over a row sequence.
///
/// Each row contributes its arity and then every field length-prefixed, so
/// `["ab"]`, `["a","b"]` and `["a"],["b"]` all hash differently.
pub struct RowHasher {
    hasher: Hasher,
    rows: u64,
}

impl Default for RowHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl RowHasher {
    pub fn new() -> Self {
        Self {
            hasher: Hasher::new(),
            rows: 0,
        }
    }

    pub fn update(&mut self, row: &Row) {
        self.hasher.update(&(row.arity() as u64).to_le_bytes());
        for field in row.fields() {
            self.hasher.update(&(field.len() as u64).to_le_bytes());
            self.hasher.update(field.as_bytes());
        }
        self.rows += 1;
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn finalize(&self) -> Hash256 {
        Hash256(self.hasher.finalize().into())
    }
}
