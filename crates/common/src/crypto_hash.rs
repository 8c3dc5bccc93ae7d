use std::fmt;
use std::hash::{Hash, Hasher};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// A 32-byte hash, used for transaction and block hashes.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CryptoHash {
    #[serde(with = "hex::serde")]
    hash: [u8; 32],
}

impl CryptoHash {
    pub fn new(hash: [u8; 32]) -> Self {
        Self { hash }
    }

    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.hash.to_vec()
    }

    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }

    pub fn from_hex_string(s: &str) -> Result<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let decoded_hash = hex::decode(stripped)?;
        let hash: [u8; 32] = decoded_hash
            .as_slice()
            .try_into()
            .map_err(|_| anyhow!("Wrong length for CryptoHash from hex string: expected 32 bytes, got {}", decoded_hash.len()))?;
        Ok(Self::new(hash))
    }
}

impl From<[u8; 32]> for CryptoHash {
    fn from(hash: [u8; 32]) -> Self {
        Self::new(hash)
    }
}

impl std::str::FromStr for CryptoHash {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_string(s)
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Hash for CryptoHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.hash());
    }
}
