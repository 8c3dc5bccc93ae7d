use std::fmt;

use alloy_core::primitives::Address;
use alloy_network::EthereumWallet;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{anyhow, Result};

#[derive(Clone)]
pub struct LocalWallet {
    wallet: PrivateKeySigner,
}

impl LocalWallet {
    pub fn from_private_key(private_key: &[u8; 32]) -> Result<Self> {
        let wallet = PrivateKeySigner::from_slice(private_key)
            .map_err(|e| anyhow!("Invalid private key: {}", e))?;
        Ok(Self { wallet })
    }

    /// Accepts a 64-digit hex key, with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let stripped = private_key.trim().strip_prefix("0x").unwrap_or(private_key.trim());
        let decoded = hex::decode(stripped)?;
        let key: [u8; 32] = decoded
            .as_slice()
            .try_into()
            .map_err(|_| anyhow!("Wrong length for private key: expected 32 bytes, got {}", decoded.len()))?;
        Self::from_private_key(&key)
    }

    pub fn into_alloy_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.wallet.clone())
    }

    pub fn eth_address(&self) -> Address {
        self.wallet.address()
    }
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet").field("address", &self.eth_address()).finish()
    }
}
