use std::fmt;
use std::str::FromStr;

use alloy_core::primitives::{keccak256, Address, B256};
use anyhow::{anyhow, bail, Result};

use crate::calls::ens::{decode_addr, decode_resolver, lookup_addr, lookup_resolver};
use crate::client::NodeConnection;

/// EIP-137 namehash. Labels are hashed as given; callers pass lowercase names.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }

    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

/// Either a literal address or a name to resolve through ENS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressOrName {
    Address(Address),
    Name(String),
}

impl FromStr for AddressOrName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(address) = Address::from_str(s) {
            return Ok(Self::Address(address));
        }
        if s.starts_with("0x") {
            bail!("Invalid address: {}", s);
        }
        validate_name(s)?;
        Ok(Self::Name(s.to_lowercase()))
    }
}

impl From<Address> for AddressOrName {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl fmt::Display for AddressOrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{}", address),
            Self::Name(name) => f.write_str(name),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if !name.contains('.') || name.split('.').any(str::is_empty) {
        bail!("Invalid ENS name: {:?}", name);
    }
    Ok(())
}

impl NodeConnection {
    /// Registry lookup of the resolver, then the resolver's `addr` record.
    pub async fn resolve_name(&self, name: &str) -> Result<Address> {
        validate_name(name)?;
        let node = namehash(&name.to_lowercase());

        let resolver = decode_resolver(&self.call(lookup_resolver(node)).await?)?;
        if resolver == Address::ZERO {
            return Err(anyhow!("No resolver set for {}", name));
        }

        let address = decode_addr(&self.call(lookup_addr(resolver, node)).await?)?;
        if address == Address::ZERO {
            return Err(anyhow!("{} does not resolve to an address", name));
        }

        tracing::debug!("[NodeConnection::resolve_name] {} -> {}", name, address);
        Ok(address)
    }

    pub async fn resolve(&self, target: &AddressOrName) -> Result<Address> {
        match target {
            AddressOrName::Address(address) => Ok(*address),
            AddressOrName::Name(name) => self.resolve_name(name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::primitives::b256;

    #[test]
    fn namehash_reference_vectors() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(
            namehash("eth"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
    }

    #[test]
    fn parses_addresses_and_names() {
        let address: AddressOrName = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse().unwrap();
        assert_eq!(address, AddressOrName::Address(crate::addresses::VITALIK));

        let name: AddressOrName = "Vitalik.eth".parse().unwrap();
        assert_eq!(name, AddressOrName::Name("vitalik.eth".to_string()));
        assert_eq!(name.to_string(), "vitalik.eth");
    }

    #[test]
    fn rejects_malformed_targets() {
        assert!("0x1234".parse::<AddressOrName>().is_err());
        assert!("vitalik".parse::<AddressOrName>().is_err());
        assert!("vitalik..eth".parse::<AddressOrName>().is_err());
    }

    #[tokio::test]
    async fn literal_addresses_skip_the_network() {
        let client = NodeConnection::new("http://127.0.0.1:1").unwrap();
        let target = AddressOrName::from(crate::addresses::VITALIK);
        assert_eq!(client.resolve(&target).await.unwrap(), crate::addresses::VITALIK);
    }
}
