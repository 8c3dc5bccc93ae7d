use alloy_core::primitives::{Address, B256, U256};
use alloy_core::sol;
use alloy_core::sol_types::SolCall;
use anyhow::Result;

use crate::addresses::ENS_REGISTRY;

use super::RawTransaction;

sol! {
    #[derive(Debug)]
    function resolver(bytes32 node) external view returns (address);

    #[derive(Debug)]
    function addr(bytes32 node) external view returns (address);
}

pub fn lookup_resolver(node: B256) -> RawTransaction {
    RawTransaction {
        to: ENS_REGISTRY,
        value: U256::ZERO,
        data: resolverCall { node }.abi_encode().into(),
    }
}

pub fn lookup_addr(resolver: Address, node: B256) -> RawTransaction {
    RawTransaction {
        to: resolver,
        value: U256::ZERO,
        data: addrCall { node }.abi_encode().into(),
    }
}

pub fn decode_resolver(data: &[u8]) -> Result<Address> {
    Ok(resolverCall::abi_decode_returns(data, true)?._0)
}

pub fn decode_addr(data: &[u8]) -> Result<Address> {
    Ok(addrCall::abi_decode_returns(data, true)?._0)
}
