use alloy_core::primitives::address;
use alloy_core::primitives::Address;

/// Same address on every network ENS is deployed to.
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

pub const VITALIK: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

pub mod mainnet {
    use super::*;
    pub const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    pub const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
    pub const USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
    pub const BINANCE_HOT_WALLET: Address = address!("28C6c06298d514Db089934071355E5743bf21d60");
}

pub mod sepolia {
    use super::*;
    pub const WETH: Address = address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14");
}
