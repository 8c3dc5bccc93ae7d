use alloy_core::primitives::{Address, U256};
use alloy_core::sol;
use alloy_core::sol_types::SolCall;
use anyhow::Result;
use ethlab_units::BaseAmount;

use super::RawTransaction;
use crate::client::NodeConnection;

sol! {
    #[derive(Debug)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// Token metadata plus supply, as read in a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: BaseAmount,
}

fn read(token: Address, data: Vec<u8>) -> RawTransaction {
    RawTransaction {
        to: token,
        value: U256::ZERO,
        data: data.into(),
    }
}

pub fn balance_of(token: Address, owner: Address) -> RawTransaction {
    read(token, IERC20::balanceOfCall { owner }.abi_encode())
}

pub fn transfer(token: Address, to: Address, amount: U256) -> RawTransaction {
    read(token, IERC20::transferCall { to, amount }.abi_encode())
}

pub fn decode_balance(data: &[u8]) -> Result<BaseAmount> {
    let balance = IERC20::balanceOfCall::abi_decode_returns(data, true)?._0;
    Ok(BaseAmount::from(balance))
}

impl NodeConnection {
    pub async fn erc20_balance(&self, token: Address, owner: Address) -> Result<BaseAmount> {
        decode_balance(&self.call(balance_of(token, owner)).await?)
    }

    pub async fn erc20_info(&self, token: Address) -> Result<TokenInfo> {
        let name = self.call(read(token, IERC20::nameCall {}.abi_encode())).await?;
        let symbol = self.call(read(token, IERC20::symbolCall {}.abi_encode())).await?;
        let decimals = self.call(read(token, IERC20::decimalsCall {}.abi_encode())).await?;
        let total_supply = self.call(read(token, IERC20::totalSupplyCall {}.abi_encode())).await?;

        Ok(TokenInfo {
            address: token,
            name: IERC20::nameCall::abi_decode_returns(&name, true)?._0,
            symbol: IERC20::symbolCall::abi_decode_returns(&symbol, true)?._0,
            decimals: IERC20::decimalsCall::abi_decode_returns(&decimals, true)?._0,
            total_supply: IERC20::totalSupplyCall::abi_decode_returns(&total_supply, true)?._0.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::{mainnet, VITALIK};

    #[test]
    fn balance_of_calldata() {
        let tx = balance_of(mainnet::DAI, VITALIK);
        assert_eq!(tx.to, mainnet::DAI);
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(&tx.data[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(&tx.data[16..36], VITALIK.as_slice());
    }

    #[test]
    fn transfer_calldata() {
        let tx = transfer(mainnet::WETH, VITALIK, U256::from(1_000u64));
        assert_eq!(&tx.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(tx.data.len(), 4 + 64);
        assert_eq!(U256::from_be_slice(&tx.data[36..]), U256::from(1_000u64));
    }

    #[test]
    fn decodes_balance_word() {
        let word = U256::from(10u64).pow(U256::from(18u64)).to_be_bytes::<32>();
        assert_eq!(decode_balance(&word).unwrap(), BaseAmount::pow10(18));
        assert!(decode_balance(&word[..31]).is_err());
    }
}
