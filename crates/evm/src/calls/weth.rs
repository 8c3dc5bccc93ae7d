use alloy_core::primitives::{Address, U256};
use alloy_core::sol;
use alloy_core::sol_types::SolCall;

use super::RawTransaction;

sol! {
    #[derive(Debug)]
    interface IWETH {
        function deposit() external payable;
        function withdraw(uint256 wad) external;
        function transfer(address dst, uint256 wad) external returns (bool);
    }
}

/// Wraps `amount` of ETH; the value rides on the transaction itself.
pub fn deposit(weth: Address, amount: U256) -> RawTransaction {
    RawTransaction {
        to: weth,
        value: amount,
        data: IWETH::depositCall {}.abi_encode().into(),
    }
}

pub fn withdraw(weth: Address, amount: U256) -> RawTransaction {
    RawTransaction {
        to: weth,
        value: U256::ZERO,
        data: IWETH::withdrawCall { wad: amount }.abi_encode().into(),
    }
}

pub fn transfer(weth: Address, to: Address, amount: U256) -> RawTransaction {
    RawTransaction {
        to: weth,
        value: U256::ZERO,
        data: IWETH::transferCall { dst: to, wad: amount }.abi_encode().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::{sepolia, VITALIK};

    #[test]
    fn deposit_carries_value_not_args() {
        let tx = deposit(sepolia::WETH, U256::from(1_000_000_000_000_000u64));
        assert_eq!(tx.value, U256::from(1_000_000_000_000_000u64));
        assert_eq!(tx.data.as_ref(), &[0xd0, 0xe3, 0x0d, 0xb0]);
    }

    #[test]
    fn withdraw_and_transfer_selectors() {
        let tx = withdraw(sepolia::WETH, U256::from(5u64));
        assert_eq!(&tx.data[..4], &[0x2e, 0x1a, 0x7d, 0x4d]);
        assert_eq!(tx.value, U256::ZERO);

        let tx = transfer(sepolia::WETH, VITALIK, U256::from(5u64));
        assert_eq!(&tx.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }
}
