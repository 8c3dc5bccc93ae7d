use alloy_core::primitives::{Address, Bytes, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};

pub mod ens;
pub mod erc20;
pub mod weth;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    /// The target contract address
    pub to: Address,
    /// The ETH value to send with the call
    pub value: U256,
    /// The calldata for the transaction
    pub data: Bytes,
}

impl RawTransaction {
    pub fn into_request(self) -> TransactionRequest {
        TransactionRequest::default()
            .to(self.to)
            .value(self.value)
            .input(TransactionInput::new(self.data))
    }
}
