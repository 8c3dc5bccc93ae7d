pub mod addresses;
pub mod calls;

mod client;
mod contract;
mod ens;
mod env;
mod events;
mod source;
mod wallet;

pub use calls::erc20::TokenInfo;
pub use calls::RawTransaction;
pub use client::{network_info, BlockSummary, EvmClient, NetworkInfo, NodeConnection, PendingTx, TxReceipt};
pub use contract::{parse_abi, AbiSource, Contract};
pub use ens::{namehash, AddressOrName};
pub use env::EvmEnv;
pub use source::{ChainSource, Confirmation};
pub use events::{as_amount, subscribe, Delivery, EventArg, EventFilter, EventRecord, Subscription};
pub use wallet::LocalWallet;

pub use alloy_core::dyn_abi::DynSolValue;
pub use alloy_core::primitives::{Address, U256};
