use std::time::Duration;

use alloy_rpc_types::{Filter, Log};
use anyhow::Result;
use async_trait::async_trait;
use ethlab_common::CryptoHash;

use crate::client::TxReceipt;

/// Outcome of waiting for a transaction to land in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Mined,
    TimedOut,
}

/// The node reads that event listeners and transaction confirmation poll.
#[async_trait]
pub trait ChainSource: Send + Sync + 'static {
    async fn block_number(&self) -> Result<u64>;

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>>;

    async fn receipt(&self, tx_hash: &CryptoHash) -> Result<Option<TxReceipt>>;

    /// Resolves once the transaction is included, or reports `TimedOut`.
    async fn watch_mined(&self, tx_hash: &CryptoHash, timeout: Duration) -> Result<Confirmation>;
}
