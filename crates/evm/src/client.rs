use std::time::Duration;

use alloy_chains::Chain;
use alloy_core::primitives::{Address, Bytes, B256};
use alloy_provider::{PendingTransactionConfig, PendingTransactionError, Provider, ProviderBuilder, WatchTxError};
use alloy_rpc_types::{Block, BlockId, BlockTransactionsKind, Filter, Log, TransactionRequest};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use ethlab_common::{define_module_client, CryptoHash, EnvVars};
use ethlab_units::BaseAmount;
use serde::Serialize;

use crate::calls::RawTransaction;
use crate::env::EvmEnv;
use crate::source::{ChainSource, Confirmation};
use crate::wallet::LocalWallet;

const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);

/// An HTTP JSON-RPC endpoint. A fresh provider is built for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConnection {
    rpc_url: String,
}

define_module_client! {
    (struct EvmClient, "evm")
    client_type: NodeConnection,
    env: ["ETH_RPC_URL"],
    setup: async { NodeConnection::from_env() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSummary {
    pub number: u64,
    pub hash: CryptoHash,
    pub parent_hash: CryptoHash,
    pub timestamp: u64,
    pub miner: Address,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub tx_hash: CryptoHash,
    pub block_number: Option<u64>,
    pub success: bool,
}

/// A broadcast transaction that may not be mined yet.
#[derive(Debug, Clone)]
pub struct PendingTx {
    tx_hash: CryptoHash,
    client: NodeConnection,
}

impl NodeConnection {
    pub fn new(rpc_url: impl Into<String>) -> Result<Self> {
        let rpc_url = rpc_url.into();
        if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
            bail!("RPC url must be http(s): {}", rpc_url);
        }
        Ok(Self { rpc_url })
    }

    pub fn from_env() -> Result<Self> {
        let env = EvmEnv::load()?;
        Self::new(env.get_env_var("ETH_RPC_URL")?)
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub async fn get_balance(&self, address: Address) -> Result<BaseAmount> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        let balance = provider.get_balance(address).await?;
        tracing::debug!("[NodeConnection::get_balance] {} holds {} wei", address, balance);
        Ok(BaseAmount::from(balance))
    }

    pub async fn get_block_number(&self) -> Result<u64> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        Ok(provider.get_block_number().await?)
    }

    pub async fn get_transaction_count(&self, address: Address) -> Result<u64> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        Ok(provider.get_transaction_count(address).await?)
    }

    pub async fn get_code(&self, address: Address) -> Result<Bytes> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        Ok(provider.get_code_at(address).await?)
    }

    pub async fn get_gas_price(&self) -> Result<BaseAmount> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        Ok(BaseAmount::from(provider.get_gas_price().await?))
    }

    pub async fn get_network(&self) -> Result<NetworkInfo> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        let chain_id = provider.get_chain_id().await?;
        Ok(network_info(chain_id))
    }

    pub async fn get_block(&self, number: u64) -> Result<BlockSummary> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        let block = provider
            .get_block(BlockId::number(number), BlockTransactionsKind::Hashes)
            .await?
            .ok_or_else(|| anyhow!("Block {} not found", number))?;
        Ok(BlockSummary::from(&block))
    }

    pub async fn call(&self, tx: RawTransaction) -> Result<Bytes> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        let result = provider.call(&tx.into_request()).await?;
        Ok(result)
    }

    pub async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        Ok(provider.get_logs(filter).await?)
    }

    pub async fn send_transaction(&self, tx: TransactionRequest, wallet: &LocalWallet) -> Result<PendingTx> {
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet.into_alloy_wallet())
            .on_http(self.rpc_url.parse()?);

        let pending = provider.send_transaction(tx).await?;
        let tx_hash = CryptoHash::new((*pending.tx_hash()).into());
        tracing::info!("[NodeConnection::send_transaction] broadcast {} from {}", tx_hash, wallet.eth_address());

        Ok(PendingTx { tx_hash, client: self.clone() })
    }

    pub async fn get_receipt(&self, tx_hash: &CryptoHash) -> Result<Option<TxReceipt>> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        let receipt = provider.get_transaction_receipt(B256::from(*tx_hash.hash())).await?;
        Ok(receipt.map(|receipt| TxReceipt {
            tx_hash: *tx_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
        }))
    }
}

impl PendingTx {
    pub fn tx_hash(&self) -> &CryptoHash {
        &self.tx_hash
    }

    /// Resolves once the transaction is mined. A reverted transaction is an
    /// error, as is no inclusion within the confirmation window.
    pub async fn wait(self) -> Result<TxReceipt> {
        confirm(&self.client, &self.tx_hash, CONFIRMATION_TIMEOUT).await
    }
}

pub(crate) async fn confirm<S: ChainSource>(source: &S, tx_hash: &CryptoHash, timeout: Duration) -> Result<TxReceipt> {
    // a fresh watcher only sees blocks produced after it registers
    let receipt = match source.receipt(tx_hash).await? {
        Some(receipt) => receipt,
        None => {
            if source.watch_mined(tx_hash, timeout).await? == Confirmation::TimedOut {
                bail!("Transaction {} not mined after {:?}", tx_hash, timeout);
            }
            source
                .receipt(tx_hash)
                .await?
                .ok_or_else(|| anyhow!("Transaction {} mined but no receipt returned", tx_hash))?
        }
    };

    if !receipt.success {
        bail!("Transaction {} reverted", tx_hash);
    }
    tracing::info!("[PendingTx::wait] {} mined in block {:?}", tx_hash, receipt.block_number);
    Ok(receipt)
}

#[async_trait]
impl ChainSource for NodeConnection {
    async fn block_number(&self) -> Result<u64> {
        self.get_block_number().await
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        self.get_logs(filter).await
    }

    async fn receipt(&self, tx_hash: &CryptoHash) -> Result<Option<TxReceipt>> {
        self.get_receipt(tx_hash).await
    }

    async fn watch_mined(&self, tx_hash: &CryptoHash, timeout: Duration) -> Result<Confirmation> {
        let provider = ProviderBuilder::new().on_http(self.rpc_url.parse()?);
        let config = PendingTransactionConfig::new(B256::from(*tx_hash.hash())).with_timeout(Some(timeout));

        match provider.watch_pending_transaction(config).await?.await {
            Ok(_) => Ok(Confirmation::Mined),
            Err(PendingTransactionError::TxWatcher(WatchTxError::Timeout)) => Ok(Confirmation::TimedOut),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn network_info(chain_id: u64) -> NetworkInfo {
    NetworkInfo {
        chain_id,
        name: Chain::from_id(chain_id).named().map(|named| named.to_string()),
    }
}

impl From<&Block> for BlockSummary {
    fn from(block: &Block) -> Self {
        Self {
            number: block.header.number,
            hash: CryptoHash::new(block.header.hash.into()),
            parent_hash: CryptoHash::new(block.header.parent_hash.into()),
            timestamp: block.header.timestamp,
            miner: block.header.beneficiary,
            gas_used: block.header.gas_used,
            gas_limit: block.header.gas_limit,
            transaction_count: block.transactions.len(),
        }
    }
}
