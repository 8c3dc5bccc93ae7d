use std::sync::Arc;

use alloy_core::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_core::json_abi::{Constructor, Error as AbiError, Event, Function, JsonAbi};
use alloy_core::primitives::{Address, Bytes, U256};
use anyhow::{anyhow, bail, Context, Result};

use crate::calls::RawTransaction;
use crate::client::{NodeConnection, PendingTx};
use crate::events::{subscribe, Delivery, EventFilter, EventRecord, Subscription};
use crate::wallet::LocalWallet;

/// Where a contract interface comes from.
#[derive(Debug, Clone, Copy)]
pub enum AbiSource<'a> {
    /// A full JSON ABI as emitted by solc or served by a block explorer.
    Json(&'a str),
    /// Solidity-style declarations, one per entry: `"function balanceOf(address) view returns (uint256)"`.
    HumanReadable(&'a [&'a str]),
}

pub fn parse_abi(source: AbiSource<'_>) -> Result<JsonAbi> {
    match source {
        AbiSource::Json(json) => serde_json::from_str(json).context("Invalid JSON ABI"),
        AbiSource::HumanReadable(lines) => {
            let mut abi = JsonAbi::new();
            for line in lines.iter().map(|line| line.trim()) {
                if line.starts_with("event ") {
                    let event = Event::parse(line).map_err(|e| anyhow!("Invalid event {:?}: {}", line, e))?;
                    abi.events.entry(event.name.clone()).or_default().push(event);
                } else if line.starts_with("error ") {
                    let error = AbiError::parse(line).map_err(|e| anyhow!("Invalid error {:?}: {}", line, e))?;
                    abi.errors.entry(error.name.clone()).or_default().push(error);
                } else if line.starts_with("constructor") {
                    let constructor = Constructor::parse(line).map_err(|e| anyhow!("Invalid constructor {:?}: {}", line, e))?;
                    abi.constructor = Some(constructor);
                } else {
                    let function = Function::parse(line).map_err(|e| anyhow!("Invalid function {:?}: {}", line, e))?;
                    abi.functions.entry(function.name.clone()).or_default().push(function);
                }
            }
            Ok(abi)
        }
    }
}

/// A deployed contract reached through its ABI. Read-only until a wallet is attached.
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    abi: Arc<JsonAbi>,
    client: NodeConnection,
    wallet: Option<LocalWallet>,
}

impl Contract {
    pub fn new(address: Address, abi: JsonAbi, client: NodeConnection) -> Self {
        Self { address, abi: Arc::new(abi), client, wallet: None }
    }

    pub fn from_source(address: Address, source: AbiSource<'_>, client: NodeConnection) -> Result<Self> {
        Ok(Self::new(address, parse_abi(source)?, client))
    }

    pub fn connect(&self, wallet: LocalWallet) -> Self {
        Self { wallet: Some(wallet), ..self.clone() }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    pub fn function(&self, name: &str) -> Result<&Function> {
        match self.abi.function(name).map(Vec::as_slice) {
            Some([function]) => Ok(function),
            Some([]) | None => Err(anyhow!("Contract {} has no function {}", self.address, name)),
            Some(overloads) => Err(anyhow!(
                "Function {} is overloaded {} times; call it by full signature",
                name,
                overloads.len()
            )),
        }
    }

    pub fn event(&self, name: &str) -> Result<&Event> {
        match self.abi.event(name).map(Vec::as_slice) {
            Some([event]) => Ok(event),
            Some([]) | None => Err(anyhow!("Contract {} has no event {}", self.address, name)),
            Some(_) => Err(anyhow!("Event {} is overloaded", name)),
        }
    }

    pub fn build_transaction(&self, name: &str, args: &[DynSolValue], value: U256) -> Result<RawTransaction> {
        let function = self.function(name)?;
        let data = function
            .abi_encode_input(args)
            .with_context(|| format!("Bad arguments for {}", function.signature()))?;

        Ok(RawTransaction {
            to: self.address,
            value,
            data: Bytes::from(data),
        })
    }

    pub fn decode_output(&self, name: &str, data: &[u8]) -> Result<Vec<DynSolValue>> {
        let function = self.function(name)?;
        function
            .abi_decode_output(data, true)
            .with_context(|| format!("Could not decode output of {}", function.signature()))
    }

    /// `eth_call` against the latest block.
    pub async fn call(&self, name: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        let tx = self.build_transaction(name, args, U256::ZERO)?;
        let output = self.client.call(tx).await?;
        self.decode_output(name, &output)
    }

    /// Like `call`, for methods with exactly one return value.
    pub async fn call_one(&self, name: &str, args: &[DynSolValue]) -> Result<DynSolValue> {
        let mut values = self.call(name, args).await?;
        if values.len() != 1 {
            bail!("{} returned {} values, expected 1", name, values.len());
        }
        Ok(values.remove(0))
    }

    pub async fn send(&self, name: &str, args: &[DynSolValue], value: U256) -> Result<PendingTx> {
        let wallet = self
            .wallet
            .as_ref()
            .ok_or_else(|| anyhow!("Contract {} is read-only; connect a wallet before calling {}", self.address, name))?;

        let tx = self.build_transaction(name, args, value)?;
        let request = tx.into_request().from(wallet.eth_address());
        self.client.send_transaction(request, wallet).await
    }

    /// `None` entries leave that indexed argument unconstrained.
    pub fn filter(&self, event: &str, indexed: &[Option<DynSolValue>]) -> Result<EventFilter> {
        EventFilter::new(self.address, self.event(event)?.clone()).with_indexed(indexed)
    }

    pub async fn query(&self, filter: &EventFilter, from_block: u64, to_block: u64) -> Result<Vec<EventRecord>> {
        if from_block > to_block {
            bail!("Empty block range {}..={}", from_block, to_block);
        }

        let logs = self.client.get_logs(&filter.to_rpc_filter(from_block, to_block)).await?;
        tracing::debug!(
            "[Contract::query] {} {} logs in {}..={}",
            logs.len(),
            filter.event().name,
            from_block,
            to_block
        );
        logs.iter().map(|log| filter.decode(log)).collect()
    }

    pub async fn query_filter(&self, event: &str, from_block: u64, to_block: u64) -> Result<Vec<EventRecord>> {
        let filter = self.filter(event, &[])?;
        self.query(&filter, from_block, to_block).await
    }

    pub fn on<F>(&self, filter: EventFilter, handler: F) -> Subscription
    where
        F: FnMut(EventRecord) + Send + 'static,
    {
        subscribe(self.client.clone(), filter, Delivery::Continuous, handler)
    }

    pub fn once<F>(&self, filter: EventFilter, handler: F) -> Subscription
    where
        F: FnMut(EventRecord) + Send + 'static,
    {
        subscribe(self.client.clone(), filter, Delivery::Once, handler)
    }
}
