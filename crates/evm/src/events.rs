use std::time::Duration;

use alloy_core::dyn_abi::{DynSolValue, EventExt, Specifier};
use alloy_core::json_abi::Event;
use alloy_core::primitives::{keccak256, Address, B256};
use alloy_rpc_types::{Filter, Log};
use anyhow::{anyhow, bail, Result};
use ethlab_common::CryptoHash;
use ethlab_units::BaseAmount;
use tokio::task::JoinHandle;

use crate::source::ChainSource;

const LISTENER_POLL_INTERVAL: Duration = Duration::from_secs(4);
/// Widest block range requested in one poll; a listener behind the head catches up in steps.
const MAX_BLOCKS_PER_POLL: u64 = 2_000;

/// Matches one event of one contract, optionally narrowed on indexed arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    address: Address,
    event: Event,
    topics: Vec<Option<B256>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventArg {
    pub name: String,
    pub value: DynSolValue,
}

/// A decoded log. `args` follow the event's declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub event: String,
    pub address: Address,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<CryptoHash>,
    pub log_index: Option<u64>,
    pub args: Vec<EventArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Continuous,
    Once,
}

/// A background listener. Dropping it leaves the listener running; call `abort`.
pub struct Subscription {
    handle: JoinHandle<Result<()>>,
}

impl EventFilter {
    pub fn new(address: Address, event: Event) -> Self {
        Self { address, event, topics: Vec::new() }
    }

    /// `None` leaves that indexed position open. Values are checked against
    /// the declared parameter types.
    pub fn with_indexed(mut self, values: &[Option<DynSolValue>]) -> Result<Self> {
        let indexed: Vec<_> = self.event.inputs.iter().filter(|input| input.indexed).collect();
        if values.len() > indexed.len() {
            bail!(
                "Event {} has {} indexed arguments, got {} filter values",
                self.event.name,
                indexed.len(),
                values.len()
            );
        }

        let mut topics = Vec::with_capacity(values.len());
        for (param, value) in indexed.iter().zip(values) {
            let topic = match value {
                Some(value) => {
                    let ty = param.resolve()?;
                    if !ty.matches(value) {
                        bail!("Filter value for {} does not match type {}", param.name, param.ty);
                    }
                    Some(topic_for(value))
                }
                None => None,
            };
            topics.push(topic);
        }

        self.topics = topics;
        Ok(self)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn topic0(&self) -> B256 {
        self.event.selector()
    }

    pub fn indexed_topics(&self) -> &[Option<B256>] {
        &self.topics
    }

    pub fn to_rpc_filter(&self, from_block: u64, to_block: u64) -> Filter {
        let mut filter = Filter::new()
            .address(self.address)
            .event_signature(self.topic0())
            .from_block(from_block)
            .to_block(to_block);

        for (position, topic) in self.topics.iter().enumerate() {
            if let Some(topic) = *topic {
                filter = match position {
                    0 => filter.topic1(topic),
                    1 => filter.topic2(topic),
                    _ => filter.topic3(topic),
                };
            }
        }
        filter
    }

    pub fn decode(&self, log: &Log) -> Result<EventRecord> {
        let mut record = self.decode_parts(log.inner.address, log.inner.data.topics(), &log.inner.data.data)?;
        record.block_number = log.block_number;
        record.transaction_hash = log.transaction_hash.map(|hash| CryptoHash::new(hash.into()));
        record.log_index = log.log_index;
        Ok(record)
    }

    pub fn decode_parts(&self, address: Address, topics: &[B256], data: &[u8]) -> Result<EventRecord> {
        if !self.event.anonymous && topics.first() != Some(&self.topic0()) {
            bail!("Log is not a {} event", self.event.name);
        }

        let decoded = self
            .event
            .decode_log_parts(topics.iter().copied(), data, true)?;

        let mut indexed = decoded.indexed.into_iter();
        let mut body = decoded.body.into_iter();
        let args = self
            .event
            .inputs
            .iter()
            .map(|input| {
                let value = if input.indexed { indexed.next() } else { body.next() };
                value
                    .map(|value| EventArg { name: input.name.clone(), value })
                    .ok_or_else(|| anyhow!("Log is missing argument {}", input.name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EventRecord {
            event: self.event.name.clone(),
            address,
            block_number: None,
            transaction_hash: None,
            log_index: None,
            args,
        })
    }
}

/// Static values are their own topic word; dynamic ones are hashed.
fn topic_for(value: &DynSolValue) -> B256 {
    value
        .as_word()
        .unwrap_or_else(|| keccak256(value.abi_encode_packed()))
}

impl EventRecord {
    pub fn arg(&self, name: &str) -> Option<&DynSolValue> {
        self.args.iter().find(|arg| arg.name == name).map(|arg| &arg.value)
    }

    pub fn arg_at(&self, index: usize) -> Option<&DynSolValue> {
        self.args.get(index).map(|arg| &arg.value)
    }

    pub fn address_at(&self, index: usize) -> Option<Address> {
        self.arg_at(index).and_then(DynSolValue::as_address)
    }

    pub fn amount_at(&self, index: usize) -> Option<BaseAmount> {
        self.arg_at(index).and_then(as_amount)
    }
}

pub fn as_amount(value: &DynSolValue) -> Option<BaseAmount> {
    value.as_uint().map(|(value, _)| BaseAmount::from(value))
}

impl Subscription {
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn join(self) -> Result<()> {
        self.handle.await?
    }
}

/// Polls new blocks for logs matching `filter`, starting after the current head.
pub fn subscribe<S, F>(source: S, filter: EventFilter, delivery: Delivery, handler: F) -> Subscription
where
    S: ChainSource,
    F: FnMut(EventRecord) + Send + 'static,
{
    spawn_listener(source, filter, delivery, LISTENER_POLL_INTERVAL, handler)
}

fn spawn_listener<S, F>(
    source: S,
    filter: EventFilter,
    delivery: Delivery,
    poll_interval: Duration,
    mut handler: F,
) -> Subscription
where
    S: ChainSource,
    F: FnMut(EventRecord) + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut last_seen = source.block_number().await?;
        tracing::info!(
            "[Subscription] listening for {} on {} from block {}",
            filter.event().name,
            filter.address(),
            last_seen + 1
        );

        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            ticker.tick().await;

            let head = match source.block_number().await {
                Ok(head) => head,
                Err(e) => {
                    tracing::warn!("[Subscription] failed to read block number: {:?}", e);
                    continue;
                }
            };
            if head <= last_seen {
                continue;
            }

            let from = last_seen + 1;
            let to = head.min(last_seen + MAX_BLOCKS_PER_POLL);
            let logs = match source.logs(&filter.to_rpc_filter(from, to)).await {
                Ok(logs) => logs,
                Err(e) => {
                    tracing::warn!("[Subscription] failed to fetch logs {}..={}: {:?}", from, to, e);
                    continue;
                }
            };

            for log in &logs {
                match filter.decode(log) {
                    Ok(record) => {
                        handler(record);
                        if delivery == Delivery::Once {
                            return Ok::<(), anyhow::Error>(());
                        }
                    }
                    Err(e) => tracing::warn!("[Subscription] skipping undecodable log: {:?}", e),
                }
            }
            last_seen = to;
        }
    });

    Subscription { handle }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::source::scripted::ScriptedChain;
    use alloy_core::primitives::{address, LogData, U256};

    const FROM: Address = address!("28C6c06298d514Db089934071355E5743bf21d60");
    const TO: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
    const TOKEN: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");

    fn transfer_event() -> Event {
        Event::parse("event Transfer(address indexed from, address indexed to, uint256 value)").unwrap()
    }

    fn word(address: Address) -> B256 {
        address.into_word()
    }

    #[test]
    fn topic0_is_the_transfer_selector() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        assert_eq!(
            filter.topic0(),
            alloy_core::primitives::b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
        );
    }

    #[test]
    fn indexed_values_become_topics() {
        let incoming = EventFilter::new(TOKEN, transfer_event())
            .with_indexed(&[None, Some(DynSolValue::Address(TO))])
            .unwrap();
        assert_eq!(incoming.indexed_topics(), &[None, Some(word(TO))]);

        let outgoing = EventFilter::new(TOKEN, transfer_event())
            .with_indexed(&[Some(DynSolValue::Address(FROM))])
            .unwrap();
        assert_eq!(outgoing.indexed_topics(), &[Some(word(FROM))]);
    }

    #[test]
    fn rejects_too_many_or_mistyped_values() {
        let too_many = EventFilter::new(TOKEN, transfer_event()).with_indexed(&[None, None, None]);
        assert!(too_many.is_err());

        let mistyped = EventFilter::new(TOKEN, transfer_event())
            .with_indexed(&[Some(DynSolValue::Bool(true))]);
        assert!(mistyped.is_err());
    }

    #[test]
    fn dynamic_indexed_values_are_hashed() {
        let event = Event::parse("event Named(string indexed name)").unwrap();
        let filter = EventFilter::new(TOKEN, event)
            .with_indexed(&[Some(DynSolValue::String("vitalik".into()))])
            .unwrap();
        assert_eq!(filter.indexed_topics(), &[Some(keccak256("vitalik"))]);
    }

    #[test]
    fn decodes_args_in_declaration_order() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        let topics = [filter.topic0(), word(FROM), word(TO)];
        let data = U256::from(2_500_000u64).to_be_bytes::<32>();

        let record = filter.decode_parts(TOKEN, &topics, &data).unwrap();
        assert_eq!(record.event, "Transfer");
        assert_eq!(record.address_at(0), Some(FROM));
        assert_eq!(record.address_at(1), Some(TO));
        assert_eq!(record.amount_at(2), Some(BaseAmount::from(2_500_000u64)));
        assert_eq!(record.arg("value"), record.arg_at(2));
    }

    #[test]
    fn decode_rejects_foreign_logs() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        let wrong_topic0 = [B256::ZERO, word(FROM), word(TO)];
        assert!(filter.decode_parts(TOKEN, &wrong_topic0, &[0u8; 32]).is_err());
    }

    const FAST_POLL: Duration = Duration::from_millis(1);

    fn transfer_log(filter: &EventFilter, block: u64, value: u64) -> Log {
        let topics = vec![filter.topic0(), word(FROM), word(TO)];
        let data = U256::from(value).to_be_bytes::<32>().to_vec();
        Log {
            inner: alloy_core::primitives::Log {
                address: TOKEN,
                data: LogData::new_unchecked(topics, data.into()),
            },
            block_number: Some(block),
            ..Default::default()
        }
    }

    fn foreign_log(block: u64) -> Log {
        Log {
            inner: alloy_core::primitives::Log {
                address: TOKEN,
                data: LogData::new_unchecked(vec![B256::ZERO], Default::default()),
            },
            block_number: Some(block),
            ..Default::default()
        }
    }

    fn collector() -> (Arc<Mutex<Vec<EventRecord>>>, impl FnMut(EventRecord) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |record: EventRecord| sink.lock().unwrap().push(record))
    }

    async fn wait_for(condition: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !condition() {
                tokio::time::sleep(FAST_POLL).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn once_stops_after_first_record() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        let chain = ScriptedChain::with_heads(&[10, 12]);
        chain.push_logs(vec![transfer_log(&filter, 11, 1), transfer_log(&filter, 12, 2)]);

        let (seen, handler) = collector();
        let subscription = spawn_listener(chain.clone(), filter, Delivery::Once, FAST_POLL, handler);
        tokio::time::timeout(Duration::from_secs(5), subscription.join())
            .await
            .unwrap()
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].amount_at(2), Some(BaseAmount::from(1u64)));
        assert_eq!(chain.requested_ranges(), vec![(11, 12)]);
    }

    #[tokio::test]
    async fn continuous_delivery_advances_past_seen_blocks() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        let chain = ScriptedChain::with_heads(&[10, 12, 12, 15]);
        chain.push_logs(vec![transfer_log(&filter, 12, 1)]);
        chain.push_logs(vec![transfer_log(&filter, 14, 2)]);

        let (seen, handler) = collector();
        let subscription = spawn_listener(chain.clone(), filter, Delivery::Continuous, FAST_POLL, handler);
        wait_for(|| seen.lock().unwrap().len() == 2).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        subscription.abort();

        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(chain.requested_ranges(), vec![(11, 12), (13, 15)]);
    }

    #[tokio::test]
    async fn undecodable_logs_are_skipped() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        let chain = ScriptedChain::with_heads(&[10, 11]);
        chain.push_logs(vec![foreign_log(11), transfer_log(&filter, 11, 7)]);

        let (seen, handler) = collector();
        let subscription = spawn_listener(chain, filter, Delivery::Once, FAST_POLL, handler);
        tokio::time::timeout(Duration::from_secs(5), subscription.join())
            .await
            .unwrap()
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].amount_at(2), Some(BaseAmount::from(7u64)));
    }

    #[tokio::test]
    async fn failed_fetch_retries_the_same_range() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        let chain = ScriptedChain::with_heads(&[10, 12]);
        chain.push_logs_error("connection reset");
        chain.push_logs(vec![transfer_log(&filter, 12, 3)]);

        let (seen, handler) = collector();
        let subscription = spawn_listener(chain.clone(), filter, Delivery::Once, FAST_POLL, handler);
        tokio::time::timeout(Duration::from_secs(5), subscription.join())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(chain.requested_ranges(), vec![(11, 12), (11, 12)]);
    }

    #[tokio::test]
    async fn long_gaps_are_fetched_in_bounded_steps() {
        let filter = EventFilter::new(TOKEN, transfer_event());
        let chain = ScriptedChain::with_heads(&[0, 5_000]);

        let (_seen, handler) = collector();
        let subscription = spawn_listener(chain.clone(), filter, Delivery::Continuous, FAST_POLL, handler);
        wait_for(|| chain.requested_ranges().len() >= 3).await;
        subscription.abort();

        let ranges = chain.requested_ranges();
        assert_eq!(ranges[0], (1, MAX_BLOCKS_PER_POLL));
        assert_eq!(ranges[1], (MAX_BLOCKS_PER_POLL + 1, 2 * MAX_BLOCKS_PER_POLL));
        assert_eq!(ranges[2], (2 * MAX_BLOCKS_PER_POLL + 1, 5_000));
    }
}
