use anyhow::{anyhow, Result};
use ethlab_common::{load_dotenv, setup_tracing};
use ethlab_evm::addresses::mainnet;
use ethlab_evm::{as_amount, AbiSource, Contract, NodeConnection};
use ethlab_units::format_units;

const LOOKBACK_BLOCKS: u64 = 10;

const WETH_ABI: &[&str] = &["event Transfer(address indexed from, address indexed to, uint256 amount)"];

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    setup_tracing();

    let client = NodeConnection::from_env()?;
    let weth = Contract::from_source(mainnet::WETH, AbiSource::HumanReadable(WETH_ABI), client.clone())?;

    println!("\n1. Transfer events in the past {} blocks", LOOKBACK_BLOCKS);
    let head = client.get_block_number().await?;
    println!("current block's height: {}", head);

    let events = weth
        .query_filter("Transfer", head.saturating_sub(LOOKBACK_BLOCKS), head)
        .await?;
    println!("found {} events, first one:", events.len());
    let first = events.first().ok_or_else(|| anyhow!("No Transfer events in the last {} blocks", LOOKBACK_BLOCKS))?;
    println!("{:#?}", first);

    println!("\n2. Parsed event");
    let amount = first
        .arg("amount")
        .and_then(as_amount)
        .ok_or_else(|| anyhow!("Transfer has no uint amount"))?;
    println!(
        "{:?} -> {:?} {} WETH",
        first.address_at(0),
        first.address_at(1),
        format_units(&amount, "ether")?
    );

    Ok(())
}
