use anyhow::Result;
use ethlab_common::{load_dotenv, setup_tracing};
use ethlab_evm::addresses::mainnet;
use ethlab_evm::{AbiSource, Contract, EventRecord, NodeConnection};
use ethlab_units::format_units;

const USDT_ABI: &[&str] = &["event Transfer(address indexed from, address indexed to, uint256 value)"];

fn print_transfer(record: &EventRecord) {
    let (Some(from), Some(to), Some(value)) = (record.address_at(0), record.address_at(1), record.amount_at(2)) else {
        tracing::warn!("[monitor_events] unexpected Transfer shape: {:?}", record.args);
        return;
    };
    match format_units(&value, 6) {
        Ok(value) => println!("{} -> {} {}", from, to, value),
        Err(e) => tracing::warn!("[monitor_events] cannot format {}: {}", value, e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    setup_tracing();

    let client = NodeConnection::from_env()?;
    let usdt = Contract::from_source(mainnet::USDT, AbiSource::HumanReadable(USDT_ABI), client)?;
    let transfers = usdt.filter("Transfer", &[])?;

    println!("\n1. contract.once(): a single Transfer event");
    usdt.once(transfers.clone(), |record| print_transfer(&record)).join().await?;

    println!("\n2. contract.on(): every Transfer event until ctrl-c");
    let continuous = usdt.on(transfers, |record| print_transfer(&record));

    tokio::signal::ctrl_c().await?;
    continuous.abort();
    Ok(())
}
