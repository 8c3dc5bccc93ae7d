use anyhow::{anyhow, Result};
use ethlab_common::{load_dotenv, setup_tracing};
use ethlab_evm::addresses::mainnet;
use ethlab_evm::{as_amount, AbiSource, Contract, DynSolValue, EventRecord, NodeConnection};
use ethlab_units::format_units;

const USDT_DECIMALS: u8 = 6;

const USDT_ABI: &[&str] = &[
    "event Transfer(address indexed from, address indexed to, uint256 value)",
    "function balanceOf(address) view returns (uint256)",
];

fn print_transfer(heading: &str, record: &EventRecord) {
    println!("--------- {} --------", heading);
    match (record.address_at(0), record.address_at(1), record.amount_at(2)) {
        (Some(from), Some(to), Some(value)) => {
            let value = format_units(&value, USDT_DECIMALS).unwrap_or_else(|e| e.to_string());
            println!("{} -> {} {}", from, to, value);
        }
        _ => tracing::warn!("[event_filter] unexpected Transfer shape: {:?}", record.args),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    setup_tracing();

    let client = NodeConnection::from_env()?;
    let usdt = Contract::from_source(mainnet::USDT, AbiSource::HumanReadable(USDT_ABI), client)?;
    let exchange = DynSolValue::Address(mainnet::BINANCE_HOT_WALLET);

    println!("\n1. USDT balance of the Binance hot wallet");
    let balance = usdt.call_one("balanceOf", &[exchange.clone()]).await?;
    let balance = as_amount(&balance).ok_or_else(|| anyhow!("balanceOf did not return a uint"))?;
    println!("USDT Balance: {}\n", format_units(&balance, USDT_DECIMALS)?);

    println!("\n2. Filter for USDT transferred into the exchange");
    let incoming = usdt.filter("Transfer", &[None, Some(exchange.clone())])?;
    println!("Filter Details: {:#?}", incoming.indexed_topics());
    let incoming = usdt.on(incoming, |record| print_transfer("USDT transferred into the exchange", &record));

    println!("\n3. Filter for USDT transferred out of the exchange");
    let outgoing = usdt.filter("Transfer", &[Some(exchange)])?;
    println!("Filter Details: {:#?}", outgoing.indexed_topics());
    let outgoing = usdt.on(outgoing, |record| print_transfer("USDT transferred out of the exchange", &record));

    tokio::signal::ctrl_c().await?;
    incoming.abort();
    outgoing.abort();
    Ok(())
}
