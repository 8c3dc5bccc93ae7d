use anyhow::{anyhow, Result};
use ethlab_common::{load_dotenv, setup_tracing};
use ethlab_evm::addresses::mainnet;
use ethlab_evm::{as_amount, AbiSource, Contract, DynSolValue, NodeConnection};
use ethlab_units::format_ether;

const WETH_ABI: &str = r#"[
    {"constant":true,"inputs":[],"name":"name","outputs":[{"name":"","type":"string"}],"payable":false,"stateMutability":"view","type":"function"},
    {"constant":false,"inputs":[{"name":"guy","type":"address"},{"name":"wad","type":"uint256"}],"name":"approve","outputs":[{"name":"","type":"bool"}],"payable":false,"stateMutability":"nonpayable","type":"function"},
    {"constant":true,"inputs":[],"name":"totalSupply","outputs":[{"name":"","type":"uint256"}],"payable":false,"stateMutability":"view","type":"function"},
    {"constant":false,"inputs":[{"name":"src","type":"address"},{"name":"dst","type":"address"},{"name":"wad","type":"uint256"}],"name":"transferFrom","outputs":[{"name":"","type":"bool"}],"payable":false,"stateMutability":"nonpayable","type":"function"},
    {"constant":false,"inputs":[{"name":"wad","type":"uint256"}],"name":"withdraw","outputs":[],"payable":false,"stateMutability":"nonpayable","type":"function"},
    {"constant":true,"inputs":[],"name":"decimals","outputs":[{"name":"","type":"uint8"}],"payable":false,"stateMutability":"view","type":"function"},
    {"constant":true,"inputs":[{"name":"","type":"address"}],"name":"balanceOf","outputs":[{"name":"","type":"uint256"}],"payable":false,"stateMutability":"view","type":"function"},
    {"constant":true,"inputs":[],"name":"symbol","outputs":[{"name":"","type":"string"}],"payable":false,"stateMutability":"view","type":"function"},
    {"constant":false,"inputs":[{"name":"dst","type":"address"},{"name":"wad","type":"uint256"}],"name":"transfer","outputs":[{"name":"","type":"bool"}],"payable":false,"stateMutability":"nonpayable","type":"function"},
    {"constant":false,"inputs":[],"name":"deposit","outputs":[],"payable":true,"stateMutability":"payable","type":"function"},
    {"constant":true,"inputs":[{"name":"","type":"address"},{"name":"","type":"address"}],"name":"allowance","outputs":[{"name":"","type":"uint256"}],"payable":false,"stateMutability":"view","type":"function"},
    {"payable":true,"stateMutability":"payable","type":"fallback"},
    {"anonymous":false,"inputs":[{"indexed":true,"name":"src","type":"address"},{"indexed":true,"name":"guy","type":"address"},{"indexed":false,"name":"wad","type":"uint256"}],"name":"Approval","type":"event"},
    {"anonymous":false,"inputs":[{"indexed":true,"name":"src","type":"address"},{"indexed":true,"name":"dst","type":"address"},{"indexed":false,"name":"wad","type":"uint256"}],"name":"Transfer","type":"event"},
    {"anonymous":false,"inputs":[{"indexed":true,"name":"dst","type":"address"},{"indexed":false,"name":"wad","type":"uint256"}],"name":"Deposit","type":"event"},
    {"anonymous":false,"inputs":[{"indexed":true,"name":"src","type":"address"},{"indexed":false,"name":"wad","type":"uint256"}],"name":"Withdrawal","type":"event"}
]"#;

const ERC20_ABI: &[&str] = &[
    "function name() view returns (string)",
    "function symbol() view returns (string)",
    "function totalSupply() view returns (uint256)",
    "function balanceOf(address) view returns (uint256)",
];

async fn call_string(contract: &Contract, method: &str) -> Result<String> {
    let value = contract.call_one(method, &[]).await?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{} did not return a string", method))
}

async fn call_amount(contract: &Contract, method: &str, args: &[DynSolValue]) -> Result<String> {
    let value = contract.call_one(method, args).await?;
    let amount = as_amount(&value).ok_or_else(|| anyhow!("{} did not return a uint", method))?;
    Ok(format_ether(&amount))
}

async fn describe(title: &str, contract: &Contract, holder: DynSolValue) -> Result<()> {
    println!("\n{}", title);
    println!("Contract Address: {}", contract.address());
    println!("name: {}", call_string(contract, "name").await?);
    println!("symbol: {}", call_string(contract, "symbol").await?);
    println!("total Supply: {}", call_amount(contract, "totalSupply", &[]).await?);
    println!("Vitalik holds: {}", call_amount(contract, "balanceOf", &[holder]).await?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    setup_tracing();

    let client = NodeConnection::from_env()?;
    let vitalik = DynSolValue::Address(client.resolve_name("vitalik.eth").await?);

    let weth = Contract::from_source(mainnet::WETH, AbiSource::Json(WETH_ABI), client.clone())?;
    describe("1. WETH contract (full JSON ABI)", &weth, vitalik.clone()).await?;

    let dai = Contract::from_source(mainnet::DAI, AbiSource::HumanReadable(ERC20_ABI), client)?;
    describe("2. DAI contract (human-readable ABI)", &dai, vitalik).await?;

    Ok(())
}
