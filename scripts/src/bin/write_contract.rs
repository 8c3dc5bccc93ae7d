use anyhow::{anyhow, Result};
use ethlab_common::{load_dotenv, optional_env_var, required_env_var, setup_tracing};
use ethlab_evm::addresses::sepolia;
use ethlab_evm::{as_amount, AbiSource, Contract, DynSolValue, LocalWallet, NodeConnection, U256};
use ethlab_units::{format_ether, parse_ether, BaseAmount};

const WETH_ABI: &[&str] = &[
    "function balanceOf(address) view returns (uint256)",
    "function deposit() payable",
    "function transfer(address, uint256) returns (bool)",
    "function withdraw(uint256)",
];

async fn weth_balance(contract: &Contract, holder: DynSolValue) -> Result<BaseAmount> {
    let value = contract.call_one("balanceOf", &[holder]).await?;
    as_amount(&value).ok_or_else(|| anyhow!("balanceOf did not return a uint"))
}

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    setup_tracing();

    let rpc_url = optional_env_var("SEPOLIA_RPC_URL").ok_or_else(|| anyhow!("SEPOLIA_RPC_URL is not set"))?;
    let client = NodeConnection::new(rpc_url)?;
    let wallet = LocalWallet::from_hex(&required_env_var("PRIVATE_KEY")?)?;
    let me = DynSolValue::Address(wallet.eth_address());

    let weth_contract = Contract::from_source(sepolia::WETH, AbiSource::HumanReadable(WETH_ABI), client.clone())?;
    let weth_contract = weth_contract.connect(wallet.clone());

    println!("\n1. Read WETH balance");
    let before = weth_balance(&weth_contract, me.clone()).await?;
    println!("WETH holdings before deposit: {}", format_ether(&before));

    let eth_balance = client.get_balance(wallet.eth_address()).await?;
    if eth_balance <= parse_ether("0.0015")? {
        println!("Not enough ETH ({}), get some Sepolia ETH from a faucet first", format_ether(&eth_balance));
        println!("1. chainlink faucet: https://faucets.chain.link");
        return Ok(());
    }

    let amount = parse_ether("0.001")?.to_u256()?;

    println!("\n2. Call deposit() with 0.001 ETH");
    let pending = weth_contract.send("deposit", &[], amount).await?;
    let receipt = pending.wait().await?;
    println!("Transaction details: {:?}", receipt);
    let after_deposit = weth_balance(&weth_contract, me.clone()).await?;
    println!("WETH position after deposit: {}", format_ether(&after_deposit));

    println!("\n3. Call transfer() to send 0.001 WETH to vitalik.eth");
    // sepolia has its own ENS registry at the same address
    let vitalik = client.resolve_name("vitalik.eth").await?;
    let pending = weth_contract
        .send(
            "transfer",
            &[DynSolValue::Address(vitalik), DynSolValue::Uint(amount, 256)],
            U256::ZERO,
        )
        .await?;
    pending.wait().await?;
    let after_transfer = weth_balance(&weth_contract, me).await?;
    println!("WETH holdings after transfer: {}", format_ether(&after_transfer));

    Ok(())
}
