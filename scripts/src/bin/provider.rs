use ethlab_common::{load_dotenv, setup_tracing, EnvVars};
use ethlab_evm::addresses::{mainnet, VITALIK};
use ethlab_evm::{AddressOrName, EvmEnv, NodeConnection};
use ethlab_units::{format_ether, format_units_trimmed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    setup_tracing();

    let env = EvmEnv::load()?;
    let eth = NodeConnection::new(env.get_env_var("ETH_RPC_URL")?)?;
    let vitalik: AddressOrName = "vitalik.eth".parse()?;

    println!("\n1. Vitalik's ETH balance on mainnet and Sepolia");
    let balance = eth.get_balance(eth.resolve(&vitalik).await?).await?;
    println!("ETH Balance of vitalik: {} ETH", format_ether(&balance));
    match env.sepolia_rpc_url.as_deref() {
        Some(url) => {
            let sepolia = NodeConnection::new(url)?;
            let balance = sepolia.get_balance(VITALIK).await?;
            println!("Sepolia ETH Balance of vitalik: {} ETH", format_ether(&balance));
        }
        None => tracing::warn!("[provider] SEPOLIA_RPC_URL is not set, skipping the Sepolia balance"),
    }

    println!("\n2. Network");
    let network = eth.get_network().await?;
    println!("{}", serde_json::to_string_pretty(&network)?);

    println!("\n3. Block height");
    println!("{}", eth.get_block_number().await?);

    println!("\n4. Transactions sent by vitalik");
    println!("{}", eth.get_transaction_count(eth.resolve(&vitalik).await?).await?);

    println!("\n5. Gas price");
    let gas_price = eth.get_gas_price().await?;
    println!("{} gwei", format_units_trimmed(&gas_price, "gwei")?);

    println!("\n6. Block 0");
    let genesis = eth.get_block(0).await?;
    println!("{}", serde_json::to_string_pretty(&genesis)?);

    println!("\n7. WETH bytecode");
    let code = eth.get_code(mainnet::WETH).await?;
    println!("{} bytes: {}", code.len(), code);

    Ok(())
}
