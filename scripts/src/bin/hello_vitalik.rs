use ethlab_common::{load_dotenv, setup_tracing, ModuleClient};
use ethlab_evm::EvmClient;
use ethlab_units::format_ether;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    setup_tracing();

    let evm = EvmClient::setup_connection().await?;
    let client = evm.get_client();

    let vitalik = client.resolve_name("vitalik.eth").await?;
    let balance = client.get_balance(vitalik).await?;
    println!("ETH Balance of vitalik: {} ETH", format_ether(&balance));
    Ok(())
}
