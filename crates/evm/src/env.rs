use anyhow::{anyhow, Result};
use ethlab_common::{optional_env_var, required_env_var, EnvVars};

pub struct EvmEnv {
    pub eth_rpc_url: String,
    pub sepolia_rpc_url: Option<String>,
    pub private_key: Option<String>,
}

impl EnvVars for EvmEnv {
    fn load() -> Result<Self> {
        Ok(Self {
            eth_rpc_url: required_env_var("ETH_RPC_URL")?,
            sepolia_rpc_url: optional_env_var("SEPOLIA_RPC_URL"),
            private_key: optional_env_var("PRIVATE_KEY"),
        })
    }

    fn get_env_var(&self, key: &str) -> Result<String> {
        match key {
            "ETH_RPC_URL" => Ok(self.eth_rpc_url.clone()),
            "SEPOLIA_RPC_URL" => self.sepolia_rpc_url.clone().ok_or_else(|| anyhow!("{} is not set", key)),
            "PRIVATE_KEY" => self.private_key.clone().ok_or_else(|| anyhow!("{} is not set", key)),
            _ => Err(anyhow!("Invalid environment variable: {}", key)),
        }
    }
}
