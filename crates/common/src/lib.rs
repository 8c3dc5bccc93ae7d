mod client;
mod crypto_hash;
mod env;
mod logging;

pub use client::ModuleClient;
pub use crypto_hash::CryptoHash;
pub use env::{load_dotenv, missing_env_vars, optional_env_var, required_env_var, EnvVars};
pub use logging::setup_tracing;
