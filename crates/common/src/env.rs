use std::env;

use anyhow::{anyhow, Result};

/// A group of environment variables loaded together at startup.
pub trait EnvVars: Sized {
    fn load() -> Result<Self>;
    fn get_env_var(&self, key: &str) -> Result<String>;
}

/// Reads `.env` from the working directory if there is one.
pub fn load_dotenv() {
    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("[load_dotenv] loaded {}", path.display());
    }
}

pub fn required_env_var(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!("{} is not set", key)),
    }
}

pub fn optional_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn missing_env_vars<'a>(keys: &[&'a str]) -> Vec<&'a str> {
    keys.iter()
        .copied()
        .filter(|key| optional_env_var(key).is_none())
        .collect()
}
