use anyhow::Result;
use ethlab_common::{define_module_client, ModuleClient};

#[derive(Debug)]
pub struct Endpoint {
    url: String,
}

async fn connect(var: &str) -> Result<Endpoint> {
    Ok(Endpoint { url: ethlab_common::required_env_var(var)? })
}

define_module_client! {
    (struct PresentClient, "present")
    client_type: Endpoint,
    env: ["ETHLAB_MODULE_TEST_URL"],
    setup: connect("ETHLAB_MODULE_TEST_URL")
}

define_module_client! {
    (struct MissingClient, "missing")
    client_type: Endpoint,
    env: ["ETHLAB_MODULE_TEST_NEVER_SET"],
    setup: connect("ETHLAB_MODULE_TEST_NEVER_SET")
}

#[tokio::test]
async fn test_setup_connection_reads_env() -> Result<()> {
    std::env::set_var("ETHLAB_MODULE_TEST_URL", "http://127.0.0.1:8545");

    assert!(PresentClient::validate_env());
    let client = PresentClient::setup_connection().await?;
    assert_eq!(client.get_client().url, "http://127.0.0.1:8545");
    assert_eq!(PresentClient::NAME, "present");

    let cloned = client.clone();
    assert_eq!(cloned.get_client().url, client.get_client().url);
    Ok(())
}

#[tokio::test]
async fn test_setup_connection_fails_without_env() {
    assert!(!MissingClient::validate_env());
    let err = MissingClient::setup_connection().await.err().unwrap();
    assert!(err.to_string().contains("[Client: missing]"));
}
