use busbar_ns_api::{ClientConfig, NetSuiteClient, NetSuiteCredentials, SuiteQlClient};

pub const ACCOUNT_ID: &str = "1234567_SB1";

pub fn credentials() -> NetSuiteCredentials {
    NetSuiteCredentials::new(
        ACCOUNT_ID,
        "consumer_key_abc",
        "consumer_secret_abc",
        "token_id_abc",
        "token_secret_abc",
    )
    .expect("test credentials are complete")
}

fn quiet_config() -> ClientConfig {
    ClientConfig::builder().with_tracing(false).build()
}

pub fn rest_client() -> NetSuiteClient {
    NetSuiteClient::with_config(credentials(), quiet_config()).expect("client builds")
}

pub fn suiteql_client(endpoint: &str) -> SuiteQlClient {
    SuiteQlClient::with_config(credentials(), quiet_config())
        .expect("client builds")
        .with_endpoint(endpoint)
}

/// Credentials for tests against a real account.
pub fn live_credentials() -> NetSuiteCredentials {
    NetSuiteCredentials::from_env().unwrap_or_else(|e| {
        panic!(
            "\n\nLive tests need NETSUITE_ACCOUNT_ID, NETSUITE_CONSUMER_KEY, \
             NETSUITE_CONSUMER_SECRET, NETSUITE_TOKEN_ID and NETSUITE_TOKEN_SECRET.\n{e}\n\n"
        )
    })
}
