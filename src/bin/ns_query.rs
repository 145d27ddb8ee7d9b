//! Run one SuiteQL statement through the REST query service.
//!
//! Credentials come from the environment; the result is printed as JSON.
//!
//! ```sh
//! export NETSUITE_ACCOUNT_ID=1234567_SB1
//! export NETSUITE_CONSUMER_KEY=...
//! export NETSUITE_CONSUMER_SECRET=...
//! export NETSUITE_TOKEN_ID=...
//! export NETSUITE_TOKEN_SECRET=...
//! cargo run --bin ns-query -- "SELECT id, companyname FROM customer"
//! ```
//!
//! With no arguments the statement is read from stdin. Set `RUST_LOG=debug`
//! for request logging.

use std::io::Read;

use busbar_ns_auth::NetSuiteCredentials;
use busbar_ns_rest::SuiteQlClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let sql = if args.is_empty() {
        let mut buf = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
            eprintln!("Error: Failed to read SQL from stdin: {e}");
            std::process::exit(2);
        }
        buf.trim().to_string()
    } else {
        args.join(" ")
    };

    let creds = NetSuiteCredentials::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    });

    let client = SuiteQlClient::new(creds).unwrap_or_else(|e| {
        eprintln!("Error: Failed to create client: {e}");
        std::process::exit(2);
    });

    let result = client.query(&sql).await;
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: Failed to encode result: {e}");
            std::process::exit(1);
        }
    }

    if !result.is_success() {
        std::process::exit(1);
    }
}
