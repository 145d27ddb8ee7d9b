//! Account-specific NetSuite endpoint URLs.

use busbar_ns_auth::account_host;

/// SuiteQL over REST endpoint for an account.
///
/// Example: `1234567_SB1` ->
/// `https://1234567-sb1.suitetalk.api.netsuite.com/services/rest/query/v1/suiteql`
pub fn suiteql_url(account_id: &str) -> String {
    format!(
        "https://{}.suitetalk.api.netsuite.com/services/rest/query/v1/suiteql",
        account_host(account_id)
    )
}

/// REST record service base URL for an account.
pub fn record_url(account_id: &str, path: &str) -> String {
    format!(
        "https://{}.suitetalk.api.netsuite.com/services/rest/record/v1/{}",
        account_host(account_id),
        path.trim_start_matches('/')
    )
}

/// RESTlet URL for a script deployment.
pub fn restlet_url(account_id: &str, script: &str, deploy: &str) -> String {
    format!(
        "https://{}.restlets.api.netsuite.com/app/site/hosting/restlet.nl?script={}&deploy={}",
        account_host(account_id),
        urlencoding::encode(script),
        urlencoding::encode(deploy)
    )
}
