//! Shared HTTP client construction.
//!
//! Every outbound client in this crate is built here so all of them share
//! the same contract: gzip decompression, system proxy honored, a bounded
//! connection-pool lifetime, a fixed identifying User-Agent, and a
//! per-client request timeout.

use std::time::Duration;

use reqwest::Client;

/// Idle pooled connections are retired after this interval.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

const USER_AGENT: &str = concat!("deskglance-feeds/", env!("CARGO_PKG_VERSION"));

/// Build a client with the crate-wide defaults and the given timeout.
///
/// `accept_invalid_certs` disables TLS peer verification; the quote tiers
/// run behind intercepting proxies and firewalls in the deployment
/// environment and opt in, the dataset client does not.
pub(crate) fn build_client(timeout: Duration, accept_invalid_certs: bool) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .gzip(true)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .expect("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client() {
        let _strict = build_client(Duration::from_secs(1), false);
        let _lenient = build_client(Duration::from_secs(1), true);
    }
}
