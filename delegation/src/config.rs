use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings of an [`crate::client::Eip712Client`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Chain the signatures will be submitted to.
    pub chain_id: u64,
    /// Upper bound on each call to the contract or the key signer, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl ClientConfig {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id, request_timeout_ms: None }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_timeout() {
        let config: ClientConfig = serde_json::from_str(r#"{"chainId":901}"#).unwrap();
        assert_eq!(config, ClientConfig::new(901));
        assert_eq!(config.request_timeout(), None);

        let config: ClientConfig =
            serde_json::from_str(r#"{"chainId":1,"requestTimeoutMs":5000}"#).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn sub_second_timeouts_are_kept() {
        let config = ClientConfig::new(901).with_timeout(Duration::from_millis(500));
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(500)));
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"chainId":901,"requestTimeoutMs":500}"#
        );
    }
}
