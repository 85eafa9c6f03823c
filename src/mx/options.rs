use std::time::Duration;

/// Knobs applied on top of the system resolver configuration.
#[cfg_attr(feature = "with-config", derive(serde::Deserialize))]
#[cfg_attr(feature = "with-config", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsOptions {
    pub timeout_ms: u64,
    pub attempts: usize,
}

impl Default for DnsOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            attempts: 2,
        }
    }
}

impl DnsOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}
