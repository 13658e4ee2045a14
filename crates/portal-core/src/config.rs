//! Tracker Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Size of the data-entry workload every user has to fill.
pub const DEFAULT_QUOTA_TOTAL: u32 = 700;

/// Knobs for the quota tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Number of quota items in the workload
    pub total: u32,
    /// Interval between background progress refreshes
    #[serde(with = "duration_secs")]
    pub poll_interval: Duration,
    /// Upper bound on a single submission round trip
    #[serde(with = "duration_secs")]
    pub submit_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            total: DEFAULT_QUOTA_TOTAL,
            poll_interval: Duration::from_secs(30),
            submit_timeout: Duration::from_secs(20),
        }
    }
}

impl TrackerConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_workload() {
        let config = TrackerConfig::default();
        assert_eq!(config.total, 700);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TrackerConfig = serde_json::from_str(r#"{"poll_interval": 5}"#).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.total, DEFAULT_QUOTA_TOTAL);
        assert_eq!(config.submit_timeout, Duration::from_secs(20));
    }
}
