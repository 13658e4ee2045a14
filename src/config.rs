//! App Configuration
//!
//! Values baked in at build time through `ASPIRE_*` environment variables.
//! Missing or unparseable values fall back to defaults with a warning.

use std::str::FromStr;
use std::time::Duration;

use portal_core::TrackerConfig;
use tracing::{warn, Level};

pub const DEFAULT_API_BASE: &str = "https://aspirecareerconsultancy.store";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin without a trailing slash
    pub api_base: String,
    pub cloudinary_cloud: Option<String>,
    pub cloudinary_preset: Option<String>,
    pub tracker: TrackerConfig,
}

/// Raw build-time variables
#[derive(Debug, Default, Clone, Copy)]
struct Vars<'a> {
    api_base: Option<&'a str>,
    cloud: Option<&'a str>,
    preset: Option<&'a str>,
    poll_secs: Option<&'a str>,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_vars(Vars {
            api_base: option_env!("ASPIRE_API_BASE_URL"),
            cloud: option_env!("ASPIRE_CLOUDINARY_CLOUD_NAME"),
            preset: option_env!("ASPIRE_CLOUDINARY_UPLOAD_PRESET"),
            poll_secs: option_env!("ASPIRE_POLL_SECS"),
        })
    }

    /// Read before the logger exists, so it cannot warn
    pub fn log_level() -> Level {
        parse_level(option_env!("ASPIRE_LOG_LEVEL"))
    }

    fn from_vars(vars: Vars<'_>) -> Self {
        let api_base = non_empty(vars.api_base)
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let mut tracker = TrackerConfig::default();
        if let Some(raw) = non_empty(vars.poll_secs) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => tracker = tracker.with_poll_interval(Duration::from_secs(secs)),
                _ => warn!(value = raw, "ignoring invalid ASPIRE_POLL_SECS"),
            }
        }

        let cloudinary_cloud = non_empty(vars.cloud).map(str::to_string);
        let cloudinary_preset = non_empty(vars.preset).map(str::to_string);
        if cloudinary_cloud.is_none() || cloudinary_preset.is_none() {
            warn!("image host is not configured, document uploads will fail");
        }

        Self {
            api_base,
            cloudinary_cloud,
            cloudinary_preset,
            tracker,
        }
    }

    /// Unsigned upload endpoint of the image host
    pub fn upload_endpoint(&self) -> Option<String> {
        self.cloudinary_cloud
            .as_deref()
            .map(|cloud| format!("https://api.cloudinary.com/v1_1/{cloud}/image/upload"))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_level(value: Option<&str>) -> Level {
    non_empty(value)
        .and_then(|raw| Level::from_str(raw).ok())
        .unwrap_or(Level::INFO)
}
