//! Runtime configuration read from the environment.
//!
//! Layout and polling constants are compile-time values in
//! `telemetry_common::config`. Only what differs between deployments is read
//! here, once at startup:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TELEMETRY_BACKEND_URL` | unset | Robot web interface base URL; unset runs the demo backend |
//! | `TELEMETRY_WINDOW_HEIGHT` | 480 | Window height in pixels |
//! | `TELEMETRY_WINDOW_SCALE` | 1 | Simulator pixel scale |
//! | `TELEMETRY_REQUEST_TIMEOUT_MS` | 2000 | Per-request timeout |

use std::str::FromStr;
use std::time::Duration;

use telemetry_common::config::MIN_WINDOW_HEIGHT;

use crate::error::ConfigError;

pub const DEFAULT_WINDOW_HEIGHT: u32 = 480;
pub const DEFAULT_WINDOW_SCALE: u32 = 1;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2_000;

const BACKEND_URL_VAR: &str = "TELEMETRY_BACKEND_URL";
const WINDOW_HEIGHT_VAR: &str = "TELEMETRY_WINDOW_HEIGHT";
const WINDOW_SCALE_VAR: &str = "TELEMETRY_WINDOW_SCALE";
const REQUEST_TIMEOUT_VAR: &str = "TELEMETRY_REQUEST_TIMEOUT_MS";

const _: () = assert!(DEFAULT_WINDOW_HEIGHT >= MIN_WINDOW_HEIGHT);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// `None` selects the built-in demo backend.
    pub backend_url: Option<String>,
    pub window_height: u32,
    pub window_scale: u32,
    pub request_timeout: Duration,
}

impl HostConfig {
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| std::env::var(key).ok()) }

    /// Build from any key lookup. Unset or blank variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(BACKEND_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty());

        let window_height: u32 = parse_var(&lookup, WINDOW_HEIGHT_VAR, DEFAULT_WINDOW_HEIGHT, "pixel height")?;
        if window_height < MIN_WINDOW_HEIGHT {
            return Err(ConfigError::TooSmall {
                key: WINDOW_HEIGHT_VAR,
                value: u64::from(window_height),
                min: u64::from(MIN_WINDOW_HEIGHT),
            });
        }

        let window_scale: u32 = parse_var(&lookup, WINDOW_SCALE_VAR, DEFAULT_WINDOW_SCALE, "pixel scale")?;
        if window_scale == 0 {
            return Err(ConfigError::TooSmall {
                key: WINDOW_SCALE_VAR,
                value: 0,
                min: 1,
            });
        }

        let timeout_ms: u64 = parse_var(&lookup, REQUEST_TIMEOUT_VAR, DEFAULT_REQUEST_TIMEOUT_MS, "timeout in ms")?;
        if timeout_ms == 0 {
            return Err(ConfigError::TooSmall {
                key: REQUEST_TIMEOUT_VAR,
                value: 0,
                min: 1,
            });
        }

        Ok(Self {
            backend_url,
            window_height,
            window_scale,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            window_height: DEFAULT_WINDOW_HEIGHT,
            window_scale: DEFAULT_WINDOW_SCALE,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

fn parse_var<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
            expected,
        }),
        _ => Ok(default),
    }
}
