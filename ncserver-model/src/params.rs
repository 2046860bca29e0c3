//! Transport and call-home parameters with their documented defaults.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listener-wide idle timeout, seconds.
pub const DEFAULT_IDLE_TIMEOUT: u16 = 3600;

/// TCP keepalive idle time, seconds.
pub const DEFAULT_IDLE_TIME: u16 = 1;
/// TCP keepalive probe count.
pub const DEFAULT_MAX_PROBES: u16 = 10;
/// TCP keepalive probe interval, seconds.
pub const DEFAULT_PROBE_INTERVAL: u16 = 5;

/// SSH authentication timeout, seconds.
pub const DEFAULT_AUTH_TIMEOUT: u16 = 30;
/// SSH authentication attempts.
pub const DEFAULT_AUTH_ATTEMPTS: u8 = 3;

/// Periodic call-home period, minutes.
pub const DEFAULT_PERIOD: u16 = 60;
/// Periodic call-home anchor time, epoch seconds.
pub const DEFAULT_ANCHOR_TIME: i64 = 0;
/// Periodic call-home idle timeout, seconds.
pub const DEFAULT_PERIODIC_IDLE_TIMEOUT: u16 = 120;

/// Call-home reconnect attempts per endpoint.
pub const DEFAULT_RECONNECT_MAX_ATTEMPTS: u8 = 3;

/// Transport an endpoint is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Ssh,
}

/// TCP keepalive parameters of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepaliveParams {
    pub idle_time: u16,
    pub max_probes: u16,
    pub probe_interval: u16,
}

impl Default for KeepaliveParams {
    fn default() -> Self {
        Self {
            idle_time: DEFAULT_IDLE_TIME,
            max_probes: DEFAULT_MAX_PROBES,
            probe_interval: DEFAULT_PROBE_INTERVAL,
        }
    }
}

impl KeepaliveParams {
    /// Applies the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: KeepaliveUpdate) {
        if let Some(v) = update.idle_time {
            self.idle_time = v;
        }
        if let Some(v) = update.max_probes {
            self.max_probes = v;
        }
        if let Some(v) = update.probe_interval {
            self.probe_interval = v;
        }
    }
}

/// A partial keepalive update: `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepaliveUpdate {
    pub idle_time: Option<u16>,
    pub max_probes: Option<u16>,
    pub probe_interval: Option<u16>,
}

impl KeepaliveUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.idle_time.is_none() && self.max_probes.is_none() && self.probe_interval.is_none()
    }
}

/// SSH-layer authentication limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthLimits {
    pub max_wait: u16,
    pub max_attempts: u8,
}

impl Default for AuthLimits {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_AUTH_TIMEOUT,
            max_attempts: DEFAULT_AUTH_ATTEMPTS,
        }
    }
}

/// How a call-home client keeps its connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Persistent,
    Periodic,
}

/// Parameters of a periodic call-home connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicParams {
    pub period: u16,
    pub anchor_time: i64,
    pub idle_timeout: u16,
}

impl Default for PeriodicParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            anchor_time: DEFAULT_ANCHOR_TIME,
            idle_timeout: DEFAULT_PERIODIC_IDLE_TIMEOUT,
        }
    }
}

/// Which endpoint a call-home client tries first when (re)connecting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartWith {
    #[default]
    FirstListed,
    LastConnected,
    #[serde(rename = "random-selection")]
    Random,
}

impl StartWith {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstListed => "first-listed",
            Self::LastConnected => "last-connected",
            Self::Random => "random-selection",
        }
    }
}

impl fmt::Display for StartWith {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartWith {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "first-listed" => Ok(Self::FirstListed),
            "last-connected" => Ok(Self::LastConnected),
            "random-selection" => Ok(Self::Random),
            other => Err(ModelError::UnknownStartWith(other.to_string())),
        }
    }
}

/// Call-home reconnect behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconnectStrategy {
    pub start_with: StartWith,
    pub max_attempts: u8,
}

impl Default for ReconnectStrategy {
    fn default() -> Self {
        Self {
            start_with: StartWith::default(),
            max_attempts: DEFAULT_RECONNECT_MAX_ATTEMPTS,
        }
    }
}
