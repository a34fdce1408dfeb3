//! Aggregated AV decoder activity level

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Activity level of the most active audio/video decoder on the device.
///
/// The platform resource manager keeps state for every decoder; only the
/// most active one is reported, so a single level summarizes the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecoderLevel {
    /// No decoder is doing any work
    #[default]
    Idle,
    /// A decoder holds resources but is paused
    Paused,
    /// A decoder is actively decoding
    Active,
}

impl DecoderLevel {
    /// Wire string form ("IDLE", "PAUSED", "ACTIVE")
    pub fn as_str(&self) -> &'static str {
        match self {
            DecoderLevel::Idle => "IDLE",
            DecoderLevel::Paused => "PAUSED",
            DecoderLevel::Active => "ACTIVE",
        }
    }
}

impl fmt::Display for DecoderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecoderLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(DecoderLevel::Idle),
            "PAUSED" => Ok(DecoderLevel::Paused),
            "ACTIVE" => Ok(DecoderLevel::Active),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown decoder level: {}",
                other
            ))),
        }
    }
}
