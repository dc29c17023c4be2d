//! Codec configuration.
//!
//! Created once at the application boundary (for example deserialized from a
//! JSON or TOML document) and handed to [`Encoder`](crate::Encoder) and
//! [`Decoder`](crate::Decoder). Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_READINGS, DEFAULT_PACKET_BYTES};
use crate::error::ConfigError;

/// Packet and reading limits shared by the encoder and decoder
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Output packet capacity in bytes (default: 59, one Iridium SBD payload)
    pub packet_bytes: usize,
    /// Most readings accepted by the encoder or produced by the decoder
    pub max_readings: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            packet_bytes: DEFAULT_PACKET_BYTES,
            max_readings: DEFAULT_MAX_READINGS,
        }
    }
}

impl CodecConfig {
    /// Check the limits can hold at least a single-reading stream
    ///
    /// # Errors
    /// - `PacketTooSmall` if `packet_bytes < 2` (seed plus END needs 10 bits)
    /// - `ZeroReadings` if `max_readings == 0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.packet_bytes < 2 {
            return Err(ConfigError::PacketTooSmall);
        }
        if self.max_readings == 0 {
            return Err(ConfigError::ZeroReadings);
        }
        Ok(())
    }
}
