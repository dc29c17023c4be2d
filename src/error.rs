//! Error types for tinydelta encoding and decoding operations.
//!
//! Every failure is local and synchronous: nothing is retried inside the codec.
//! The variants carry enough detail for an embedding application to decide
//! whether to fall back to sending the readings uncompressed.

use thiserror::Error;

/// Error returned by the bit-level field operations of [`BitBuffer`](crate::BitBuffer)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBufferError {
    /// The addressed bit range does not fit inside the buffer
    #[error("bit range {offset}..{end} exceeds buffer capacity of {capacity} bits")]
    OutOfBounds {
        offset: usize,
        end: usize,
        capacity: usize,
    },
    /// Field widths must be in `1..=8`
    #[error("field width {0} is outside 1..=8")]
    InvalidWidth(u8),
}

/// Error returned when encoding fails
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// There is no first reading to use as the seed
    #[error("cannot encode an empty reading sequence")]
    EmptyInput,
    /// More readings than the configured maximum
    #[error("too many readings ({count}), max is {max}")]
    TooManyReadings { count: usize, max: usize },
    /// The encoded stream does not fit in the output buffer
    #[error("encoded stream needs {needed_bits} bits but the buffer holds {capacity_bits}")]
    CapacityExceeded {
        needed_bits: usize,
        capacity_bits: usize,
    },
    /// A record violated a codec invariant (this is a bug)
    #[error("internal codec invariant violated: {0}")]
    Internal(&'static str),
}

/// Error returned when decoding fails
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A field would extend past the declared bit-length
    #[error("stream truncated: {needed} bits needed at offset {offset}, stream is {bit_len} bits")]
    Truncated {
        offset: usize,
        needed: usize,
        bit_len: usize,
    },
    /// The declared bit-length is larger than the supplied bytes
    #[error("declared bit length {bit_len} exceeds buffer capacity of {capacity_bits} bits")]
    BitLengthExceedsBuffer { bit_len: usize, capacity_bits: usize },
    /// The decoded readings do not fit in the destination
    #[error("decoded readings exceed output capacity of {capacity}")]
    OutputOverflow { capacity: usize },
}

/// Error returned when a [`CodecConfig`](crate::CodecConfig) is unusable
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("packet_bytes must be at least 2 (seed plus END tag)")]
    PacketTooSmall,
    #[error("max_readings must be non-zero")]
    ZeroReadings,
}

impl EncodeError {
    /// Map a bit buffer failure during encoding onto the caller-facing error
    pub(crate) fn from_bitbuf(err: BitBufferError) -> Self {
        match err {
            BitBufferError::OutOfBounds { end, capacity, .. } => Self::CapacityExceeded {
                needed_bits: end,
                capacity_bits: capacity,
            },
            BitBufferError::InvalidWidth(_) => Self::Internal("field width outside 1..=8"),
        }
    }
}
