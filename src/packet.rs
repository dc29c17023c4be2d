//! Encoded packet: stream bytes plus the out-of-band bit-length.

use serde::{Deserialize, Serialize};

use crate::bitbuf::BitBuffer;
use crate::decoder::decode_to_vec;
use crate::error::{BitBufferError, DecodeError};

/// An encoded stream together with its bit-length
///
/// The format has no length prefix, so the bit-length has to travel next to
/// the bytes. Trailing bits of the last byte are zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Packet {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl Packet {
    /// Wrap received bytes and their bit-length
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `bit_len` exceeds what `bytes` can hold.
    pub fn new(bytes: Vec<u8>, bit_len: usize) -> Result<Self, BitBufferError> {
        let capacity = bytes.len().saturating_mul(8);
        if bit_len > capacity {
            return Err(BitBufferError::OutOfBounds {
                offset: 0,
                end: bit_len,
                capacity,
            });
        }
        Ok(Self { bytes, bit_len })
    }

    #[inline]
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Bytes on the wire (`ceil(bit_len / 8)` for encoder output)
    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Raw size of `reading_count` 8-bit readings divided by the encoded size
    #[must_use]
    pub fn compression_ratio(&self, reading_count: usize) -> f64 {
        if self.bit_len == 0 {
            return 0.0;
        }
        (reading_count * 8) as f64 / self.bit_len as f64
    }

    /// Decode at most `max_readings` readings from this packet
    ///
    /// # Errors
    /// Same as [`decode`](crate::decode).
    #[must_use = "decoding returns readings that should be used"]
    pub fn decode(&self, max_readings: usize) -> Result<Vec<i8>, DecodeError> {
        decode_to_vec(&self.bytes, self.bit_len, max_readings)
    }
}

impl From<BitBuffer> for Packet {
    fn from(buf: BitBuffer) -> Self {
        let bit_len = buf.bit_len();
        Self {
            bytes: buf.into_bytes(),
            bit_len,
        }
    }
}
