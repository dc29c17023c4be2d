//! `tinydelta` - Self-describing bitstream codec for small signed 8-bit readings
//!
//! Packs short sequences of `i8` sensor readings into a few bits per value so
//! they fit a bandwidth-constrained packet, such as a 59-byte Iridium SBD
//! payload. Slowly varying series cost 4-9 bits per value, runs of identical
//! values collapse to 5 bits for up to 8 readings, and any value is always
//! representable at 10 bits.
//!
//! # Example
//! ```
//! use tinydelta::{Decoder, Encoder};
//!
//! let readings = [5, 6, 6, 6, 10, 12, 12, 10, 10, 10, -36];
//!
//! let packet = Encoder::new().encode(&readings).unwrap();
//! println!("{} bits, {} bytes", packet.bit_len(), packet.byte_len());
//!
//! let decoded = Decoder::new().decode(&packet).unwrap();
//! assert_eq!(decoded, readings);
//! ```
//!
//! # Wire Format
//!
//! Bits are numbered from the most significant bit of byte 0. There is no
//! header, length prefix or checksum; the bit-length travels out of band.
//!
//! ```text
//! [8 bits: first reading, two's complement]
//! repeat {
//!   [2 bits: kind]
//!   00 DIFF     [2 bits: n-2] [n bits: magnitude field]   n = 2..5
//!   01 REPEAT   [3 bits: repeats-1]                       repeats = 1..8
//!   10 LITERAL  [8 bits: reading]
//!   11 END
//! }
//! ```
//!
//! | Delta | Record | Bits |
//! |-------|--------|------|
//! | 0 | REPEAT | 5 for a run of 1-8 |
//! | ±1..±2 | DIFF, n = 2 | 6 |
//! | ±3..±6 | DIFF, n = 3 | 7 |
//! | ±7..±14 | DIFF, n = 4 | 8 |
//! | ±15..±30 | DIFF, n = 5 | 9 |
//! | otherwise | LITERAL | 10 |
//!
//! Deltas are computed with 8-bit wrapping arithmetic.
//!
//! ## DIFF magnitude field
//!
//! `mag = |delta| + 1` is written in its minimal width `n`, so its top bit is
//! always 1. For a negative delta the ones' complement of `mag` (masked to `n`
//! bits) is written instead, so a top bit of 0 marks a negative delta.
//!
//! ```text
//! delta  mag  n  field
//!    +1    2  2  10
//!    -1    2  2  01
//!    +4    5  3  101
//!    -2    3  2  00
//!   +30   31  5  11111
//!   -30   31  5  00000
//! ```

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

mod bitbuf;
mod config;
mod constants;
mod decoder;
mod encoder;
mod error;
mod packet;
mod record;

#[cfg(test)]
mod tests;

// Re-export public API
pub use bitbuf::{read_bit, read_field, BitBuffer};
pub use config::CodecConfig;
pub use constants::{minimal_bit_width, DEFAULT_MAX_READINGS, DEFAULT_PACKET_BYTES, DIFF_MAX_DELTA, MAX_RUN};
pub use decoder::{decode, decode_to_vec, Decoder, RecordReader};
pub use encoder::{classify, encode, encoded_bit_len, Encoder, Records};
pub use error::{BitBufferError, ConfigError, DecodeError, EncodeError};
pub use packet::Packet;
pub use record::{Kind, Record};
