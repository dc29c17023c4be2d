//! Decoding functionality for tinydelta bitstreams.

use crate::bitbuf::read_field;
use crate::config::CodecConfig;
use crate::constants::SEED_BITS;
use crate::error::{ConfigError, DecodeError};
use crate::packet::Packet;
use crate::record::Record;

/// Iterator over the records of an encoded stream
///
/// Reads the seed on construction, then yields records until an END record
/// (which is yielded) or the declared bit-length is reached. After the first
/// error the iterator is exhausted.
///
/// # Example
/// ```
/// use tinydelta::{encode, BitBuffer, Record, RecordReader};
///
/// let mut buf = BitBuffer::new(8);
/// let bits = encode(&[5, 6, 6], &mut buf).unwrap();
///
/// let mut reader = RecordReader::new(buf.as_bytes(), bits).unwrap();
/// assert_eq!(reader.seed(), 5);
/// assert_eq!(reader.next(), Some(Ok(Record::Diff { delta: 1 })));
/// assert_eq!(reader.next(), Some(Ok(Record::Repeat { count: 1 })));
/// assert_eq!(reader.next(), Some(Ok(Record::End)));
/// assert_eq!(reader.next(), None);
/// ```
#[derive(Debug)]
pub struct RecordReader<'a> {
    reader: BitReader<'a>,
    seed: i8,
    done: bool,
}

impl<'a> RecordReader<'a> {
    /// Start reading `bit_len` bits of `bytes`
    ///
    /// # Errors
    /// - `BitLengthExceedsBuffer` if `bit_len` is larger than `bytes` holds
    /// - `Truncated` if `bit_len` is shorter than the 8-bit seed
    pub fn new(bytes: &'a [u8], bit_len: usize) -> Result<Self, DecodeError> {
        let mut reader = BitReader::new(bytes, bit_len)?;
        let seed = reader.read_bits(SEED_BITS)? as i8;
        Ok(Self {
            reader,
            seed,
            done: false,
        })
    }

    /// The verbatim first reading
    #[inline]
    #[must_use]
    pub fn seed(&self) -> i8 {
        self.seed
    }

    /// Current bit offset in the stream
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.reader.position()
    }
}

impl Iterator for RecordReader<'_> {
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.reader.has_more() {
            return None;
        }
        let record = Record::read(&mut self.reader);
        if matches!(record, Ok(Record::End) | Err(_)) {
            self.done = true;
        }
        Some(record)
    }
}

/// Decode `bit_len` bits of `bytes` into `out`, returning the reading count
///
/// A stream that reaches `bit_len` without an END record is accepted.
///
/// # Errors
/// - `BitLengthExceedsBuffer` if `bit_len` is larger than `bytes` holds
/// - `Truncated` if a record extends past `bit_len`
/// - `OutputOverflow` if the readings do not fit in `out`
#[must_use = "decoding returns readings that should be used"]
pub fn decode(bytes: &[u8], bit_len: usize, out: &mut [i8]) -> Result<usize, DecodeError> {
    let mut records = RecordReader::new(bytes, bit_len)?;
    let capacity = out.len();
    let overflow = DecodeError::OutputOverflow { capacity };

    let mut prev = records.seed();
    *out.first_mut().ok_or(overflow)? = prev;
    let mut count = 1usize;

    for record in records.by_ref() {
        let record = record?;
        log::trace!("reading {count}: {record:?}");
        let n = record.reading_count();
        if count + n > capacity {
            return Err(overflow);
        }
        match record {
            Record::Diff { delta } => prev = prev.wrapping_add(delta),
            Record::Literal { value } => prev = value,
            Record::Repeat { .. } | Record::End => {}
        }
        out[count..count + n].fill(prev);
        count += n;
    }

    log::debug!("decoded {count} readings from {} bits", records.position());
    Ok(count)
}

/// Decode into a freshly allocated vector holding at most `max_readings`
///
/// # Errors
/// Same as [`decode`], with `OutputOverflow` reported against `max_readings`.
#[must_use = "decoding returns readings that should be used"]
pub fn decode_to_vec(bytes: &[u8], bit_len: usize, max_readings: usize) -> Result<Vec<i8>, DecodeError> {
    let mut out = vec![0; max_readings];
    let count = decode(bytes, bit_len, &mut out)?;
    out.truncate(count);
    Ok(out)
}

/// Decoder bound to a [`CodecConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    config: CodecConfig,
}

impl Decoder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder with a custom configuration
    ///
    /// # Errors
    /// Returns the validation error of `config`.
    pub fn with_config(config: CodecConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode a packet, recovering at most `max_readings` readings
    ///
    /// # Errors
    /// Same as [`decode`].
    #[must_use = "decoding returns readings that should be used"]
    pub fn decode(&self, packet: &Packet) -> Result<Vec<i8>, DecodeError> {
        decode_to_vec(packet.as_bytes(), packet.bit_len(), self.config.max_readings)
    }
}

/// Bounds-checked read cursor over the first `bit_len` bits of a byte slice
#[derive(Debug)]
pub(crate) struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8], bit_len: usize) -> Result<Self, DecodeError> {
        let capacity_bits = bytes.len().saturating_mul(8);
        if bit_len > capacity_bits {
            return Err(DecodeError::BitLengthExceedsBuffer { bit_len, capacity_bits });
        }
        Ok(Self { bytes, pos: 0, bit_len })
    }

    /// Read the next `width` bits (1..=8)
    #[inline]
    pub fn read_bits(&mut self, width: u8) -> Result<u8, DecodeError> {
        let truncated = DecodeError::Truncated {
            offset: self.pos,
            needed: usize::from(width),
            bit_len: self.bit_len,
        };
        if self.pos + usize::from(width) > self.bit_len {
            return Err(truncated);
        }
        let value = read_field(self.bytes, self.pos, width).map_err(|_| truncated)?;
        self.pos += usize::from(width);
        Ok(value)
    }

    #[inline]
    pub fn has_more(&self) -> bool {
        self.pos < self.bit_len
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}
