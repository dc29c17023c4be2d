//! Encoder for tinydelta bitstreams.

use crate::bitbuf::BitBuffer;
use crate::config::CodecConfig;
use crate::constants::{DIFF_MAX_DELTA, KIND_BITS, MAX_RUN, SEED_BITS};
use crate::error::{ConfigError, EncodeError};
use crate::packet::Packet;
use crate::record::Record;

/// Iterator over the records chosen for each reading after the seed
///
/// Produced by [`classify`]. Never yields [`Record::End`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    readings: &'a [i8],
    idx: usize,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let current = *self.readings.get(self.idx)?;
        let delta = current.wrapping_sub(self.readings[self.idx - 1]);

        let record = if delta == 0 {
            // Bound is checked before looking ahead; a run touching the end of
            // the sequence just stops there.
            let mut count = 1u8;
            while count < MAX_RUN
                && self.idx + 1 < self.readings.len()
                && self.readings[self.idx + 1] == current
            {
                count += 1;
                self.idx += 1;
            }
            Record::Repeat { count }
        } else if (-DIFF_MAX_DELTA..=DIFF_MAX_DELTA).contains(&delta) {
            Record::Diff { delta }
        } else {
            Record::Literal { value: current }
        };

        self.idx += 1;
        Some(record)
    }
}

/// Choose a record for every reading after the first
///
/// Deltas use 8-bit wrapping arithmetic, so `-128 -> 127` is a DIFF of -1.
#[inline]
#[must_use]
pub fn classify(readings: &[i8]) -> Records<'_> {
    Records { readings, idx: 1 }
}

/// Number of bits [`encode`] would produce for `readings`, or `None` if empty
#[must_use]
pub fn encoded_bit_len(readings: &[i8]) -> Option<usize> {
    if readings.is_empty() {
        return None;
    }
    let records: usize = classify(readings).map(|r| r.bit_len()).sum::<Option<usize>>()?;
    Some(usize::from(SEED_BITS) + records + usize::from(KIND_BITS))
}

/// Encode `readings` into `out`, returning the number of bits written
///
/// The buffer is reset first, so any previous contents are discarded.
///
/// # Errors
/// - `EmptyInput` if there is no seed reading
/// - `CapacityExceeded` if the stream does not fit in `out`, carrying the full
///   stream size; `out` is left untouched
pub fn encode(readings: &[i8], out: &mut BitBuffer) -> Result<usize, EncodeError> {
    let (&seed, _) = readings.split_first().ok_or(EncodeError::EmptyInput)?;
    let needed_bits = encoded_bit_len(readings).ok_or(EncodeError::Internal("unencodable record"))?;
    if needed_bits > out.capacity_bits() {
        return Err(EncodeError::CapacityExceeded {
            needed_bits,
            capacity_bits: out.capacity_bits(),
        });
    }

    out.reset();
    let mut writer = BitWriter::new(out);
    writer.write_bits(seed as u8, SEED_BITS)?;

    for record in classify(readings) {
        log::trace!("bit {}: {record:?}", writer.position());
        record.write(&mut writer)?;
    }
    Record::End.write(&mut writer)?;

    let bits = writer.position();
    log::debug!("encoded {} readings into {bits} bits", readings.len());
    Ok(bits)
}

/// Encoder bound to a [`CodecConfig`]
///
/// Allocates one packet-sized buffer per call; no state survives between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    /// Encoder with the default Iridium-sized packet
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with a custom configuration
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

    /// Encode `readings` into a packet no larger than `packet_bytes`
    ///
    /// # Errors
    /// - `EmptyInput` if `readings` is empty
    /// - `TooManyReadings` if `readings` exceeds `max_readings`
    /// - `CapacityExceeded` if the stream does not fit in one packet
    pub fn encode(&self, readings: &[i8]) -> Result<Packet, EncodeError> {
        if readings.len() > self.config.max_readings {
            return Err(EncodeError::TooManyReadings {
                count: readings.len(),
                max: self.config.max_readings,
            });
        }
        let mut buf = BitBuffer::new(self.config.packet_bytes);
        encode(readings, &mut buf)?;
        Ok(Packet::from(buf))
    }
}

/// Write cursor over a [`BitBuffer`]
pub(crate) struct BitWriter<'a> {
    buf: &'a mut BitBuffer,
    pos: usize,
}

impl<'a> BitWriter<'a> {
    #[inline]
    pub fn new(buf: &'a mut BitBuffer) -> Self {
        Self { buf, pos: 0 }
    }

    /// Append the low `width` bits of `value`
    #[inline]
    pub fn write_bits(&mut self, value: u8, width: u8) -> Result<(), EncodeError> {
        self.buf
            .write_field(self.pos, value, width)
            .map_err(EncodeError::from_bitbuf)?;
        self.pos += usize::from(width);
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}
