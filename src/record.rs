//! Record kinds and their bit layouts.

use crate::constants::{
    low_mask, minimal_bit_width, DIFF_MAX_DELTA, DIFF_MAX_WIDTH, DIFF_MIN_WIDTH, DIFF_SELECTOR_BITS,
    KIND_BITS, LITERAL_BITS, MAX_RUN, REPEAT_COUNT_BITS,
};
use crate::decoder::BitReader;
use crate::encoder::BitWriter;
use crate::error::{DecodeError, EncodeError};

/// 2-bit discriminator in front of every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Diff = 0b00,
    Repeat = 0b01,
    Literal = 0b10,
    End = 0b11,
}

impl Kind {
    /// Kind for the low two bits of `bits`
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Diff,
            0b01 => Self::Repeat,
            0b10 => Self::Literal,
            _ => Self::End,
        }
    }

    /// Tag value written to the stream
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// One self-describing unit of the bitstream
///
/// | Kind | Layout | Bits |
/// |------|--------|------|
/// | DIFF | `00 ss f..f` | 6-9 |
/// | REPEAT | `01 ccc` | 5 |
/// | LITERAL | `10 vvvvvvvv` | 10 |
/// | END | `11` | 2 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Record {
    /// Non-zero delta in `-30..=30` from the previous reading
    Diff { delta: i8 },
    /// The previous reading repeated `count` times (1..=8)
    Repeat { count: u8 },
    /// A reading stored verbatim
    Literal { value: i8 },
    /// Stream terminator
    End,
}

impl Record {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Diff { .. } => Kind::Diff,
            Self::Repeat { .. } => Kind::Repeat,
            Self::Literal { .. } => Kind::Literal,
            Self::End => Kind::End,
        }
    }

    /// Encoded size in bits, kind tag included
    ///
    /// `None` for a DIFF whose delta is zero or outside `-30..=30`, and for a
    /// REPEAT count outside `1..=8`; neither can be written.
    #[must_use]
    pub fn bit_len(&self) -> Option<usize> {
        let payload = match *self {
            Self::Diff { delta } => {
                let (_, _, width) = diff_payload(delta)?;
                DIFF_SELECTOR_BITS + width
            }
            Self::Repeat { count } if count == 0 || count > MAX_RUN => return None,
            Self::Repeat { .. } => REPEAT_COUNT_BITS,
            Self::Literal { .. } => LITERAL_BITS,
            Self::End => 0,
        };
        Some(usize::from(KIND_BITS + payload))
    }

    /// Number of readings this record reconstructs
    #[inline]
    #[must_use]
    pub const fn reading_count(&self) -> usize {
        match self {
            Self::Diff { .. } | Self::Literal { .. } => 1,
            Self::Repeat { count } => *count as usize,
            Self::End => 0,
        }
    }

    pub(crate) fn write(&self, writer: &mut BitWriter<'_>) -> Result<(), EncodeError> {
        writer.write_bits(self.kind().bits(), KIND_BITS)?;
        match *self {
            Self::Diff { delta } => {
                let (selector, field, width) =
                    diff_payload(delta).ok_or(EncodeError::Internal("DIFF delta outside 1..=30 magnitude"))?;
                writer.write_bits(selector, DIFF_SELECTOR_BITS)?;
                writer.write_bits(field, width)
            }
            Self::Repeat { count } => {
                if count == 0 || count > MAX_RUN {
                    return Err(EncodeError::Internal("REPEAT count outside 1..=8"));
                }
                writer.write_bits(count - 1, REPEAT_COUNT_BITS)
            }
            Self::Literal { value } => writer.write_bits(value as u8, LITERAL_BITS),
            Self::End => Ok(()),
        }
    }

    pub(crate) fn read(reader: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        let record = match Kind::from_bits(reader.read_bits(KIND_BITS)?) {
            Kind::Diff => {
                let width = reader.read_bits(DIFF_SELECTOR_BITS)? + DIFF_MIN_WIDTH;
                let field = reader.read_bits(width)?;
                Self::Diff {
                    delta: diff_delta(field, width),
                }
            }
            Kind::Repeat => Self::Repeat {
                count: reader.read_bits(REPEAT_COUNT_BITS)? + 1,
            },
            Kind::Literal => Self::Literal {
                value: reader.read_bits(LITERAL_BITS)? as i8,
            },
            Kind::End => Self::End,
        };
        Ok(record)
    }
}

/// DIFF payload for `delta`: (range selector, magnitude field, field width)
///
/// `mag = |delta| + 1` is stored in its minimal width, so its top bit is 1.
/// Negative deltas store the ones' complement of `mag` instead, which clears
/// the top bit and doubles as the sign flag.
pub(crate) fn diff_payload(delta: i8) -> Option<(u8, u8, u8)> {
    if delta == 0 || !(-DIFF_MAX_DELTA..=DIFF_MAX_DELTA).contains(&delta) {
        return None;
    }
    let mag = delta.unsigned_abs() + 1;
    let width = minimal_bit_width(mag);
    debug_assert!((DIFF_MIN_WIDTH..=DIFF_MAX_WIDTH).contains(&width));
    let field = if delta > 0 { mag } else { !mag & low_mask(width) };
    Some((width - DIFF_MIN_WIDTH, field, width))
}

/// Inverse of [`diff_payload`] for a `width`-bit field
pub(crate) fn diff_delta(field: u8, width: u8) -> i8 {
    if (field >> (width - 1)) & 1 == 1 {
        (field - 1) as i8
    } else {
        let mag = !field & low_mask(width);
        -((mag - 1) as i8)
    }
}
