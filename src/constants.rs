//! Internal constants and helper functions for tinydelta encoding.

/// Width of the verbatim seed reading at the start of every stream
pub(crate) const SEED_BITS: u8 = 8;

/// Width of the kind tag in front of every record
pub(crate) const KIND_BITS: u8 = 2;

/// Width of the DIFF range selector (`n - 2`)
pub(crate) const DIFF_SELECTOR_BITS: u8 = 2;

/// Width of the REPEAT count field (`repeats - 1`)
pub(crate) const REPEAT_COUNT_BITS: u8 = 3;

/// Width of a LITERAL payload
pub(crate) const LITERAL_BITS: u8 = 8;

/// Smallest DIFF magnitude width (`mag = 2`)
pub(crate) const DIFF_MIN_WIDTH: u8 = 2;

/// Largest DIFF magnitude width (`mag = 31`)
pub(crate) const DIFF_MAX_WIDTH: u8 = 5;

/// Largest absolute delta carried by a DIFF record
pub const DIFF_MAX_DELTA: i8 = 30;

/// Longest run collapsed into a single REPEAT record
pub const MAX_RUN: u8 = 8;

/// One Iridium SBD payload
pub const DEFAULT_PACKET_BYTES: usize = 59;

/// Reading counters in the deployed firmware are 8-bit
pub const DEFAULT_MAX_READINGS: usize = 255;

/// Position of the highest set bit, 1-based (`floor(log2(value)) + 1`)
///
/// Returns 8 for `0`. DIFF magnitudes are always at least 2, so the encoder
/// never reaches that case.
#[inline]
#[must_use]
pub const fn minimal_bit_width(value: u8) -> u8 {
    if value == 0 {
        return 8;
    }
    (u8::BITS - value.leading_zeros()) as u8
}

/// Mask covering the low `width` bits (`width` in 1..=8)
#[inline]
pub(crate) const fn low_mask(width: u8) -> u8 {
    if width >= 8 {
        u8::MAX
    } else {
        (1u8 << width) - 1
    }
}
