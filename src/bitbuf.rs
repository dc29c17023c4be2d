//! Fixed-capacity byte buffer addressed as a flat MSB-first bit sequence.
//!
//! Bit `b` lives in byte `b / 8` at position `7 - (b % 8)`, so bit 0 of the
//! stream is the top bit of byte 0.

use crate::error::BitBufferError;

/// Byte index and in-byte shift for an absolute bit index
#[inline]
const fn locate(index: usize) -> (usize, u32) {
    (index / 8, 7 - (index % 8) as u32)
}

#[inline]
fn check_width(width: u8) -> Result<(), BitBufferError> {
    if width == 0 || width > 8 {
        return Err(BitBufferError::InvalidWidth(width));
    }
    Ok(())
}

#[inline]
fn check_range(offset: usize, width: usize, capacity: usize) -> Result<(), BitBufferError> {
    let end = offset.saturating_add(width);
    if end > capacity {
        return Err(BitBufferError::OutOfBounds { offset, end, capacity });
    }
    Ok(())
}

/// Read a single bit from a byte slice
///
/// # Errors
/// Returns `OutOfBounds` if `index` is past the end of `bytes`.
#[inline]
pub fn read_bit(bytes: &[u8], index: usize) -> Result<bool, BitBufferError> {
    check_range(index, 1, bytes.len().saturating_mul(8))?;
    let (byte, shift) = locate(index);
    Ok((bytes[byte] >> shift) & 1 == 1)
}

/// Read a `width`-bit unsigned field starting at `offset`, most significant bit first
///
/// # Errors
/// Returns `InvalidWidth` unless `width` is in `1..=8`, and `OutOfBounds` if the
/// field extends past the end of `bytes`.
#[inline]
pub fn read_field(bytes: &[u8], offset: usize, width: u8) -> Result<u8, BitBufferError> {
    check_width(width)?;
    check_range(offset, usize::from(width), bytes.len().saturating_mul(8))?;
    let mut value = 0u8;
    for index in offset..offset + usize::from(width) {
        let (byte, shift) = locate(index);
        value = (value << 1) | ((bytes[byte] >> shift) & 1);
    }
    Ok(value)
}

/// Fixed-capacity bit buffer with a tracked logical bit-length
///
/// The capacity is set at construction and never grows. Field writes only set
/// bits, so a region must be zero before it is written; [`BitBuffer::new`] and
/// [`BitBuffer::reset`] guarantee that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitBuffer {
    /// Create a zero-filled buffer of `capacity_bytes` bytes
    #[inline]
    #[must_use]
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            bytes: vec![0; capacity_bytes],
            bit_len: 0,
        }
    }

    /// Wrap existing bytes holding `bit_len` meaningful bits
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `bit_len` is larger than the bytes can hold.
    pub fn from_bytes(bytes: Vec<u8>, bit_len: usize) -> Result<Self, BitBufferError> {
        check_range(0, bit_len, bytes.len().saturating_mul(8))?;
        Ok(Self { bytes, bit_len })
    }

    /// Zero every byte and forget the logical length
    #[inline]
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        self.bit_len = 0;
    }

    /// Capacity in bytes
    #[inline]
    #[must_use]
    pub fn capacity_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Capacity in bits
    #[inline]
    #[must_use]
    pub fn capacity_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Number of meaningful bits (highest bit written so far, plus one)
    #[inline]
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Bytes covering the logical bit-length
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bit_len.div_ceil(8)]
    }

    /// Consume the buffer, keeping only the bytes covering the logical bit-length
    #[must_use]
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.bytes.truncate(self.bit_len.div_ceil(8));
        self.bytes
    }

    /// Set the bit at `index` to 1
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `index` is past the capacity.
    #[inline]
    pub fn set_bit(&mut self, index: usize) -> Result<(), BitBufferError> {
        check_range(index, 1, self.capacity_bits())?;
        let (byte, shift) = locate(index);
        self.bytes[byte] |= 1 << shift;
        self.bit_len = self.bit_len.max(index + 1);
        Ok(())
    }

    /// Set the bit at `index` to 0
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `index` is past the capacity.
    #[inline]
    pub fn clear_bit(&mut self, index: usize) -> Result<(), BitBufferError> {
        check_range(index, 1, self.capacity_bits())?;
        let (byte, shift) = locate(index);
        self.bytes[byte] &= !(1 << shift);
        Ok(())
    }

    /// Read the bit at `index`
    ///
    /// # Errors
    /// Returns `OutOfBounds` if `index` is past the capacity.
    #[inline]
    pub fn bit(&self, index: usize) -> Result<bool, BitBufferError> {
        read_bit(&self.bytes, index)
    }

    /// Write the low `width` bits of `value` at `offset`, most significant bit first
    ///
    /// Only 1-bits are stored; the target region must already be zero.
    ///
    /// # Errors
    /// Returns `InvalidWidth` unless `width` is in `1..=8`, and `OutOfBounds` if
    /// `offset + width` exceeds the capacity. Nothing is written on error.
    pub fn write_field(&mut self, offset: usize, value: u8, width: u8) -> Result<(), BitBufferError> {
        check_width(width)?;
        check_range(offset, usize::from(width), self.capacity_bits())?;
        for i in 0..width {
            if (value >> (width - 1 - i)) & 1 == 1 {
                let (byte, shift) = locate(offset + usize::from(i));
                self.bytes[byte] |= 1 << shift;
            }
        }
        self.bit_len = self.bit_len.max(offset + usize::from(width));
        Ok(())
    }

    /// Read a `width`-bit field at `offset`; inverse of [`BitBuffer::write_field`]
    ///
    /// # Errors
    /// Returns `InvalidWidth` unless `width` is in `1..=8`, and `OutOfBounds` if
    /// the field extends past the capacity.
    #[inline]
    pub fn read_field(&self, offset: usize, width: u8) -> Result<u8, BitBufferError> {
        read_field(&self.bytes, offset, width)
    }
}
