use std::io::{Read, Result, Write};

use crate::bit_iterator::BitIterator;

/// Stores one bit in the least significant bit of a coefficient.
pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

impl HideBit for &mut i64 {
    fn hide_bit(self, bit: bool) {
        *self = (*self & !1) | i64::from(bit);
    }
}

/// Reads the bit stored by [`HideBit`].
pub trait UnveilBit {
    fn unveil_bit(self) -> bool;
}

impl UnveilBit for &i64 {
    fn unveil_bit(self) -> bool {
        *self & 1 == 1
    }
}

/// Writes bytes onto embedding positions, one bit per position,
/// most significant bit first.
///
/// Positions past the written bits are never touched.
pub struct CoefficientWriter<I> {
    positions: I,
    hidden: usize,
}

impl<'a, I> CoefficientWriter<I>
where
    I: Iterator<Item = &'a mut i64>,
{
    pub fn new(positions: I) -> Self {
        Self {
            positions,
            hidden: 0,
        }
    }

    /// number of bits hidden so far
    pub fn hidden_bits(&self) -> usize {
        self.hidden
    }
}

impl<'a, I> Write for CoefficientWriter<I>
where
    I: Iterator<Item = &'a mut i64>,
{
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let mut bits_written = 0;
        for (bit, position) in BitIterator::new(buf).zip(self.positions.by_ref()) {
            position.hide_bit(bit);
            bits_written += 1;
        }
        self.hidden += bits_written;

        // a partially written byte counts as not written, `write_all` fails then
        Ok(bits_written >> 3)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Reads bytes back from embedding positions, eight positions per byte.
pub struct CoefficientReader<I> {
    positions: I,
}

impl<'a, I> CoefficientReader<I>
where
    I: Iterator<Item = &'a i64>,
{
    pub fn new(positions: I) -> Self {
        Self { positions }
    }
}

impl<'a, I> Read for CoefficientReader<I>
where
    I: Iterator<Item = &'a i64>,
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut bytes_read = 0;
        for byte in buf.iter_mut() {
            let mut value = 0u8;
            for _ in 0..8 {
                match self.positions.next() {
                    Some(position) => value = (value << 1) | u8::from(position.unveil_bit()),
                    None => return Ok(bytes_read),
                }
            }
            *byte = value;
            bytes_read += 1;
        }

        Ok(bytes_read)
    }
}
