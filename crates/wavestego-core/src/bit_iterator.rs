use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use std::io::{Read, Result};

/// Iterates the bits of a byte source, most significant bit first.
pub struct BitIterator<R: Read> {
    reader: BitReader<R, BigEndian>,
}

impl<R: Read> BitIterator<R> {
    pub fn new(source: R) -> Self {
        BitIterator {
            reader: BitReader::endian(source, BigEndian),
        }
    }
}

impl<R: Read> Iterator for BitIterator<R> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_bit().ok()
    }
}

/// Packs single bits into bytes, most significant bit first.
pub struct BitCollector {
    writer: BitWriter<Vec<u8>, BigEndian>,
    len: usize,
}

impl Default for BitCollector {
    fn default() -> Self {
        Self {
            writer: BitWriter::endian(Vec::new(), BigEndian),
            len: 0,
        }
    }
}

impl BitCollector {
    pub fn push(&mut self, bit: bool) -> Result<()> {
        self.writer.write_bit(bit)?;
        self.len += 1;
        Ok(())
    }

    /// number of bits pushed so far
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// the collected bytes, a trailing partial byte is filled up with zeros
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        if !self.writer.byte_aligned() {
            self.writer.byte_align()?;
        }
        Ok(self.writer.into_writer())
    }
}
