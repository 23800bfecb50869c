//! Symbol frequencies and the stream header that carries them.
//!
//! The header is laid out as (all integers little-endian):
//!
//! ```text
//! u32 header_length     bytes from offset 0 to the end of the frequency table
//! u32 data_length       number of original bytes
//! u32 n1, n1 x (u8 symbol, u8 count)
//! u32 n2, n2 x (u8 symbol, u16 count)
//! u32 n4, n4 x (u8 symbol, u32 count)
//! ```
//!
//! Symbols that never occur are left out. Counts below 255 take one byte, counts below
//! 65535 take two, everything else takes four. Within a bucket, symbols are written in
//! ascending order so the same table always serializes to the same bytes.

use std::collections::BTreeMap;

use log::debug;

use crate::error::HuffError;
use crate::tools::freq_count::freqs;

/// Number of distinct symbols (byte values).
pub const SYMBOLS: usize = 256;
/// header_length + data_length
pub const FIXED_HEADER_LEN: usize = 8;
/// Count widths, in bytes, of the three buckets in serialized order.
const BUCKET_WIDTHS: [usize; 3] = [1, 2, 4];
/// Smallest possible compressed table: three empty buckets.
const MIN_TABLE_LEN: usize = 4 * BUCKET_WIDTHS.len();

/// Occurrence counts for all 256 byte values.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FreqTable {
    counts: [u32; SYMBOLS],
}

impl Default for FreqTable {
    fn default() -> Self {
        Self {
            counts: [0; SYMBOLS],
        }
    }
}

impl FreqTable {
    /// Count every byte value in `data`. Symbols that do not occur get a count of 0.
    pub fn build(data: &[u8]) -> Result<Self, HuffError> {
        if data.len() > u32::MAX as usize {
            return Err(HuffError::InputTooLarge(data.len()));
        }
        Ok(Self {
            counts: freqs(data),
        })
    }

    pub fn from_counts(counts: [u32; SYMBOLS]) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u32; SYMBOLS] {
        &self.counts
    }

    pub fn count(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    /// Sum of all counters, i.e. the length of the data the table was built from.
    pub fn data_length(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn symbols_used(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Serialize the table into its size-minimized bucket form.
    pub fn compress(&self) -> Vec<u8> {
        let mut buckets: [BTreeMap<u8, u32>; 3] = Default::default();
        for (sym, &count) in self.counts.iter().enumerate() {
            let slot = match count {
                0 => continue,
                c if c < u8::MAX as u32 => 0,
                c if c < u16::MAX as u32 => 1,
                _ => 2,
            };
            buckets[slot].insert(sym as u8, count);
        }

        let len = MIN_TABLE_LEN
            + buckets
                .iter()
                .zip(BUCKET_WIDTHS)
                .map(|(bucket, width)| bucket.len() * (1 + width))
                .sum::<usize>();
        let mut out = Vec::with_capacity(len);

        for (bucket, width) in buckets.iter().zip(BUCKET_WIDTHS) {
            out.extend_from_slice(&(bucket.len() as u32).to_le_bytes());
            for (&sym, &count) in bucket {
                out.push(sym);
                // The bucket guarantees the count fits in `width` bytes.
                out.extend_from_slice(&count.to_le_bytes()[..width]);
            }
        }
        out
    }

    /// Rebuild a table from its compressed form. Every counter not mentioned stays 0.
    pub fn decompress(bytes: &[u8]) -> Result<Self, HuffError> {
        let mut table = Self::default();
        let mut reader = TableReader { bytes, pos: 0 };

        for width in BUCKET_WIDTHS {
            let entries = reader.u32()? as usize;
            let needed = entries
                .checked_mul(1 + width)
                .ok_or_else(|| HuffError::bad_freqs(reader.pos, "bucket size overflows"))?;
            if needed > reader.remaining() {
                return Err(HuffError::bad_freqs(
                    reader.pos,
                    format!(
                        "{} entries of {} bytes need {} bytes, only {} left",
                        entries,
                        1 + width,
                        needed,
                        reader.remaining()
                    ),
                ));
            }
            for _ in 0..entries {
                let sym = reader.take(1)?[0];
                let mut le = [0_u8; 4];
                le[..width].copy_from_slice(reader.take(width)?);
                table.counts[sym as usize] = u32::from_le_bytes(le);
            }
        }

        if reader.remaining() > 0 {
            return Err(HuffError::bad_freqs(
                reader.pos,
                format!("{} trailing bytes after the last bucket", reader.remaining()),
            ));
        }
        Ok(table)
    }

    /// Emit the full stream header: header length, data length, then the compressed table.
    pub fn to_header_bytes(&self, data_length: u32) -> Vec<u8> {
        let table = self.compress();
        let header_length = (FIXED_HEADER_LEN + table.len()) as u32;
        let mut out = Vec::with_capacity(header_length as usize);
        out.extend_from_slice(&header_length.to_le_bytes());
        out.extend_from_slice(&data_length.to_le_bytes());
        out.extend_from_slice(&table);
        debug!(
            "Header is {} bytes for {} symbols in use.",
            header_length,
            self.symbols_used()
        );
        out
    }
}

/// A parsed stream header.
#[derive(Debug, PartialEq, Eq)]
pub struct Header {
    /// Offset of the first packed body byte.
    pub header_length: usize,
    /// Number of bytes the body decodes to.
    pub data_length: usize,
    pub table: FreqTable,
}

impl Header {
    /// Read the header at the front of `stream`, checking every length against the buffer.
    pub fn parse(stream: &[u8]) -> Result<Self, HuffError> {
        if stream.len() < FIXED_HEADER_LEN {
            return Err(HuffError::malformed(format!(
                "stream is {} bytes, the fixed header alone is {}",
                stream.len(),
                FIXED_HEADER_LEN
            )));
        }
        let mut reader = TableReader {
            bytes: stream,
            pos: 0,
        };
        let header_length = reader.u32()? as usize;
        let data_length = reader.u32()?;

        // A table too short for its bucket counts is left for decompress to report.
        if header_length < FIXED_HEADER_LEN {
            return Err(HuffError::malformed(format!(
                "header length {} is below the fixed {} bytes",
                header_length, FIXED_HEADER_LEN
            )));
        }
        if header_length > stream.len() {
            return Err(HuffError::malformed(format!(
                "header length {} exceeds stream length {}",
                header_length,
                stream.len()
            )));
        }

        let table = FreqTable::decompress(&stream[FIXED_HEADER_LEN..header_length])?;
        if table.data_length() != data_length as u64 {
            return Err(HuffError::malformed(format!(
                "frequencies sum to {} but data length is {}",
                table.data_length(),
                data_length
            )));
        }

        Ok(Self {
            header_length,
            data_length: data_length as usize,
            table,
        })
    }
}

/// Bounds-checked little-endian cursor over header bytes.
struct TableReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> TableReader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], HuffError> {
        if n > self.remaining() {
            return Err(HuffError::bad_freqs(
                self.pos,
                format!("need {} bytes, only {} left", n, self.remaining()),
            ));
        }
        let bytes = self.bytes;
        let out = &bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn u32(&mut self) -> Result<u32, HuffError> {
        let mut le = [0_u8; 4];
        le.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(le))
    }
}
