//! Table-driven CRC-16 (CCITT polynomial 0x1021, initial value 0).
//!
//! This is the checksum shared by the on-disk archive format family and
//! the station wire protocol.  The fold is the classic high-byte table
//! lookup: `acc = table[(acc >> 8) ^ byte] ^ (acc << 8)`.
//!
//! The parameter set matches CRC-16/XMODEM, so the standard check value
//! holds: `crc16_all(b"123456789") == 0x31C3`.
//!
//! Blocks on the wire carry their CRC big-endian immediately after the
//! payload; folding payload + stored CRC through the same table yields 0
//! for an intact block.  [`crc16_verify`] encodes that convention.

use crate::error::WlkError;

const CRC_POLY: u16 = 0x1021;

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// The 256-entry lookup table.  Read-only, safely shared everywhere.
pub const CRC_TABLE: [u16; 256] = build_table();

/// CRC-16 over `buffer[start .. start + count]`.
///
/// Pure and deterministic.  Fails with [`WlkError::OutOfRange`] when the
/// requested range does not lie inside `buffer`; there are no other error
/// conditions.
pub fn crc16(buffer: &[u8], start: usize, count: usize) -> Result<u16, WlkError> {
    let in_bounds = start
        .checked_add(count)
        .map(|end| end <= buffer.len())
        .unwrap_or(false);
    if !in_bounds {
        return Err(WlkError::OutOfRange {
            start,
            count,
            len: buffer.len(),
        });
    }
    Ok(crc16_all(&buffer[start..start + count]))
}

/// CRC-16 over a whole slice.
pub fn crc16_all(buffer: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in buffer {
        crc = CRC_TABLE[((crc >> 8) ^ u16::from(byte)) as usize] ^ (crc << 8);
    }
    crc
}

/// True when `buffer` ends with its own big-endian CRC, i.e. the fold
/// over payload + stored CRC comes out 0.
pub fn crc16_verify(buffer: &[u8]) -> bool {
    crc16_all(buffer) == 0
}
