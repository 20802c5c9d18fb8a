//! The fixed 212-byte header block at the front of every `.wlk` file.
//!
//! Layout (little-endian, densely packed):
//!
//! | Offset | Size | Field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 16   | id code (magic, exact match required)  |
//! | 16     | 4    | total record count (i32)               |
//! | 20     | 192  | 32 × day index entry (i16 + i32)       |
//!
//! Day-index slot 0 is unused; slots 1..=31 map days of the month the
//! file covers.  `start_pos` is measured in 88-byte record units past the
//! header, not in bytes.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::error::WlkError;

/// The id code of a WLK 5.3 file: ASCII `WDAT5.3`, seven NUL bytes, then
/// the raw byte values 5 and 3 (not ASCII digits).
pub const ID_CODE: [u8; 16] = [
    b'W', b'D', b'A', b'T', b'5', b'.', b'3', 0, 0, 0, 0, 0, 0, 0, 5, 3,
];

/// Day-index slots, including the unused slot 0.
pub const DAY_SLOTS: usize = 32;

/// Total header size in bytes.
pub const HEADER_SIZE: usize = 16 + 4 + DAY_SLOTS * 6;

/// One slot of the day index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayIndexEntry {
    /// Number of 88-byte records for this day, including the two daily
    /// summaries.  Zero means the day is absent.
    pub records_in_day: i16,
    /// Offset of the day's first record, in 88-byte units past the header.
    pub start_pos: i32,
}

#[derive(Debug, Clone)]
pub struct HeaderBlock {
    pub id_code:       [u8; 16],
    pub total_records: i32,
    pub day_index:     [DayIndexEntry; DAY_SLOTS],
}

impl HeaderBlock {
    /// Parse the header from the start of `reader`.
    ///
    /// Rejects anything whose first 16 bytes are not exactly [`ID_CODE`]
    /// with [`WlkError::FormatMismatch`]; a short or unreadable source
    /// surfaces as [`WlkError::Io`].
    pub fn read<R: Read>(mut reader: R) -> Result<Self, WlkError> {
        let mut id_code = [0u8; 16];
        reader.read_exact(&mut id_code)?;
        if id_code != ID_CODE {
            return Err(WlkError::FormatMismatch);
        }

        let total_records = reader.read_i32::<LittleEndian>()?;

        let mut day_index = [DayIndexEntry::default(); DAY_SLOTS];
        for entry in day_index.iter_mut() {
            entry.records_in_day = reader.read_i16::<LittleEndian>()?;
            entry.start_pos = reader.read_i32::<LittleEndian>()?;
        }

        Ok(Self { id_code, total_records, day_index })
    }

    /// Number of day slots with at least one record (slot 0 excluded).
    pub fn populated_days(&self) -> usize {
        self.day_index[1..]
            .iter()
            .filter(|e| e.records_in_day != 0)
            .count()
    }
}
