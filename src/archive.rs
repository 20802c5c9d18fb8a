//! Cursor-based reader over one `.wlk` monthly archive file.
//!
//! ```no_run
//! use wlkread::WlkFile;
//!
//! let mut wlk = WlkFile::open("2015-03.wlk")?;
//! while wlk.next_day() {
//!     let summary = wlk.daily_summary1();
//!     println!("day {}: hi {}", wlk.current_day(), summary.hi_out_temp);
//!     while wlk.next_record() {
//!         let rec = wlk.archive_record();
//!         let (h, m) = rec.hour_minute();
//!         println!("  {h:02}:{m:02}  t={}", rec.out_temp);
//!     }
//! }
//! # Ok::<(), wlkread::WlkError>(())
//! ```
//!
//! # Iteration model
//!
//! The reader owns the byte source, the header (parsed once at open), and
//! a two-level cursor: a day slot and an archive-record index within the
//! day.  `next_day` scans the 32-slot day index in strictly ascending
//! order, skipping empty slots; `next_record` walks the day's archive
//! records and stops at the first record that is short or does not carry
//! the observation discriminator.  I/O failures during iteration are
//! absorbed: the cursor goes invalid and the call reports `false`, never
//! an error.  Accessors return fixed all-zero sentinels while the
//! matching validity flag is down, so callers never see stale or
//! uninitialized data.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::WlkError;
use crate::header::{HeaderBlock, HEADER_SIZE};
use crate::record::{ArchiveRecord, DailySummary1, DailySummary2};

pub struct WlkFile<R: Read + Seek> {
    source:         R,
    header:         HeaderBlock,
    is_open:        bool,
    current_day:    usize,
    archive_index:  i32,
    day_valid:      bool,
    archive_valid:  bool,
    summary1:       DailySummary1,
    summary2:       DailySummary2,
    archive_record: ArchiveRecord,
}

impl WlkFile<File> {
    /// Open a `.wlk` file from disk and validate its id code.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WlkError> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> WlkFile<R> {
    /// Wrap any seekable byte source.  Fails with
    /// [`WlkError::FormatMismatch`] unless the source opens with the exact
    /// 16-byte id code, or [`WlkError::Io`] if the header cannot be read;
    /// no reader exists on failure.
    pub fn new(mut source: R) -> Result<Self, WlkError> {
        let header = HeaderBlock::read(&mut source)?;
        Ok(Self {
            source,
            header,
            is_open: true,
            current_day: 0,
            archive_index: -1,
            day_valid: false,
            archive_valid: false,
            summary1: DailySummary1::NULL,
            summary2: DailySummary2::NULL,
            archive_record: ArchiveRecord::NULL,
        })
    }

    /// Release the cursor.  Always succeeds and is re-entrant; after close
    /// all iteration reports `false` and [`record_count`](Self::record_count)
    /// returns -1.
    pub fn close(&mut self) {
        self.is_open = false;
        self.day_valid = false;
        self.archive_valid = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // ── Day iteration ─────────────────────────────────────────────────────

    /// Reset the cursor to just before the first slot and advance to the
    /// first populated day.  Idempotent on a freshly opened reader.
    pub fn first_day(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.current_day = 0;
        self.day_valid = false;
        self.archive_valid = false;
        self.next_day()
    }

    /// Advance to the next day slot with a non-zero record count.
    ///
    /// Slots are scanned strictly ascending; the first qualifying slot
    /// wins.  When no slot remains the cursor wraps: `current_day` resets
    /// to 0, both validity flags drop, and the call returns `false`.  A
    /// found day loads and validates the two daily summaries
    /// (discriminators 2 then 3); on a discriminator mismatch the day is
    /// reported invalid but the cursor stays put, so a further call keeps
    /// scanning.  The archive cursor is always reset here.
    pub fn next_day(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        if self.current_day >= 31 {
            self.day_valid = false;
            self.archive_valid = false;
            self.current_day = 0;
            return false;
        }

        let mut found = false;
        while self.current_day <= 30 && !found {
            self.current_day += 1;
            if self.header.day_index[self.current_day].records_in_day != 0 {
                found = true;
            }
        }
        if !found {
            self.day_valid = false;
            self.archive_valid = false;
            self.current_day = 0;
            return false;
        }

        self.archive_valid = false;
        self.archive_index = -1;
        // Any decode anomaly here, I/O included, degrades to "day invalid".
        self.day_valid = self.load_summaries().unwrap_or(false);
        self.day_valid
    }

    fn load_summaries(&mut self) -> Result<bool, WlkError> {
        let start_pos = self.header.day_index[self.current_day].start_pos;
        let offset = HEADER_SIZE as i64 + DailySummary1::SIZE as i64 * i64::from(start_pos);
        self.seek_to(offset)?;

        let s1 = DailySummary1::read(&mut self.source)?;
        let s2 = DailySummary2::read(&mut self.source)?;
        if s1.data_type != DailySummary1::DATA_TYPE || s2.data_type != DailySummary2::DATA_TYPE {
            return Ok(false);
        }
        self.summary1 = s1;
        self.summary2 = s2;
        Ok(true)
    }

    // ── Record iteration ──────────────────────────────────────────────────

    /// Fixed success without touching the cursor.
    ///
    /// The original library returned `true` here without rewinding the
    /// archive index, and downstream consumers may depend on the resulting
    /// iteration counts, so the behavior is reproduced verbatim.  Use
    /// [`next_day`](Self::next_day) to restart a day's records.
    pub fn first_record(&mut self) -> bool {
        true
    }

    /// Advance to the day's next archive record.
    ///
    /// Requires a valid day.  `records_in_day` counts the summary pair,
    /// so the cursor fails closed once the index reaches
    /// `records_in_day - 3`; that bound is a property of the format.  A
    /// short read or a record whose `data_type` is not 1 invalidates the
    /// archive cursor and reports `false` (stop-at-first-bad, never
    /// skip-and-continue within one call).
    pub fn next_record(&mut self) -> bool {
        if !self.is_open || !self.day_valid {
            self.archive_valid = false;
            return false;
        }

        let entry = self.header.day_index[self.current_day];
        if self.archive_index >= i32::from(entry.records_in_day) - 3 {
            self.archive_valid = false;
            return false;
        }
        self.archive_index += 1;

        match self.load_archive_record(entry.start_pos) {
            Ok(rec) if rec.data_type == ArchiveRecord::DATA_TYPE => {
                self.archive_record = rec;
                self.archive_valid = true;
                true
            }
            Ok(_) | Err(_) => {
                self.archive_valid = false;
                false
            }
        }
    }

    fn load_archive_record(&mut self, start_pos: i32) -> Result<ArchiveRecord, WlkError> {
        let offset = HEADER_SIZE as i64
            + DailySummary1::SIZE as i64 * (i64::from(start_pos) + 2)
            + ArchiveRecord::SIZE as i64 * i64::from(self.archive_index);
        self.seek_to(offset)?;
        Ok(ArchiveRecord::read(&mut self.source)?)
    }

    fn seek_to(&mut self, offset: i64) -> Result<(), WlkError> {
        let offset = u64::try_from(offset)
            .map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
        self.source.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Last decoded daily summary 1, or the null sentinel while the day
    /// cursor is invalid.
    pub fn daily_summary1(&self) -> &DailySummary1 {
        if self.day_valid {
            &self.summary1
        } else {
            &DailySummary1::NULL
        }
    }

    pub fn daily_summary2(&self) -> &DailySummary2 {
        if self.day_valid {
            &self.summary2
        } else {
            &DailySummary2::NULL
        }
    }

    /// Last decoded archive record, or the null sentinel while the record
    /// cursor is invalid.
    pub fn archive_record(&self) -> &ArchiveRecord {
        if self.archive_valid {
            &self.archive_record
        } else {
            &ArchiveRecord::NULL
        }
    }

    /// Header's total record count, or -1 when the reader is closed.
    pub fn record_count(&self) -> i32 {
        if self.is_open {
            self.header.total_records
        } else {
            -1
        }
    }

    /// Current day slot (0 when no day has been entered or after a wrap).
    pub fn current_day(&self) -> usize {
        self.current_day
    }

    pub fn day_valid(&self) -> bool {
        self.day_valid
    }

    pub fn archive_valid(&self) -> bool {
        self.archive_valid
    }

    /// The parsed header block.
    pub fn header(&self) -> &HeaderBlock {
        &self.header
    }
}
