//! Crate-wide error type.
//!
//! Only structural problems surface as errors: a file that is not a WLK
//! archive, an I/O failure at open time, a decode request over bytes that
//! are not there, or a rain field carrying a collector code the format
//! does not define.  Per-record anomalies during iteration (short reads,
//! wrong discriminators) are absorbed by the cursor and reported as
//! "no more data" instead; see [`crate::archive`].

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WlkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The 16-byte id code at offset 0 is not the WLK magic.
    #[error("not a WLK archive: id code mismatch")]
    FormatMismatch,

    /// A checksum or decode was requested over bytes outside the buffer.
    #[error("range {start}+{count} exceeds buffer length {len}")]
    OutOfRange {
        start: usize,
        count: usize,
        len:   usize,
    },

    /// The top nibble of a rain field is not one of the five defined
    /// collector codes.
    #[error("unknown rain collector code {0:#03x}")]
    UnknownRainCollector(u8),
}
