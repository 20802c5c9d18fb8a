pub mod archive;
pub mod crc;
pub mod error;
pub mod header;
pub mod protocol;
pub mod record;

pub use archive::WlkFile;
pub use crc::{crc16, crc16_all, crc16_verify};
pub use error::WlkError;
pub use header::{DayIndexEntry, HeaderBlock, HEADER_SIZE, ID_CODE};
pub use record::{
    ArchiveRecord, DailySummary1, DailySummary2, DumpRecord, PackedDate, RainCollector,
};
