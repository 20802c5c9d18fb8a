//! Wire constants and passive page decoders for the live-station dump
//! protocol (serial/IP link).
//!
//! No polling state machine lives here; these are format constants plus
//! pure decoders for the two response layouts, kept so a future protocol
//! layer can sit on the same CRC-16 engine.  Link CRCs travel big-endian
//! directly after the payload, so an intact block folds to 0 through
//! [`crate::crc::crc16`].

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Read;

use crate::crc::crc16;
use crate::error::WlkError;
use crate::record::DumpRecord;

/// Maximum transmission unit of the station link.
pub const WL_MTU: usize = 1500;

// ── Command bytes ─────────────────────────────────────────────────────────────

pub const CMD_READ_LINK_MEMORY:    &[u8] = b"RRD";
pub const CMD_READ_ARCHIVE_MEMORY: &[u8] = b"SRD";
pub const CMD_TEST:                &[u8] = b"TEST";
pub const CMD_DMP:                 &[u8] = b"DMP";
pub const CMD_DMPAFT:              &[u8] = b"DMPAFT";
pub const CMD_CLRLOG:              &[u8] = b"CLRLOG";
pub const CMD_SETTIME:             &[u8] = b"SETTIME";

// ── Link control bytes ────────────────────────────────────────────────────────

pub const ACK:    u8 = 0x06;
pub const NAK:    u8 = 0x21;
pub const CANCEL: u8 = 0x18;
pub const LF:     u8 = 0x0A;
pub const CR:     u8 = 0x0D;
pub const ESC:    u8 = 0x1B;

pub const MEMORY_BANK_0: u8 = 0;
pub const MEMORY_BANK_1: u8 = 1;

// ── DMPAFT response ───────────────────────────────────────────────────────────

/// The 6-byte reply to a DMPAFT command: how many dump pages follow and
/// where in the first page the requested data starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmpAftResponse {
    pub pages:        u16,
    pub first_record: u16,
    /// Big-endian CRC over the two preceding fields.
    pub crc:          u16,
}

impl DmpAftResponse {
    pub const SIZE: usize = 6;

    pub fn decode(buf: &[u8]) -> Result<Self, WlkError> {
        if buf.len() < Self::SIZE {
            return Err(WlkError::OutOfRange { start: 0, count: Self::SIZE, len: buf.len() });
        }
        let mut r = &buf[..Self::SIZE];
        Ok(Self {
            pages:        r.read_u16::<LittleEndian>()?,
            first_record: r.read_u16::<LittleEndian>()?,
            crc:          r.read_u16::<BigEndian>()?,
        })
    }

    /// Checksum verdict for a raw response buffer.
    pub fn crc_ok(buf: &[u8]) -> Result<bool, WlkError> {
        Ok(crc16(buf, 0, Self::SIZE)? == 0)
    }
}

// ── Dump page ─────────────────────────────────────────────────────────────────

/// Records carried per dump page.
pub const RECORDS_PER_PAGE: usize = 5;

/// One 267-byte archive dump page: a sequence byte, five 52-byte
/// [`DumpRecord`]s, four unused bytes, and a trailing big-endian CRC over
/// everything before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpPage {
    pub sequence: u8,
    pub records:  [DumpRecord; RECORDS_PER_PAGE],
    pub unused:   [u8; 4],
    pub crc:      u16,
}

impl DumpPage {
    pub const SIZE: usize = 1 + RECORDS_PER_PAGE * DumpRecord::SIZE + 4 + 2;

    /// Layout-only decode; pair with [`DumpPage::crc_ok`] to judge
    /// integrity.
    pub fn decode(buf: &[u8]) -> Result<Self, WlkError> {
        if buf.len() < Self::SIZE {
            return Err(WlkError::OutOfRange { start: 0, count: Self::SIZE, len: buf.len() });
        }
        let mut r = &buf[..Self::SIZE];
        let sequence = r.read_u8()?;
        let mut records = [DumpRecord::default(); RECORDS_PER_PAGE];
        for rec in records.iter_mut() {
            *rec = DumpRecord::read(&mut r)?;
        }
        let mut unused = [0u8; 4];
        r.read_exact(&mut unused)?;
        let crc = r.read_u16::<BigEndian>()?;
        Ok(Self { sequence, records, unused, crc })
    }

    /// Checksum verdict for a raw page buffer.
    pub fn crc_ok(buf: &[u8]) -> Result<bool, WlkError> {
        Ok(crc16(buf, 0, Self::SIZE)? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc::crc16_all;
    use crate::record::PackedDate;

    #[test]
    fn page_size_constant() {
        assert_eq!(DumpPage::SIZE, 267);
    }

    fn dump_record_bytes(day: u8, hhmm: u16) -> [u8; DumpRecord::SIZE] {
        let mut buf = [0u8; DumpRecord::SIZE];
        let raw_date: u16 = u16::from(day) | (6 << 5) | (17 << 9);
        buf[0..2].copy_from_slice(&raw_date.to_le_bytes());
        buf[2..4].copy_from_slice(&hhmm.to_le_bytes());
        buf[42] = 1; // record_type
        buf
    }

    fn page_bytes() -> Vec<u8> {
        let mut buf = vec![3u8]; // sequence
        for i in 0..RECORDS_PER_PAGE as u16 {
            buf.extend_from_slice(&dump_record_bytes(12, 900 + i * 100));
        }
        buf.extend_from_slice(&[0u8; 4]);
        let crc = crc16_all(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());
        buf
    }

    #[test]
    fn decodes_dump_page() {
        let bytes = page_bytes();
        assert!(DumpPage::crc_ok(&bytes).unwrap());

        let page = DumpPage::decode(&bytes).unwrap();
        assert_eq!(page.sequence, 3);
        assert_eq!(page.records[0].date, PackedDate { day: 12, month: 6, year: 2017 });
        assert_eq!(page.records[0].hour_minute(), (9, 0));
        assert_eq!(page.records[4].hour_minute(), (13, 0)); // 900 + 4*100 = 1300
    }

    #[test]
    fn corrupt_page_fails_crc_but_still_decodes() {
        let mut bytes = page_bytes();
        bytes[100] ^= 0xFF;
        assert!(!DumpPage::crc_ok(&bytes).unwrap());
        assert!(DumpPage::decode(&bytes).is_ok());
    }

    #[test]
    fn decodes_dmpaft_response() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&31u16.to_le_bytes()); // pages
        buf.extend_from_slice(&2u16.to_le_bytes()); // first_record
        let crc = crc16_all(&buf);
        buf.extend_from_slice(&crc.to_be_bytes());

        assert!(DmpAftResponse::crc_ok(&buf).unwrap());
        let resp = DmpAftResponse::decode(&buf).unwrap();
        assert_eq!(resp.pages, 31);
        assert_eq!(resp.first_record, 2);
        assert_eq!(resp.crc, crc);
    }

    #[test]
    fn short_buffers_are_out_of_range() {
        assert!(matches!(
            DmpAftResponse::decode(&[0u8; 5]),
            Err(WlkError::OutOfRange { .. })
        ));
        assert!(matches!(
            DumpPage::decode(&[0u8; 266]),
            Err(WlkError::OutOfRange { .. })
        ));
    }
}
