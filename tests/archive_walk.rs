use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Cursor;
use wlkread::header::{DAY_SLOTS, HEADER_SIZE, ID_CODE};
use wlkread::{ArchiveRecord, DailySummary1, DailySummary2, WlkError, WlkFile};

// ── Synthetic file builder ────────────────────────────────────────────────────

const REC: usize = 88;

fn summary1_bytes(hi_out_temp: i16) -> [u8; REC] {
    let mut buf = [0u8; REC];
    buf[0] = 2;
    buf[4..6].copy_from_slice(&hi_out_temp.to_le_bytes());
    buf
}

fn summary2_bytes() -> [u8; REC] {
    let mut buf = [0u8; REC];
    buf[0] = 3;
    buf
}

fn archive_bytes(data_type: u8, minutes: i16, rain: u16) -> [u8; REC] {
    let mut buf = [0u8; REC];
    buf[0] = data_type;
    buf[4..6].copy_from_slice(&minutes.to_le_bytes());
    buf[20..22].copy_from_slice(&rain.to_le_bytes());
    buf
}

/// One synthetic day: which slot it occupies and its record blocks
/// (summaries first).  `records_in_day` counts every block, summary
/// pair included, as real files do.
struct Day {
    slot:   usize,
    blocks: Vec<[u8; REC]>,
}

impl Day {
    /// A well-formed day with `n` walkable archive records.
    fn valid(slot: usize, n: usize) -> Day {
        let mut blocks = vec![summary1_bytes(850), summary2_bytes()];
        for i in 0..n {
            blocks.push(archive_bytes(1, (i as i16 + 1) * 30, 0x1005));
        }
        Day { slot, blocks }
    }
}

fn build_wlk(days: &[Day]) -> Vec<u8> {
    let mut index = [(0i16, 0i32); DAY_SLOTS];
    let mut body: Vec<u8> = Vec::new();
    let mut start_pos = 0i32;
    let mut total = 0i32;
    for day in days {
        index[day.slot] = (day.blocks.len() as i16, start_pos);
        start_pos += day.blocks.len() as i32;
        total += day.blocks.len() as i32;
        for block in &day.blocks {
            body.extend_from_slice(block);
        }
    }

    let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
    buf.extend_from_slice(&ID_CODE);
    buf.write_i32::<LittleEndian>(total).unwrap();
    for (count, start) in index {
        buf.write_i16::<LittleEndian>(count).unwrap();
        buf.write_i32::<LittleEndian>(start).unwrap();
    }
    buf.extend_from_slice(&body);
    buf
}

fn open(bytes: Vec<u8>) -> WlkFile<Cursor<Vec<u8>>> {
    WlkFile::new(Cursor::new(bytes)).unwrap()
}

// ── Open / close ──────────────────────────────────────────────────────────────

#[test]
fn open_rejects_wrong_id_code() {
    let mut bytes = build_wlk(&[Day::valid(1, 3)]);
    bytes[6] = b'2'; // WDAT5.2
    assert!(matches!(
        WlkFile::new(Cursor::new(bytes)),
        Err(WlkError::FormatMismatch)
    ));
}

#[test]
fn open_on_truncated_source_is_io_error() {
    let bytes = build_wlk(&[Day::valid(1, 3)]);
    assert!(matches!(
        WlkFile::new(Cursor::new(bytes[..100].to_vec())),
        Err(WlkError::Io(_))
    ));
}

#[test]
fn accessors_return_sentinels_after_open() {
    let wlk = open(build_wlk(&[Day::valid(1, 3)]));
    assert_eq!(*wlk.daily_summary1(), DailySummary1::NULL);
    assert_eq!(*wlk.daily_summary2(), DailySummary2::NULL);
    assert_eq!(*wlk.archive_record(), ArchiveRecord::NULL);
    assert_eq!(wlk.current_day(), 0);
    assert!(!wlk.day_valid());
    assert!(!wlk.archive_valid());
}

#[test]
fn close_is_reentrant_and_final() {
    let mut wlk = open(build_wlk(&[Day::valid(1, 3)]));
    assert_eq!(wlk.record_count(), 5); // 2 summaries + 3 records
    wlk.close();
    wlk.close();
    assert!(!wlk.is_open());
    assert_eq!(wlk.record_count(), -1);
    assert!(!wlk.next_day());
    assert!(!wlk.next_record());
    assert_eq!(*wlk.daily_summary1(), DailySummary1::NULL);
}

// ── Full walk (spec round trip) ───────────────────────────────────────────────

#[test]
fn walks_one_day_with_three_records() {
    let mut wlk = open(build_wlk(&[Day::valid(5, 3)]));

    assert!(wlk.next_day());
    assert_eq!(wlk.current_day(), 5);
    assert_eq!(wlk.daily_summary1().hi_out_temp, 850);
    assert_eq!(wlk.daily_summary2().data_type, 3);

    for i in 0..3 {
        assert!(wlk.next_record(), "record {i} should be readable");
        let rec = wlk.archive_record();
        assert_eq!(rec.data_type, 1);
        assert_eq!(rec.packed_time, (i + 1) * 30);
        assert_eq!(rec.rain_clicks(), 5);
    }

    // Boundary reached: the fourth call fails closed.
    assert!(!wlk.next_record());
    assert!(!wlk.archive_valid());
    assert_eq!(*wlk.archive_record(), ArchiveRecord::NULL);

    // No further day: wrap, reset to 0.
    assert!(!wlk.next_day());
    assert_eq!(wlk.current_day(), 0);
    assert!(!wlk.day_valid());
}

#[test]
fn skips_empty_day_slots_in_ascending_order() {
    let mut wlk = open(build_wlk(&[Day::valid(5, 1), Day::valid(17, 1), Day::valid(31, 1)]));
    assert!(wlk.next_day());
    assert_eq!(wlk.current_day(), 5);
    assert!(wlk.next_day());
    assert_eq!(wlk.current_day(), 17);
    assert!(wlk.next_day());
    assert_eq!(wlk.current_day(), 31);
    assert!(!wlk.next_day());
    assert_eq!(wlk.current_day(), 0);
    // The wrap rearms the scan: a further call starts over from slot 1.
    assert!(wlk.next_day());
    assert_eq!(wlk.current_day(), 5);
}

#[test]
fn first_day_is_idempotent_on_fresh_reader() {
    let mut wlk = open(build_wlk(&[Day::valid(9, 2)]));
    assert!(wlk.first_day());
    assert_eq!(wlk.current_day(), 9);
    // Walk a record, then rewind.
    assert!(wlk.next_record());
    assert!(wlk.first_day());
    assert_eq!(wlk.current_day(), 9);
    assert!(!wlk.archive_valid());
    assert!(wlk.next_record());
    assert_eq!(wlk.archive_record().packed_time, 30);
}

#[test]
fn first_record_is_a_fixed_noop() {
    let mut wlk = open(build_wlk(&[Day::valid(2, 2)]));
    assert!(wlk.first_record()); // succeeds even before any day
    assert!(wlk.next_day());
    assert!(wlk.next_record());
    assert!(wlk.next_record());
    let before = *wlk.archive_record();
    assert!(wlk.first_record());
    // No rewind: cursor and current record are untouched.
    assert_eq!(*wlk.archive_record(), before);
    assert!(!wlk.next_record());
}

// ── Degradation paths ─────────────────────────────────────────────────────────

#[test]
fn stops_at_first_non_data_record() {
    let mut day = Day::valid(4, 3);
    day.blocks[3] = archive_bytes(0, 60, 0); // second record slot is not an observation
    let mut wlk = open(build_wlk(&[day]));

    assert!(wlk.next_day());
    assert!(wlk.next_record());
    assert!(!wlk.next_record()); // halts at the bad record, no skip-ahead
    assert!(!wlk.archive_valid());
    assert_eq!(*wlk.archive_record(), ArchiveRecord::NULL);
}

#[test]
fn bad_summary_discriminator_invalidates_day_but_scan_continues() {
    let mut bad = Day::valid(3, 1);
    bad.blocks[1][0] = 9; // summary 2 carries the wrong type byte
    let good = Day::valid(7, 1);
    let mut wlk = open(build_wlk(&[bad, good]));

    assert!(!wlk.next_day());
    assert_eq!(wlk.current_day(), 3);
    assert_eq!(*wlk.daily_summary1(), DailySummary1::NULL);
    assert!(!wlk.next_record()); // archive iteration needs a valid day

    // The cursor did not wrap; scanning resumes past the bad day.
    assert!(wlk.next_day());
    assert_eq!(wlk.current_day(), 7);
    assert!(wlk.next_record());
}

#[test]
fn truncated_day_degrades_to_no_more_data() {
    // Day index promises three records but the file ends mid-record.
    let mut bytes = build_wlk(&[Day::valid(1, 3)]);
    bytes.truncate(HEADER_SIZE + 2 * REC + 40);
    let mut wlk = WlkFile::new(Cursor::new(bytes)).unwrap();

    assert!(wlk.next_day());
    assert!(!wlk.next_record());
    assert!(!wlk.archive_valid());
    // The reader stays usable.
    assert!(!wlk.next_day());
    wlk.close();
    assert_eq!(wlk.record_count(), -1);
}

#[test]
fn day_with_only_summaries_yields_no_records() {
    let day = Day { slot: 12, blocks: vec![summary1_bytes(700), summary2_bytes()] };
    let mut wlk = open(build_wlk(&[day]));
    assert!(wlk.next_day());
    assert!(!wlk.next_record());
    assert!(!wlk.archive_valid());
}

// ── On-disk path ──────────────────────────────────────────────────────────────

#[test]
fn opens_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2015-03.wlk");
    std::fs::write(&path, build_wlk(&[Day::valid(29, 2)])).unwrap();

    let mut wlk = WlkFile::open(&path).unwrap();
    assert_eq!(wlk.record_count(), 4);
    assert!(wlk.next_day());
    assert_eq!(wlk.current_day(), 29);
    assert!(wlk.next_record());
    assert_eq!(wlk.archive_record().rain_depth_mm().unwrap(), 5.0 * 0.254);
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        WlkFile::open(dir.path().join("absent.wlk")),
        Err(WlkError::Io(_))
    ));
}
