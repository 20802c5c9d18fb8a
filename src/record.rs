//! Fixed-layout record codec for the WLK format family.
//!
//! Four record shapes exist:
//!
//! - [`DailySummary1`] / [`DailySummary2`]: the two 88-byte aggregate
//!   records stored back-to-back at the start of every day, discriminated
//!   by a leading type byte of 2 and 3 respectively.
//! - [`ArchiveRecord`]: the 88-byte sub-daily observation stored in the
//!   `.wlk` file, type byte 1.  Its `packed_time` counts minutes past
//!   local midnight.
//! - [`DumpRecord`]: the 52-byte legacy/IP wire observation carried in
//!   DMP/DMPAFT pages.  It has no type byte; instead it opens with a
//!   16-bit [`PackedDate`] and an HHMM-style time (`hours*100 + minutes`).
//!
//! Both time encodings appear in real data, so both decode paths are kept
//! separate; the record kind fixes which one applies, the codec never
//! guesses.
//!
//! Every field occupies an exact little-endian byte span; decoding uses
//! explicit reads, never in-memory struct casts, so the layout holds on
//! any target.  All decoders are pure `bytes -> record` transformations.

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;
use std::io::{self, Read};

use crate::error::WlkError;

fn check_len(buf: &[u8], need: usize) -> Result<(), WlkError> {
    if buf.len() < need {
        return Err(WlkError::OutOfRange {
            start: 0,
            count: need,
            len:   buf.len(),
        });
    }
    Ok(())
}

// ── Packed date (5/4/7-bit day/month/year) ───────────────────────────────────

/// Calendar date packed into 16 bits: day in the low 5 bits, month in the
/// next 4, year offset from 2000 in the top 7.  Extraction is explicit
/// mask/shift; the components live as plain integers afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackedDate {
    pub day:   u8,
    pub month: u8,
    pub year:  u16,
}

impl PackedDate {
    pub fn from_raw(raw: u16) -> Self {
        Self {
            day:   (raw & 0x1F) as u8,
            month: ((raw >> 5) & 0x0F) as u8,
            year:  (raw >> 9) + 2000,
        }
    }

    pub fn to_raw(self) -> u16 {
        u16::from(self.day & 0x1F)
            | (u16::from(self.month & 0x0F) << 5)
            | ((self.year.saturating_sub(2000) & 0x7F) << 9)
    }

    /// Whether the components satisfy `day in 1..=31, month in 1..=12`.
    pub fn is_valid(&self) -> bool {
        (1..=31).contains(&self.day) && (1..=12).contains(&self.month)
    }

    /// Calendar conversion for display layers.  `None` when the packed
    /// components do not name a real date.
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )
    }
}

// ── Rain collector ───────────────────────────────────────────────────────────

/// Rain-collector resolution, keyed on the top nibble of a `rain` field.
/// The bottom 12 bits of that field are the raw tip count; depth is
/// `tips * resolution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RainCollector {
    /// Code 0x0, 0.1 in per tip (2.54 mm).
    TenthInch,
    /// Code 0x1, 0.01 in per tip (0.254 mm).
    HundredthInch,
    /// Code 0x2, 0.2 mm per tip.
    PointTwoMm,
    /// Code 0x3, 1.0 mm per tip.
    OneMm,
    /// Code 0x6, 0.1 mm per tip.
    PointOneMm,
}

impl RainCollector {
    /// Resolve a collector nibble.  Any code outside the five defined
    /// values is [`WlkError::UnknownRainCollector`]; the original library
    /// aborted the process here, we hand the caller a typed error instead.
    pub fn from_code(code: u8) -> Result<Self, WlkError> {
        match code {
            0x0 => Ok(RainCollector::TenthInch),
            0x1 => Ok(RainCollector::HundredthInch),
            0x2 => Ok(RainCollector::PointTwoMm),
            0x3 => Ok(RainCollector::OneMm),
            0x6 => Ok(RainCollector::PointOneMm),
            other => Err(WlkError::UnknownRainCollector(other)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            RainCollector::TenthInch     => 0x0,
            RainCollector::HundredthInch => 0x1,
            RainCollector::PointTwoMm    => 0x2,
            RainCollector::OneMm         => 0x3,
            RainCollector::PointOneMm    => 0x6,
        }
    }

    /// Millimetres of rain per bucket tip.
    pub fn resolution_mm(self) -> f64 {
        match self {
            RainCollector::TenthInch     => 2.54,
            RainCollector::HundredthInch => 0.254,
            RainCollector::PointTwoMm    => 0.2,
            RainCollector::OneMm         => 1.0,
            RainCollector::PointOneMm    => 0.1,
        }
    }
}

/// Split a raw `rain` field into collector nibble and tip count.
pub fn split_rain(rain: u16) -> (u8, u16) {
    (((rain >> 12) & 0x0F) as u8, rain & 0x0FFF)
}

/// Decode a raw `rain` field to a depth in millimetres.
pub fn rain_depth_mm(rain: u16) -> Result<f64, WlkError> {
    let (code, tips) = split_rain(rain);
    Ok(f64::from(tips) * RainCollector::from_code(code)?.resolution_mm())
}

// ── Daily summary, variant 1 ─────────────────────────────────────────────────

/// First of the two 88-byte aggregate records stored per day.
/// Temperature/chill/dew values are raw instrument units (tenths of a
/// degree F), barometer thousandths of inHg, humidity tenths of a
/// percent; this crate never converts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySummary1 {
    pub data_type:        u8,
    pub reserved:         u8,
    /// Minutes of the day actually covered by records.
    pub data_span:        i16,
    pub hi_out_temp:      i16,
    pub low_out_temp:     i16,
    pub hi_in_temp:       i16,
    pub low_in_temp:      i16,
    pub avg_out_temp:     i16,
    pub avg_in_temp:      i16,
    pub hi_chill:         i16,
    pub low_chill:        i16,
    pub hi_dew:           i16,
    pub low_dew:          i16,
    pub avg_chill:        i16,
    pub avg_dew:          i16,
    pub hi_out_hum:       i16,
    pub low_out_hum:      i16,
    pub hi_in_hum:        i16,
    pub low_in_hum:       i16,
    pub avg_out_hum:      i16,
    pub hi_bar:           i16,
    pub low_bar:          i16,
    pub avg_bar:          i16,
    pub hi_speed:         i16,
    pub avg_speed:        i16,
    pub daily_wind_run:   i16,
    pub hi_ten_min_speed: i16,
    pub dir_hi_speed:     u8,
    pub hi_ten_min_dir:   u8,
    pub daily_rain_total: i16,
    pub hi_rain_rate:     i16,
    pub daily_uv_dose:    i16,
    pub hi_uv:            u8,
    /// Packed 1.5-byte time-of-extreme fields; opaque to this crate.
    pub time_values:      [u8; 27],
}

impl DailySummary1 {
    pub const SIZE: usize = 88;
    /// Expected `data_type` discriminator.
    pub const DATA_TYPE: u8 = 2;
    /// Value returned by accessors while no day is valid.
    pub const NULL: DailySummary1 = DailySummary1 {
        data_type:        0,
        reserved:         0,
        data_span:        0,
        hi_out_temp:      0,
        low_out_temp:     0,
        hi_in_temp:       0,
        low_in_temp:      0,
        avg_out_temp:     0,
        avg_in_temp:      0,
        hi_chill:         0,
        low_chill:        0,
        hi_dew:           0,
        low_dew:          0,
        avg_chill:        0,
        avg_dew:          0,
        hi_out_hum:       0,
        low_out_hum:      0,
        hi_in_hum:        0,
        low_in_hum:       0,
        avg_out_hum:      0,
        hi_bar:           0,
        low_bar:          0,
        avg_bar:          0,
        hi_speed:         0,
        avg_speed:        0,
        daily_wind_run:   0,
        hi_ten_min_speed: 0,
        dir_hi_speed:     0,
        hi_ten_min_dir:   0,
        daily_rain_total: 0,
        hi_rain_rate:     0,
        daily_uv_dose:    0,
        hi_uv:            0,
        time_values:      [0; 27],
    };

    pub fn read<R: Read>(mut r: R) -> io::Result<Self> {
        let data_type = r.read_u8()?;
        let reserved = r.read_u8()?;
        let data_span = r.read_i16::<LittleEndian>()?;
        let hi_out_temp = r.read_i16::<LittleEndian>()?;
        let low_out_temp = r.read_i16::<LittleEndian>()?;
        let hi_in_temp = r.read_i16::<LittleEndian>()?;
        let low_in_temp = r.read_i16::<LittleEndian>()?;
        let avg_out_temp = r.read_i16::<LittleEndian>()?;
        let avg_in_temp = r.read_i16::<LittleEndian>()?;
        let hi_chill = r.read_i16::<LittleEndian>()?;
        let low_chill = r.read_i16::<LittleEndian>()?;
        let hi_dew = r.read_i16::<LittleEndian>()?;
        let low_dew = r.read_i16::<LittleEndian>()?;
        let avg_chill = r.read_i16::<LittleEndian>()?;
        let avg_dew = r.read_i16::<LittleEndian>()?;
        let hi_out_hum = r.read_i16::<LittleEndian>()?;
        let low_out_hum = r.read_i16::<LittleEndian>()?;
        let hi_in_hum = r.read_i16::<LittleEndian>()?;
        let low_in_hum = r.read_i16::<LittleEndian>()?;
        let avg_out_hum = r.read_i16::<LittleEndian>()?;
        let hi_bar = r.read_i16::<LittleEndian>()?;
        let low_bar = r.read_i16::<LittleEndian>()?;
        let avg_bar = r.read_i16::<LittleEndian>()?;
        let hi_speed = r.read_i16::<LittleEndian>()?;
        let avg_speed = r.read_i16::<LittleEndian>()?;
        let daily_wind_run = r.read_i16::<LittleEndian>()?;
        let hi_ten_min_speed = r.read_i16::<LittleEndian>()?;
        let dir_hi_speed = r.read_u8()?;
        let hi_ten_min_dir = r.read_u8()?;
        let daily_rain_total = r.read_i16::<LittleEndian>()?;
        let hi_rain_rate = r.read_i16::<LittleEndian>()?;
        let daily_uv_dose = r.read_i16::<LittleEndian>()?;
        let hi_uv = r.read_u8()?;
        let mut time_values = [0u8; 27];
        r.read_exact(&mut time_values)?;
        Ok(Self {
            data_type,
            reserved,
            data_span,
            hi_out_temp,
            low_out_temp,
            hi_in_temp,
            low_in_temp,
            avg_out_temp,
            avg_in_temp,
            hi_chill,
            low_chill,
            hi_dew,
            low_dew,
            avg_chill,
            avg_dew,
            hi_out_hum,
            low_out_hum,
            hi_in_hum,
            low_in_hum,
            avg_out_hum,
            hi_bar,
            low_bar,
            avg_bar,
            hi_speed,
            avg_speed,
            daily_wind_run,
            hi_ten_min_speed,
            dir_hi_speed,
            hi_ten_min_dir,
            daily_rain_total,
            hi_rain_rate,
            daily_uv_dose,
            hi_uv,
            time_values,
        })
    }

    /// Bounds-checked decode from a byte slice.
    pub fn decode(buf: &[u8]) -> Result<Self, WlkError> {
        check_len(buf, Self::SIZE)?;
        Ok(Self::read(&buf[..Self::SIZE])?)
    }
}

// ── Daily summary, variant 2 ─────────────────────────────────────────────────

/// Second aggregate record of the day (solar/ET/degree-day side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySummary2 {
    pub data_type:          u8,
    pub reserved:           u8,
    /// Bitmapped weather conditions; unused by the stations this crate
    /// has seen but preserved verbatim.
    pub todays_weather:     u16,
    pub num_wind_packets:   i16,
    pub hi_solar:           i16,
    pub daily_solar_energy: i16,
    pub min_sunlight:       i16,
    pub daily_et_total:     i16,
    pub hi_heat:            i16,
    pub low_heat:           i16,
    pub avg_heat:           i16,
    pub hi_thsw:            i16,
    pub low_thsw:           i16,
    pub hi_thw:             i16,
    pub low_thw:            i16,
    pub integrated_heat_dd: i16,
    pub hi_wet_bulb:        i16,
    pub low_wet_bulb:       i16,
    pub avg_wet_bulb:       i16,
    /// 16 wind-direction bins packed as 1.5-byte counters; opaque here.
    pub dir_bins:           [u8; 24],
    pub time_values:        [u8; 15],
    pub integrated_cool_dd: i16,
    pub reserved2:          [u8; 11],
}

impl DailySummary2 {
    pub const SIZE: usize = 88;
    pub const DATA_TYPE: u8 = 3;
    pub const NULL: DailySummary2 = DailySummary2 {
        data_type:          0,
        reserved:           0,
        todays_weather:     0,
        num_wind_packets:   0,
        hi_solar:           0,
        daily_solar_energy: 0,
        min_sunlight:       0,
        daily_et_total:     0,
        hi_heat:            0,
        low_heat:           0,
        avg_heat:           0,
        hi_thsw:            0,
        low_thsw:           0,
        hi_thw:             0,
        low_thw:            0,
        integrated_heat_dd: 0,
        hi_wet_bulb:        0,
        low_wet_bulb:       0,
        avg_wet_bulb:       0,
        dir_bins:           [0; 24],
        time_values:        [0; 15],
        integrated_cool_dd: 0,
        reserved2:          [0; 11],
    };

    pub fn read<R: Read>(mut r: R) -> io::Result<Self> {
        let data_type = r.read_u8()?;
        let reserved = r.read_u8()?;
        let todays_weather = r.read_u16::<LittleEndian>()?;
        let num_wind_packets = r.read_i16::<LittleEndian>()?;
        let hi_solar = r.read_i16::<LittleEndian>()?;
        let daily_solar_energy = r.read_i16::<LittleEndian>()?;
        let min_sunlight = r.read_i16::<LittleEndian>()?;
        let daily_et_total = r.read_i16::<LittleEndian>()?;
        let hi_heat = r.read_i16::<LittleEndian>()?;
        let low_heat = r.read_i16::<LittleEndian>()?;
        let avg_heat = r.read_i16::<LittleEndian>()?;
        let hi_thsw = r.read_i16::<LittleEndian>()?;
        let low_thsw = r.read_i16::<LittleEndian>()?;
        let hi_thw = r.read_i16::<LittleEndian>()?;
        let low_thw = r.read_i16::<LittleEndian>()?;
        let integrated_heat_dd = r.read_i16::<LittleEndian>()?;
        let hi_wet_bulb = r.read_i16::<LittleEndian>()?;
        let low_wet_bulb = r.read_i16::<LittleEndian>()?;
        let avg_wet_bulb = r.read_i16::<LittleEndian>()?;
        let mut dir_bins = [0u8; 24];
        r.read_exact(&mut dir_bins)?;
        let mut time_values = [0u8; 15];
        r.read_exact(&mut time_values)?;
        let integrated_cool_dd = r.read_i16::<LittleEndian>()?;
        let mut reserved2 = [0u8; 11];
        r.read_exact(&mut reserved2)?;
        Ok(Self {
            data_type,
            reserved,
            todays_weather,
            num_wind_packets,
            hi_solar,
            daily_solar_energy,
            min_sunlight,
            daily_et_total,
            hi_heat,
            low_heat,
            avg_heat,
            hi_thsw,
            low_thsw,
            hi_thw,
            low_thw,
            integrated_heat_dd,
            hi_wet_bulb,
            low_wet_bulb,
            avg_wet_bulb,
            dir_bins,
            time_values,
            integrated_cool_dd,
            reserved2,
        })
    }

    pub fn decode(buf: &[u8]) -> Result<Self, WlkError> {
        check_len(buf, Self::SIZE)?;
        Ok(Self::read(&buf[..Self::SIZE])?)
    }
}

// ── Archive record (on-disk variant) ─────────────────────────────────────────

/// One 88-byte sub-daily observation as stored in the `.wlk` file.
///
/// `packed_time` is minutes past local midnight of the *end* of the
/// archive period; see [`ArchiveRecord::hour_minute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchiveRecord {
    pub data_type:        u8,
    /// Minutes covered by this record.
    pub archive_interval: u8,
    pub icon_flags:       u8,
    pub more_flags:       u8,
    pub packed_time:      i16,
    pub out_temp:         i16,
    pub hi_out_temp:      i16,
    pub low_out_temp:     i16,
    pub in_temp:          i16,
    pub barometer:        i16,
    pub out_hum:          i16,
    pub in_hum:           i16,
    /// Collector nibble in the top 4 bits, raw tip count in the low 12.
    pub rain:             u16,
    pub hi_rain_rate:     i16,
    pub wind_speed:       i16,
    pub hi_wind_speed:    i16,
    pub wind_dir:         u8,
    pub hi_wind_dir:      u8,
    pub num_wind_samples: i16,
    pub solar_rad:        i16,
    pub hi_solar_rad:     i16,
    pub uv:               u8,
    pub hi_uv:            u8,
    pub leaf_temp:        [u8; 4],
    pub extra_rad:        i16,
    pub new_sensors:      [i16; 6],
    pub forecast:         u8,
    pub et:               u8,
    pub soil_temp:        [u8; 6],
    pub soil_moisture:    [u8; 6],
    pub leaf_wetness:     [u8; 4],
    pub extra_temp:       [u8; 7],
    pub extra_hum:        [u8; 7],
}

impl ArchiveRecord {
    pub const SIZE: usize = 88;
    pub const DATA_TYPE: u8 = 1;
    pub const NULL: ArchiveRecord = ArchiveRecord {
        data_type:        0,
        archive_interval: 0,
        icon_flags:       0,
        more_flags:       0,
        packed_time:      0,
        out_temp:         0,
        hi_out_temp:      0,
        low_out_temp:     0,
        in_temp:          0,
        barometer:        0,
        out_hum:          0,
        in_hum:           0,
        rain:             0,
        hi_rain_rate:     0,
        wind_speed:       0,
        hi_wind_speed:    0,
        wind_dir:         0,
        hi_wind_dir:      0,
        num_wind_samples: 0,
        solar_rad:        0,
        hi_solar_rad:     0,
        uv:               0,
        hi_uv:            0,
        leaf_temp:        [0; 4],
        extra_rad:        0,
        new_sensors:      [0; 6],
        forecast:         0,
        et:               0,
        soil_temp:        [0; 6],
        soil_moisture:    [0; 6],
        leaf_wetness:     [0; 4],
        extra_temp:       [0; 7],
        extra_hum:        [0; 7],
    };

    pub fn read<R: Read>(mut r: R) -> io::Result<Self> {
        let data_type = r.read_u8()?;
        let archive_interval = r.read_u8()?;
        let icon_flags = r.read_u8()?;
        let more_flags = r.read_u8()?;
        let packed_time = r.read_i16::<LittleEndian>()?;
        let out_temp = r.read_i16::<LittleEndian>()?;
        let hi_out_temp = r.read_i16::<LittleEndian>()?;
        let low_out_temp = r.read_i16::<LittleEndian>()?;
        let in_temp = r.read_i16::<LittleEndian>()?;
        let barometer = r.read_i16::<LittleEndian>()?;
        let out_hum = r.read_i16::<LittleEndian>()?;
        let in_hum = r.read_i16::<LittleEndian>()?;
        let rain = r.read_u16::<LittleEndian>()?;
        let hi_rain_rate = r.read_i16::<LittleEndian>()?;
        let wind_speed = r.read_i16::<LittleEndian>()?;
        let hi_wind_speed = r.read_i16::<LittleEndian>()?;
        let wind_dir = r.read_u8()?;
        let hi_wind_dir = r.read_u8()?;
        let num_wind_samples = r.read_i16::<LittleEndian>()?;
        let solar_rad = r.read_i16::<LittleEndian>()?;
        let hi_solar_rad = r.read_i16::<LittleEndian>()?;
        let uv = r.read_u8()?;
        let hi_uv = r.read_u8()?;
        let mut leaf_temp = [0u8; 4];
        r.read_exact(&mut leaf_temp)?;
        let extra_rad = r.read_i16::<LittleEndian>()?;
        let mut new_sensors = [0i16; 6];
        for slot in new_sensors.iter_mut() {
            *slot = r.read_i16::<LittleEndian>()?;
        }
        let forecast = r.read_u8()?;
        let et = r.read_u8()?;
        let mut soil_temp = [0u8; 6];
        r.read_exact(&mut soil_temp)?;
        let mut soil_moisture = [0u8; 6];
        r.read_exact(&mut soil_moisture)?;
        let mut leaf_wetness = [0u8; 4];
        r.read_exact(&mut leaf_wetness)?;
        let mut extra_temp = [0u8; 7];
        r.read_exact(&mut extra_temp)?;
        let mut extra_hum = [0u8; 7];
        r.read_exact(&mut extra_hum)?;
        Ok(Self {
            data_type,
            archive_interval,
            icon_flags,
            more_flags,
            packed_time,
            out_temp,
            hi_out_temp,
            low_out_temp,
            in_temp,
            barometer,
            out_hum,
            in_hum,
            rain,
            hi_rain_rate,
            wind_speed,
            hi_wind_speed,
            wind_dir,
            hi_wind_dir,
            num_wind_samples,
            solar_rad,
            hi_solar_rad,
            uv,
            hi_uv,
            leaf_temp,
            extra_rad,
            new_sensors,
            forecast,
            et,
            soil_temp,
            soil_moisture,
            leaf_wetness,
            extra_temp,
            extra_hum,
        })
    }

    pub fn decode(buf: &[u8]) -> Result<Self, WlkError> {
        check_len(buf, Self::SIZE)?;
        Ok(Self::read(&buf[..Self::SIZE])?)
    }

    /// Decode `packed_time` (minutes past midnight) to `(hour, minute)`.
    /// Corrupt values are clamped to the day, 0..=1439.
    pub fn hour_minute(&self) -> (u8, u8) {
        let t = self.packed_time.clamp(0, 1439) as u16;
        ((t / 60) as u8, (t % 60) as u8)
    }

    /// Collector nibble of the rain field.
    pub fn rain_collector(&self) -> Result<RainCollector, WlkError> {
        RainCollector::from_code(split_rain(self.rain).0)
    }

    /// Raw bucket-tip count of the rain field.
    pub fn rain_clicks(&self) -> u16 {
        split_rain(self.rain).1
    }

    /// Rain depth in millimetres for this interval.
    pub fn rain_depth_mm(&self) -> Result<f64, WlkError> {
        rain_depth_mm(self.rain)
    }
}

// ── Dump record (legacy/IP wire variant) ─────────────────────────────────────

/// One 52-byte observation as carried in DMP/DMPAFT dump pages.
///
/// Unlike [`ArchiveRecord`], its `time` field is HHMM-style
/// (`hours*100 + minutes`, at most 2359) and the record opens with a
/// [`PackedDate`] instead of a type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DumpRecord {
    pub date:                PackedDate,
    /// `hours*100 + minutes`; see [`DumpRecord::hour_minute`].
    pub time:                u16,
    pub out_temp:            i16,
    pub hi_out_temp:         i16,
    pub low_out_temp:        i16,
    pub rainfall:            u16,
    pub hi_rain_rate:        u16,
    pub barometer:           u16,
    pub solar_rad:           u16,
    pub num_wind_samples:    u16,
    pub in_temp:             i16,
    pub in_hum:              u8,
    pub out_hum:             u8,
    pub avg_wind_speed:      u8,
    pub hi_wind_speed:       u8,
    pub hi_wind_dir:         u8,
    pub prevailing_wind_dir: u8,
    pub avg_uv:              u8,
    pub et:                  u8,
    pub hi_solar_rad:        u16,
    pub hi_uv:               u8,
    pub forecast_rule:       i8,
    pub leaf_temp:           u16,
    pub leaf_wetness:        u16,
    pub soil_temp:           u32,
    pub record_type:         u8,
    pub unused:              [u8; 9],
}

impl DumpRecord {
    pub const SIZE: usize = 52;

    pub fn read<R: Read>(mut r: R) -> io::Result<Self> {
        let date = PackedDate::from_raw(r.read_u16::<LittleEndian>()?);
        let time = r.read_u16::<LittleEndian>()?;
        let out_temp = r.read_i16::<LittleEndian>()?;
        let hi_out_temp = r.read_i16::<LittleEndian>()?;
        let low_out_temp = r.read_i16::<LittleEndian>()?;
        let rainfall = r.read_u16::<LittleEndian>()?;
        let hi_rain_rate = r.read_u16::<LittleEndian>()?;
        let barometer = r.read_u16::<LittleEndian>()?;
        let solar_rad = r.read_u16::<LittleEndian>()?;
        let num_wind_samples = r.read_u16::<LittleEndian>()?;
        let in_temp = r.read_i16::<LittleEndian>()?;
        let in_hum = r.read_u8()?;
        let out_hum = r.read_u8()?;
        let avg_wind_speed = r.read_u8()?;
        let hi_wind_speed = r.read_u8()?;
        let hi_wind_dir = r.read_u8()?;
        let prevailing_wind_dir = r.read_u8()?;
        let avg_uv = r.read_u8()?;
        let et = r.read_u8()?;
        let hi_solar_rad = r.read_u16::<LittleEndian>()?;
        let hi_uv = r.read_u8()?;
        let forecast_rule = r.read_i8()?;
        let leaf_temp = r.read_u16::<LittleEndian>()?;
        let leaf_wetness = r.read_u16::<LittleEndian>()?;
        let soil_temp = r.read_u32::<LittleEndian>()?;
        let record_type = r.read_u8()?;
        let mut unused = [0u8; 9];
        r.read_exact(&mut unused)?;
        Ok(Self {
            date,
            time,
            out_temp,
            hi_out_temp,
            low_out_temp,
            rainfall,
            hi_rain_rate,
            barometer,
            solar_rad,
            num_wind_samples,
            in_temp,
            in_hum,
            out_hum,
            avg_wind_speed,
            hi_wind_speed,
            hi_wind_dir,
            prevailing_wind_dir,
            avg_uv,
            et,
            hi_solar_rad,
            hi_uv,
            forecast_rule,
            leaf_temp,
            leaf_wetness,
            soil_temp,
            record_type,
            unused,
        })
    }

    pub fn decode(buf: &[u8]) -> Result<Self, WlkError> {
        check_len(buf, Self::SIZE)?;
        Ok(Self::read(&buf[..Self::SIZE])?)
    }

    /// Decode the HHMM-style `time` field to `(hour, minute)`.
    /// Corrupt values are clamped to 2359.
    pub fn hour_minute(&self) -> (u8, u8) {
        let t = self.time.min(2359);
        ((t / 100) as u8, (t % 100) as u8)
    }

    pub fn rain_collector(&self) -> Result<RainCollector, WlkError> {
        RainCollector::from_code(split_rain(self.rainfall).0)
    }

    pub fn rain_clicks(&self) -> u16 {
        split_rain(self.rainfall).1
    }

    pub fn rain_depth_mm(&self) -> Result<f64, WlkError> {
        rain_depth_mm(self.rainfall)
    }
}

impl Default for PackedDate {
    fn default() -> Self {
        PackedDate { day: 0, month: 0, year: 2000 }
    }
}
