use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wlkread::{WlkFile, WlkError};

#[derive(Parser)]
#[command(name = "wlkread", about = "Inspect Davis WeatherLink .wlk archive files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header metadata
    Info { input: PathBuf },
    /// List populated days with their summary extremes
    Days { input: PathBuf },
    /// Walk the archive records
    Dump {
        input: PathBuf,
        /// Restrict output to one day of the month (1-31)
        #[arg(short, long)]
        day: Option<usize>,
        /// Emit one JSON object per record
        #[arg(long)]
        json: bool,
        /// Month covered by the file as YYYY-MM; overrides the file-stem
        /// convention
        #[arg(long, value_parser = parse_month)]
        month: Option<chrono::NaiveDate>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input } => {
            let wlk = WlkFile::open(&input)?;
            let header = wlk.header();
            println!("── .wlk archive ────────────────────────────────────────");
            println!("  Path            {}", input.display());
            println!("  Id code         {}", hex::encode(header.id_code));
            println!("  Total records   {}", wlk.record_count());
            println!("  Populated days  {}", header.populated_days());
            if let Some(month) = month_from_stem(&input) {
                println!("  Month           {}", month.format("%Y-%m"));
            }
        }

        // ── Days ─────────────────────────────────────────────────────────────
        Commands::Days { input } => {
            let mut wlk = WlkFile::open(&input)?;
            println!("{:>3} {:>8} {:>8}  {:>7} {:>7} {:>7}  span",
                     "day", "records", "start", "hi_out", "low_out", "rain");
            while wlk.next_day() {
                let day = wlk.current_day();
                let entry = wlk.header().day_index[day];
                let s1 = wlk.daily_summary1();
                // Raw instrument units: temps in tenths F, rain total in
                // thousandths of an inch.
                println!("{:>3} {:>8} {:>8}  {:>7} {:>7} {:>7}  {} min",
                         day, entry.records_in_day, entry.start_pos,
                         s1.hi_out_temp, s1.low_out_temp, s1.daily_rain_total,
                         s1.data_span);
            }
        }

        // ── Dump ─────────────────────────────────────────────────────────────
        Commands::Dump { input, day, json, month } => {
            let month = resolve_month(month, &input);
            let mut wlk = WlkFile::open(&input)?;
            while wlk.next_day() {
                let current = wlk.current_day();
                if day.map(|d| d != current).unwrap_or(false) {
                    continue;
                }
                while wlk.next_record() {
                    let rec = wlk.archive_record();
                    if json {
                        println!("{}", serde_json::to_string(rec)?);
                        continue;
                    }
                    let (h, m) = rec.hour_minute();
                    let label = match month.and_then(|d| d.with_day(current as u32)) {
                        Some(date) => format!("{date} {h:02}:{m:02}"),
                        None => format!("day {current:02} {h:02}:{m:02}"),
                    };
                    let rain = rec.rain_depth_mm()
                        .map(|mm| format!("{mm:.2}mm"))
                        .unwrap_or_else(|e| match e {
                            WlkError::UnknownRainCollector(code) => {
                                format!("?collector={code:#x}")
                            }
                            _ => "?".into(),
                        });
                    // Raw instrument units on purpose: tenths F, tenths %,
                    // thousandths inHg.  Conversion belongs to the consumer.
                    println!(
                        "{label}  t_out={} t_in={} hum={} bar={} wind={} rain={}",
                        rec.out_temp, rec.in_temp, rec.out_hum, rec.barometer,
                        rec.wind_speed, rain,
                    );
                }
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

/// Parse a `YYYY-MM` month designation to the first of that month.
fn parse_month(s: &str) -> Result<chrono::NaiveDate, String> {
    let err = || format!("expected YYYY-MM, got {s:?}");
    let (year, month) = s.split_once('-').ok_or_else(err)?;
    let year: i32 = year.parse().map_err(|_| err())?;
    let month: u32 = month.parse().map_err(|_| err())?;
    chrono::NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(err)
}

/// Month label for a dump: an explicit `--month` wins, otherwise fall
/// back to the `YYYY-MM.wlk` file-naming convention.
fn resolve_month(explicit: Option<chrono::NaiveDate>, path: &Path) -> Option<chrono::NaiveDate> {
    explicit.or_else(|| month_from_stem(path))
}

/// Monthly `.wlk` files are conventionally named `YYYY-MM.wlk`; recover
/// the month from such a stem so records can be labelled with full dates.
fn month_from_stem(path: &Path) -> Option<chrono::NaiveDate> {
    parse_month(path.file_stem()?.to_str()?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_argument() {
        assert_eq!(
            parse_month("2015-03"),
            Ok(chrono::NaiveDate::from_ymd_opt(2015, 3, 1).unwrap())
        );
        assert!(parse_month("2015").is_err());
        assert!(parse_month("2015-13").is_err());
        assert!(parse_month("03-2015").is_err());
    }

    #[test]
    fn month_flag_overrides_file_stem() {
        let path = Path::new("2015-03.wlk");
        let explicit = chrono::NaiveDate::from_ymd_opt(2014, 7, 1);
        assert_eq!(resolve_month(explicit, path), explicit);
        assert_eq!(
            resolve_month(None, path),
            chrono::NaiveDate::from_ymd_opt(2015, 3, 1)
        );
        assert_eq!(resolve_month(None, Path::new("station.wlk")), None);
    }

    #[test]
    fn dump_accepts_month_flag() {
        let cli =
            Cli::try_parse_from(["wlkread", "dump", "x.wlk", "--month", "2014-07"]).unwrap();
        match cli.command {
            Commands::Dump { month, .. } => {
                assert_eq!(month, chrono::NaiveDate::from_ymd_opt(2014, 7, 1));
            }
            _ => panic!("expected the dump subcommand"),
        }
    }
}
