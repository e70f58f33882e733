pub use time::Date;
use time::{macros::format_description, Duration, UtcOffset};

pub type StaticDateFormat<'a> =
    &'static [time::format_description::BorrowedFormatItem<'a>];
pub type DynDateFormat = time::format_description::OwnedFormatItem;

// Brokerage exports (1099-B style) use US month-first dates.
pub const STANDARD_DATE_FORMAT: StaticDateFormat =
    format_description!("[month]/[day]/[year]");

// Fallback for exports that don't zero-pad, eg. 1/2/2025
const UNPADDED_DATE_FORMAT: StaticDateFormat =
    format_description!("[month padding:none]/[day padding:none]/[year]");

pub const ISO_DATE_FORMAT: StaticDateFormat =
    format_description!("[year]-[month]-[day]");

pub fn parse_standard_date(date_str: &str) -> Result<Date, time::error::Parse> {
    Date::parse(date_str, STANDARD_DATE_FORMAT)
        .or_else(|e| Date::parse(date_str, UNPADDED_DATE_FORMAT).map_err(|_| e))
}

pub fn parse_iso_date(date_str: &str) -> Result<Date, time::error::Parse> {
    Date::parse(date_str, ISO_DATE_FORMAT)
}

pub fn parse_dyn_date_format(fmt: &str) -> Result<DynDateFormat, String> {
    // The documentation recommends version 2
    const VERSION: usize = 2;
    time::format_description::parse_owned::<VERSION>(fmt)
        .map_err(|e| format!("{}", e))
}

pub fn parse_date(
    date_str: &str,
    fmt: &Option<DynDateFormat>,
) -> Result<Date, time::error::Parse> {
    match fmt {
        Some(fmt_) => Date::parse(date_str, fmt_),
        None => parse_standard_date(date_str),
    }
}

/// Whole calendar days from `earlier` to `later`. Negative if `later`
/// is actually before `earlier`.
pub fn days_between(later: Date, earlier: Date) -> i64 {
    (later - earlier).whole_days()
}

pub fn sub_days(d: Date, days: i64) -> Date {
    d.saturating_sub(Duration::days(days))
}

/// Renders in the same MM/DD/YYYY form the statements use.
pub fn to_standard_string(d: &Date) -> String {
    d.format(STANDARD_DATE_FORMAT).unwrap_or_else(|_| d.to_string())
}

pub fn to_pretty_string(d: &Date) -> String {
    format!("{} {}, {}", d.month(), d.day(), d.year())
}

// This is a (possibly unsafe, but no worse than Local::now) way
// to get the current system UtcOffset of local timezone.
// Using UtcOffset::current_local_offset is apparently unsafe on Linux,
// and will return an error if used without enabling some "unsafe" feature.
pub fn local_utc_offset() -> Result<UtcOffset, time::error::ComponentRange> {
    let now = chrono::offset::Local::now();
    let offset = now.offset();
    UtcOffset::from_whole_seconds(-1 * offset.utc_minus_local())
}

// Used by both unit and integration tests
pub mod pub_testlib {
    use time::{Date, Duration, Month};

    pub fn doy_date(year: u32, day: i64) -> Date {
        Date::from_calendar_date(year as i32, Month::January, 1)
            .unwrap()
            .saturating_add(Duration::days(day))
    }
}
