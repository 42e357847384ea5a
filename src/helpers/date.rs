//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a date in Brazilian Portuguese long form
///
/// # Examples
/// ```ignore
/// long_date_pt_br(&date) // -> "02 de maio de 2021"
/// ```
pub fn long_date_pt_br<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

/// Format a date in English long form (like "May 02, 2021")
pub fn long_date_en<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    format!(
        "{} {:02}, {}",
        MONTHS_EN[date.month0() as usize],
        date.day(),
        date.year()
    )
}

/// Format a date in long form for a site language, in the given timezone
///
/// Portuguese is used for `pt*` languages and for anything unrecognized.
pub fn long_date<Tz: TimeZone, Z: TimeZone>(
    date: &DateTime<Tz>,
    tz: &Z,
    language: &str,
) -> String {
    let local = date.with_timezone(tz);
    if language.to_ascii_lowercase().starts_with("en") {
        long_date_en(&local)
    } else {
        long_date_pt_br(&local)
    }
}
