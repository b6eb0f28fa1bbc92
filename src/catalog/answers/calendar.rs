//! Calendar answers
//!
//! `days_between_with_chrono` needs the `calendar` feature; without it the
//! answer still registers but raises `Fault::Unavailable` when called.

use regex::Regex;
use serde_json::{json, Value};

use crate::catalog::questions::calendar as q;
use crate::catalog::{Catalog, CatalogError};
use crate::fault::{Fallible, Fault};
use crate::introspect::tracer;
use crate::unit::{CodeUnit, Origin, SourceFile};
use crate::value::as_str;
use crate::answer;

static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("calendar.rs"));
static DAYS_FROM_CIVIL: CodeUnit = CodeUnit::new("days_from_civil", Origin::BuildingBlocks, &SOURCE);

#[cfg(feature = "calendar")]
fn days_between_with_chrono(start: &Value, end: &Value) -> Fallible {
    use chrono::NaiveDate;

    let parse = |date: &Value| -> Result<NaiveDate, Fault> {
        NaiveDate::parse_from_str(as_str(date)?, "%Y-%m-%d")
            .map_err(|e| Fault::Value(format!("{}: {}", e, date)))
    };
    Ok(json!((parse(end)? - parse(start)?).num_days()))
}

#[cfg(not(feature = "calendar"))]
fn days_between_with_chrono(_start: &Value, _end: &Value) -> Fallible {
    Err(Fault::Unavailable("chrono (build with --features calendar)".into()))
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    tracer::enter(&DAYS_FROM_CIVIL);
    let year = if month <= 2 { year - 1 } else { year };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let year_of_era = year - era * 400;
    let day_of_year = (153 * ((month + 9) % 12) + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn parse_iso_date(date: &Value) -> Result<(i64, i64, i64), Fault> {
    let pattern = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").map_err(|e| Fault::Value(e.to_string()))?;
    let text = as_str(date)?;
    let invalid = || Fault::Value(format!("invalid date {}", text));
    let captures = pattern.captures(text).ok_or_else(invalid)?;
    let field = |i: usize| captures[i].parse::<i64>().map_err(|_| invalid());
    let (year, month, day) = (field(1)?, field(2)?, field(3)?);

    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    let month_length = match month {
        2 if leap => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        1..=12 => 31,
        _ => return Err(invalid()),
    };
    if !(1..=month_length).contains(&day) {
        return Err(invalid());
    }
    Ok((year, month, day))
}

fn days_between_with_civil_days(start: &Value, end: &Value) -> Fallible {
    let (y1, m1, d1) = parse_iso_date(start)?;
    let (y2, m2, d2) = parse_iso_date(end)?;
    Ok(json!(days_from_civil(y2, m2, d2) - days_from_civil(y1, m1, d1)))
}

answer! { pub static DAYS_BETWEEN_WITH_CHRONO = days_between_with_chrono(start, end) in SOURCE; }
answer! { pub static DAYS_BETWEEN_WITH_CIVIL_DAYS = days_between_with_civil_days(start, end) in SOURCE; }

pub fn register(catalog: &mut Catalog) -> Result<(), CatalogError> {
    catalog.add_answer(&DAYS_BETWEEN_WITH_CHRONO, &[&q::DAYS_BETWEEN])?;
    catalog.add_answer(&DAYS_BETWEEN_WITH_CIVIL_DAYS, &[&q::DAYS_BETWEEN])
}
