//! Scalar value types used by GTFS tables.
//!
//! Every type parses from the raw CSV text and formats back to its
//! normalized form, so `parse(s).to_string() == s` for normalized input.
//! Parsing never panics; failures are reported as [`ParseError`].

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::error::ParseError;

/// A service date in the `YYYYMMDD` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GtfsDate(NaiveDate);

impl GtfsDate {
    /// Parse an 8-digit `YYYYMMDD` string.
    ///
    /// Dates that do not exist in the Gregorian calendar (e.g. `20210231`)
    /// are rejected rather than clamped.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDate(value.to_string());
        if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = value[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[4..6].parse().map_err(|_| invalid())?;
        let day: u32 = value[6..8].parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Build a date from its components, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl fmt::Display for GtfsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for GtfsDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for GtfsDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A time of the service day, stored as seconds since its start.
///
/// Hours are unbounded: `25:10:00` is the next calendar day, still part of
/// the same service day. Comparison and subtraction never wrap at 24h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GtfsTime(u32);

impl GtfsTime {
    /// Parse `H:MM:SS` or `HH:MM:SS` (any number of hour digits).
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidTime(value.to_string());
        let mut parts = value.split(':');
        let (Some(h), Some(m), Some(s), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if h.is_empty() || m.len() != 2 || s.len() != 2 {
            return Err(invalid());
        }
        if ![h, m, s]
            .iter()
            .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(invalid());
        }
        let hours: u32 = h.parse().map_err(|_| invalid())?;
        let minutes: u32 = m.parse().map_err(|_| invalid())?;
        let seconds: u32 = s.parse().map_err(|_| invalid())?;
        if minutes > 59 || seconds > 59 {
            return Err(invalid());
        }
        Self::from_hms(hours, minutes, seconds).ok_or_else(invalid)
    }

    /// Build a time from components, `None` on overflow or out-of-range minutes/seconds.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if minutes > 59 || seconds > 59 {
            return None;
        }
        hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .map(Self)
    }

    pub fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// Seconds since the start of the service day.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0 / 3600
    }

    pub fn minute(&self) -> u32 {
        self.0 % 3600 / 60
    }

    pub fn second(&self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for GtfsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl FromStr for GtfsTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Signed difference in seconds.
impl Sub for GtfsTime {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        i64::from(self.0) - i64::from(rhs.0)
    }
}

impl Serialize for GtfsTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An RGB color given as six hexadecimal digits, without a leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GtfsColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl GtfsColor {
    pub const WHITE: GtfsColor = GtfsColor::new(255, 255, 255);
    pub const BLACK: GtfsColor = GtfsColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidColor(value.to_string());
        if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let r = u8::from_str_radix(&value[0..2], 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&value[2..4], 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&value[4..6], 16).map_err(|_| invalid())?;
        Ok(Self::new(r, g, b))
    }

    /// Packed `0xRRGGBB` value.
    pub fn rgb(&self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl fmt::Display for GtfsColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for GtfsColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for GtfsColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A value that can be parsed out of a single CSV cell.
///
/// Implemented for every scalar a table schema can declare. Numeric types
/// expose their value so the loader can enforce the range of the column type.
pub trait FieldValue: Sized {
    fn parse_field(raw: &str) -> Result<Self, ParseError>;

    fn numeric_value(&self) -> Option<f64> {
        None
    }
}

impl FieldValue for String {
    fn parse_field(raw: &str) -> Result<Self, ParseError> {
        Ok(raw.to_string())
    }
}

impl FieldValue for GtfsDate {
    fn parse_field(raw: &str) -> Result<Self, ParseError> {
        Self::parse(raw)
    }
}

impl FieldValue for GtfsTime {
    fn parse_field(raw: &str) -> Result<Self, ParseError> {
        Self::parse(raw)
    }
}

impl FieldValue for GtfsColor {
    fn parse_field(raw: &str) -> Result<Self, ParseError> {
        Self::parse(raw)
    }
}

impl FieldValue for i32 {
    fn parse_field(raw: &str) -> Result<Self, ParseError> {
        raw.parse()
            .map_err(|_| ParseError::InvalidInteger(raw.to_string()))
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl FieldValue for f64 {
    fn parse_field(raw: &str) -> Result<Self, ParseError> {
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::InvalidFloat(raw.to_string())),
        }
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = GtfsDate::parse("20201122").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2020, 11, 22));
        assert_eq!(date.to_string(), "20201122");
        assert_eq!(date.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_parse_date_rejects_impossible_dates() {
        assert!(GtfsDate::parse("20210931").is_err());
        assert!(GtfsDate::parse("20210229").is_err());
        assert!(GtfsDate::parse("20201301").is_err());
        assert!(GtfsDate::parse("20200000").is_err());
        assert!(GtfsDate::parse("2020-11-22").is_err());
        assert!(GtfsDate::parse("+2020112").is_err());
        assert!(GtfsDate::parse("").is_err());
        assert!(GtfsDate::parse("20200229").is_ok());
    }

    #[test]
    fn test_date_ordering() {
        let start = GtfsDate::parse("20201210").unwrap();
        let end = GtfsDate::parse("20201122").unwrap();
        assert!(start > end);
        assert_eq!(GtfsDate::from_ymd(2020, 12, 10), Some(start));
        assert_eq!(GtfsDate::from_ymd(2020, 2, 30), None);
    }

    #[test]
    fn test_parse_time_past_midnight() {
        let time = GtfsTime::parse("25:10:00").unwrap();
        assert_eq!(time.seconds_since_midnight(), 25 * 3600 + 600);
        assert_eq!(time.to_string(), "25:10:00");
        assert_eq!((time.hour(), time.minute(), time.second()), (25, 10, 0));
    }

    #[test]
    fn test_parse_time_single_digit_hour() {
        let time = GtfsTime::parse("5:01:02").unwrap();
        assert_eq!(time.to_string(), "05:01:02");
        assert_eq!(time, GtfsTime::from_hms(5, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_time_rejects_malformed() {
        for raw in ["", "12:00", "12:60:00", "12:00:60", "ab:00:00", "12:0:00", "-1:00:00", "1:00:00:00"] {
            assert_eq!(
                GtfsTime::parse(raw),
                Err(ParseError::InvalidTime(raw.to_string())),
                "{raw}"
            );
        }
        assert!(GtfsTime::parse("99999999:00:00").is_err());
    }

    #[test]
    fn test_time_subtraction_does_not_wrap() {
        let late = GtfsTime::parse("24:05:00").unwrap();
        let early = GtfsTime::parse("23:55:00").unwrap();
        assert_eq!(late - early, 600);
        assert_eq!(early - late, -600);
        assert!(early < late);
    }

    #[test]
    fn test_parse_color() {
        let color = GtfsColor::parse("ff00Aa").unwrap();
        assert_eq!(color, GtfsColor::new(255, 0, 170));
        assert_eq!(color.to_string(), "FF00AA");
        assert_eq!(color.rgb(), 0xFF00AA);
        assert!(GtfsColor::parse("#FFFFFF").is_err());
        assert!(GtfsColor::parse("FFF").is_err());
        assert!(GtfsColor::parse("GGGGGG").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(i32::parse_field("42"), Ok(42));
        assert!(i32::parse_field("4.2").is_err());
        assert_eq!(f64::parse_field("-50.55"), Ok(-50.55));
        assert!(f64::parse_field("NaN").is_err());
        assert!(f64::parse_field("north").is_err());
    }
}
