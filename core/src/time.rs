use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, written `YYYY-MM-DD`.
///
/// Ordering is chronological, which is the same as comparing the zero-padded
/// text form lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> MonthKey {
        month_key(self.0)
    }

    pub fn is_weekday(&self) -> bool {
        is_weekday(self.0)
    }

    pub fn month_start(&self) -> DayKey {
        self.month().bounds().start
    }

    /// January 1st of the same year.
    pub fn year_start(&self) -> DayKey {
        DayKey(self.0.with_ordinal(1).unwrap_or(self.0))
    }

    pub fn checked_sub_days(&self, days: u64) -> Option<DayKey> {
        self.0.checked_sub_days(Days::new(days)).map(DayKey)
    }

    pub fn weekday_label(&self) -> String {
        self.0.format("%a").to_string()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        DayKey(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields, the key format does not
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(CalendarError::InvalidDate(s.to_string()));
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return Err(CalendarError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(DayKey)
            .map_err(|_| CalendarError::InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for DayKey {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

/// A calendar month, written `YYYY-MM`. Holds the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(NaiveDate);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBounds {
    pub start: DayKey,
    pub end: DayKey,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(MonthKey)
            .ok_or_else(|| CalendarError::InvalidDate(format!("{:04}-{:02}", year, month)))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn bounds(&self) -> MonthBounds {
        let last = NaiveDate::from_ymd_opt(self.year(), self.month(), self.days_in_month())
            .unwrap_or(self.0);
        MonthBounds {
            start: DayKey(self.0),
            end: DayKey(last),
        }
    }

    pub fn days(&self) -> DayRange {
        let bounds = self.bounds();
        iterate_days(bounds.start, bounds.end)
    }

    /// The given month number in the same year.
    pub fn with_month(&self, month: u32) -> Option<MonthKey> {
        MonthKey::new(self.year(), month).ok()
    }

    pub fn succ(&self) -> Option<MonthKey> {
        if self.month() == 12 {
            MonthKey::new(self.year() + 1, 1).ok()
        } else {
            MonthKey::new(self.year(), self.month() + 1).ok()
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidDate(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Inclusive, lazy sequence of days. Clone it to walk the same range again.
#[derive(Debug, Clone)]
pub struct DayRange {
    front: NaiveDate,
    back: NaiveDate,
    exhausted: bool,
}

impl Iterator for DayRange {
    type Item = DayKey;

    fn next(&mut self) -> Option<DayKey> {
        if self.exhausted {
            return None;
        }
        let day = self.front;
        if day == self.back {
            self.exhausted = true;
        } else {
            match day.succ_opt() {
                Some(next) => self.front = next,
                None => self.exhausted = true,
            }
        }
        Some(DayKey(day))
    }
}

impl DoubleEndedIterator for DayRange {
    fn next_back(&mut self) -> Option<DayKey> {
        if self.exhausted {
            return None;
        }
        let day = self.back;
        if day == self.front {
            self.exhausted = true;
        } else {
            match day.pred_opt() {
                Some(prev) => self.back = prev,
                None => self.exhausted = true,
            }
        }
        Some(DayKey(day))
    }
}

pub fn day_key(date: NaiveDate) -> DayKey {
    DayKey(date)
}

pub fn month_key(date: NaiveDate) -> MonthKey {
    MonthKey(date.with_day(1).unwrap_or(date))
}

pub fn month_bounds(month: MonthKey) -> MonthBounds {
    month.bounds()
}

/// Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every day from `start` to `end`, both included. Empty when `start > end`.
pub fn iterate_days(start: DayKey, end: DayKey) -> DayRange {
    DayRange {
        front: start.0,
        back: end.0,
        exhausted: start > end,
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_day_key_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(day_key(date), day("2026-03-05"));
        assert_eq!(day_key(date).date(), date);
        assert_eq!(month_key(date).to_string(), "2026-03");
    }

    #[test]
    fn test_day_key_round_trips_text_form() {
        let key = day("2026-03-05");
        assert_eq!(key.to_string(), "2026-03-05");
        assert_eq!(key.month().to_string(), "2026-03");
    }

    #[test]
    fn test_day_key_rejects_malformed_input() {
        for bad in ["2026-3-05", "2026-02-30", "20260305", "2026/03/05", "", "abcd-ef-gh", "2026-03-05T00"] {
            assert_eq!(
                bad.parse::<DayKey>(),
                Err(CalendarError::InvalidDate(bad.to_string())),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_month_key_parse() {
        let month: MonthKey = "2024-02".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 2);
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-2".parse::<MonthKey>().is_err());
        assert!("24-02".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_bounds_handle_leap_years() {
        let feb_leap = month_bounds("2024-02".parse().unwrap());
        assert_eq!(feb_leap.start, day("2024-02-01"));
        assert_eq!(feb_leap.end, day("2024-02-29"));

        let feb = month_bounds("2026-02".parse().unwrap());
        assert_eq!(feb.end, day("2026-02-28"));

        let dec = month_bounds("2026-12".parse().unwrap());
        assert_eq!(dec.end, day("2026-12-31"));
    }

    #[test]
    fn test_ordering_matches_text_ordering() {
        let mut keys = vec![day("2026-10-01"), day("2026-09-30"), day("2025-12-31")];
        keys.sort();
        let text: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let mut sorted_text = text.clone();
        sorted_text.sort();
        assert_eq!(text, sorted_text);
    }

    #[test]
    fn test_is_weekday() {
        // 2026-03-07 is a Saturday
        assert!(!day("2026-03-07").is_weekday());
        assert!(!day("2026-03-08").is_weekday());
        assert!(day("2026-03-09").is_weekday());
    }

    #[test]
    fn test_iterate_days_is_inclusive_and_restartable() {
        let range = iterate_days(day("2026-02-27"), day("2026-03-02"));
        let first: Vec<String> = range.clone().map(|d| d.to_string()).collect();
        let second: Vec<String> = range.map(|d| d.to_string()).collect();
        assert_eq!(first, vec!["2026-02-27", "2026-02-28", "2026-03-01", "2026-03-02"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_iterate_days_empty_and_single() {
        assert_eq!(iterate_days(day("2026-03-02"), day("2026-03-01")).count(), 0);
        assert_eq!(iterate_days(day("2026-03-02"), day("2026-03-02")).count(), 1);
    }

    #[test]
    fn test_iterate_days_backwards() {
        let newest_first: Vec<String> = iterate_days(day("2026-03-01"), day("2026-03-03"))
            .rev()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(newest_first, vec!["2026-03-03", "2026-03-02", "2026-03-01"]);
    }

    #[test]
    fn test_month_succ_and_year_start() {
        let dec: MonthKey = "2026-12".parse().unwrap();
        assert_eq!(dec.succ().unwrap().to_string(), "2027-01");
        assert_eq!(day("2026-07-19").year_start(), day("2026-01-01"));
        assert_eq!(day("2026-07-19").month_start(), day("2026-07-01"));
    }

    #[test]
    fn test_serde_uses_text_form() {
        let json = serde_json::to_string(&day("2026-01-09")).unwrap();
        assert_eq!(json, "\"2026-01-09\"");
        assert!(serde_json::from_str::<DayKey>("\"2026-1-9\"").is_err());
        let month: MonthKey = serde_json::from_str("\"2026-11\"").unwrap();
        assert_eq!(month.month(), 11);
    }
}
