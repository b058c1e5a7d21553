use anyhow::{anyhow, Result};
use chrono::{Days, NaiveDate};

use crate::model::budget::HoursView;
use crate::model::pipeline::Division;
use crate::time::{DayKey, MonthKey};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// `maint`, `const`, `total` or any unambiguous prefix of the full names.
pub fn parse_view(input: &str) -> Result<HoursView> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(anyhow!("Empty view name"));
    }
    match expand_key(&input, &["maintenance", "construction", "total", "all"])?.as_str() {
        "maintenance" => Ok(HoursView::Maintenance),
        "construction" => Ok(HoursView::Construction),
        _ => Ok(HoursView::Total),
    }
}

/// `maint` or `const`, or any unambiguous prefix of the full names.
pub fn parse_division(input: &str) -> Result<Division> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Err(anyhow!("Empty division name"));
    }
    match expand_key(&input, &["maintenance", "construction"])?.as_str() {
        "maintenance" => Ok(Division::Maintenance),
        _ => Ok(Division::Construction),
    }
}

/// As-of day for reports: `today`, `yesterday`, `-Nd`, or `YYYY-MM-DD`.
pub fn parse_as_of(input: &str, today: NaiveDate) -> Result<DayKey> {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "today" | "tod" => return Ok(DayKey::from(today)),
        "yesterday" | "yest" => return days_before(today, 1),
        _ => {}
    }

    if let Some(count) = input.strip_prefix('-').and_then(|s| s.strip_suffix('d')) {
        let count: u64 = count
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
        return days_before(today, count);
    }

    Ok(input.parse::<DayKey>()?)
}

fn days_before(today: NaiveDate, count: u64) -> Result<DayKey> {
    today
        .checked_sub_days(Days::new(count))
        .map(DayKey::from)
        .ok_or_else(|| anyhow!("Date out of range: {} days before {}", count, today))
}

/// Month labels as they appear in target sheets: `2026-03`, `2026/3`,
/// `Jan-26`, `26-Jan`, `January 26`.
pub fn parse_month_label(label: &str) -> Option<MonthKey> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    if let Some((year, month)) = label.split_once(['-', '/']) {
        if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
            let year: i32 = year.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            return (year >= 2000).then(|| MonthKey::new(year, month).ok()).flatten();
        }
    }

    let (first, second) = label.split_once(['-', ' '])?;
    let (name, yy) = if first.bytes().all(|b| b.is_ascii_digit()) {
        (second, first)
    } else {
        (first, second)
    };
    if yy.len() != 2 || !yy.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let name = name.trim_end_matches('.').to_lowercase();
    let index = MONTH_ABBREVIATIONS
        .iter()
        .position(|m| name.len() >= 3 && name.starts_with(m))?;
    let year = 2000 + yy.parse::<i32>().ok()?;
    MonthKey::new(year, index as u32 + 1).ok()
}

/// Dates as typed into pipeline and ticket sheets: ISO or US `M/D/YY(YY)`.
pub fn parse_loose_date(input: &str) -> Option<DayKey> {
    let input = input.trim();
    if let Ok(day) = input.parse::<DayKey>() {
        return Some(day);
    }
    // Timestamps such as 2026-03-15T00:00:00
    if input.len() > 10 && input.is_char_boundary(10) {
        if let Ok(day) = input[..10].parse::<DayKey>() {
            return Some(day);
        }
    }

    let parts: Vec<&str> = input.split('/').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let month: u32 = parts[0].parse().ok()?;
    let day: u32 = parts[1].parse().ok()?;
    let year: i32 = match parts[2].len() {
        2 => 2000 + parts[2].parse::<i32>().ok()?,
        4 => parts[2].parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day).map(DayKey::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["maintenance", "construction", "total"];

        assert_eq!(expand_key("m", &candidates).unwrap(), "maintenance");
        assert_eq!(expand_key("const", &candidates).unwrap(), "construction");
        assert_eq!(expand_key("total", &candidates).unwrap(), "total");
        assert!(expand_key("x", &candidates).is_err());

        let ambiguous = vec!["project", "priority"];
        assert!(expand_key("pr", &ambiguous).is_err());
    }

    #[test]
    fn test_parse_view() {
        assert_eq!(parse_view("maint").unwrap(), HoursView::Maintenance);
        assert_eq!(parse_view("C").unwrap(), HoursView::Construction);
        assert_eq!(parse_view("all").unwrap(), HoursView::Total);
        assert!(parse_view("").is_err());
        assert!(parse_view("x").is_err());
    }

    #[test]
    fn test_parse_division() {
        assert_eq!(parse_division("maint").unwrap(), Division::Maintenance);
        assert_eq!(parse_division("C").unwrap(), Division::Construction);
        assert!(parse_division("").is_err());
        assert!(parse_division("irrigation").is_err());
    }

    #[test]
    fn test_parse_as_of() {
        let today = date("2026-03-01");
        assert_eq!(parse_as_of("today", today).unwrap().to_string(), "2026-03-01");
        assert_eq!(parse_as_of("yesterday", today).unwrap().to_string(), "2026-02-28");
        assert_eq!(parse_as_of("-7d", today).unwrap().to_string(), "2026-02-22");
        assert_eq!(parse_as_of("2025-12-31", today).unwrap().to_string(), "2025-12-31");
        assert!(parse_as_of("2025-12-32", today).is_err());
        assert!(parse_as_of("-xd", today).is_err());
    }

    #[test]
    fn test_parse_month_label() {
        let expect = |s: &str| Some(s.parse::<MonthKey>().unwrap());
        assert_eq!(parse_month_label("2026-03"), expect("2026-03"));
        assert_eq!(parse_month_label("2026/3"), expect("2026-03"));
        assert_eq!(parse_month_label("Jan-26"), expect("2026-01"));
        assert_eq!(parse_month_label("26-Jan"), expect("2026-01"));
        assert_eq!(parse_month_label("September 26"), expect("2026-09"));
        assert_eq!(parse_month_label("2026-13"), None);
        assert_eq!(parse_month_label("Foo-26"), None);
        assert_eq!(parse_month_label("1999-05"), None);
        assert_eq!(parse_month_label(""), None);
    }

    #[test]
    fn test_parse_loose_date() {
        let expect = |s: &str| Some(s.parse::<DayKey>().unwrap());
        assert_eq!(parse_loose_date("2026-06-15"), expect("2026-06-15"));
        assert_eq!(parse_loose_date("2026-06-15T08:00:00"), expect("2026-06-15"));
        assert_eq!(parse_loose_date("6/15/26"), expect("2026-06-15"));
        assert_eq!(parse_loose_date("06/15/2026"), expect("2026-06-15"));
        assert_eq!(parse_loose_date("2/30/2026"), None);
        assert_eq!(parse_loose_date("soon"), None);
    }
}
