use chrono::{Datelike, NaiveDate};

use crate::time::{month_key, MonthKey};

pub fn project_month(month: MonthKey, actual_month_to_date: f64, today: NaiveDate) -> f64 {
    if month_key(today) != month {
        return actual_month_to_date;
    }
    let elapsed_days = today.day();
    if elapsed_days == 0 {
        return actual_month_to_date;
    }
    actual_month_to_date / elapsed_days as f64 * month.days_in_month() as f64
}
