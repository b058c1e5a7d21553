use std::collections::BTreeMap;

use crate::model::budget::{BudgetSource, ResolvedBudget};
use crate::model::daily_log::{DayRecord, DayRecords, DayType};
use crate::model::targets::{CalendarTargets, MonthlyTargets};
use crate::time::{iterate_days, DayKey, MonthKey};

#[derive(Debug, Clone, Copy)]
pub struct BudgetSources<'a> {
    pub day_records: &'a DayRecords,
    pub calendar: &'a CalendarTargets,
    pub monthly: &'a MonthlyTargets,
}

/// Per-day (maint, const) shares of each month's total, memoized within a
/// single aggregation call so every day of a month uses the same denominator.
#[derive(Debug, Default)]
pub struct MonthlyRates {
    rates: BTreeMap<MonthKey, (f64, f64)>,
}

impl MonthlyRates {
    pub fn rate(&mut self, month: MonthKey, sources: &BudgetSources<'_>) -> (f64, f64) {
        *self
            .rates
            .entry(month)
            .or_insert_with(|| monthly_average_rate(month, sources))
    }
}

fn is_day_off(record: Option<&DayRecord>) -> bool {
    matches!(
        record.map(|r| r.day_type),
        Some(DayType::Stat) | Some(DayType::Holiday)
    )
}

pub fn workday_eligible(day: DayKey, record: Option<&DayRecord>) -> bool {
    match record.map(|r| r.day_type).unwrap_or_default() {
        DayType::Stat | DayType::Holiday => false,
        DayType::Weekday | DayType::Weekend => true,
        DayType::Unknown => day.is_weekday(),
    }
}

pub fn eligible_workdays(month: MonthKey, day_records: &DayRecords) -> u32 {
    month
        .days()
        .filter(|day| workday_eligible(*day, day_records.get(day)))
        .count() as u32
}

pub fn monthly_average_rate(month: MonthKey, sources: &BudgetSources<'_>) -> (f64, f64) {
    let Some(target) = sources.monthly.get(&month) else {
        return (0.0, 0.0);
    };
    let workdays = eligible_workdays(month, sources.day_records);
    if workdays == 0 {
        return (0.0, 0.0);
    }
    let workdays = workdays as f64;
    (
        target.maintenance_monthly / workdays,
        target.construction_monthly / workdays,
    )
}

/// Target hours for one day: explicit log values, then the calendar row, then
/// the prorated monthly total. Never fails; missing data resolves to zero.
pub fn resolve_day_budget(day: DayKey, sources: &BudgetSources<'_>) -> ResolvedBudget {
    let record = sources.day_records.get(&day);

    if let Some((maint, cons)) = record.and_then(DayRecord::sheet_target) {
        return ResolvedBudget::new(maint, cons, BudgetSource::Sheet);
    }

    if let Some(row) = sources.calendar.get(&day) {
        return ResolvedBudget::new(row.maint_target, row.const_target, BudgetSource::Calendar);
    }

    if is_day_off(record) {
        return ResolvedBudget::zero(BudgetSource::MonthlyAverage);
    }
    let (maint, cons) = monthly_average_rate(day.month(), sources);
    ResolvedBudget::new(maint, cons, BudgetSource::MonthlyAverage)
}

/// Target hours over `[start, end]`.
///
/// The tier is chosen for the whole range, not per day: one explicit log
/// target anywhere in the range makes the result the sum of explicit targets
/// only. Calendar rows are summed only when no day has an explicit target,
/// and the monthly proration is used only when neither tier has a value in
/// the range.
pub fn sum_budget_for_range(start: DayKey, end: DayKey, sources: &BudgetSources<'_>) -> ResolvedBudget {
    if start > end {
        return ResolvedBudget::zero(BudgetSource::MonthlyAverage);
    }

    let mut any_sheet = false;
    let (mut maint, mut cons) = (0.0, 0.0);
    for (_, record) in sources.day_records.range(start..=end) {
        if let Some((m, c)) = record.sheet_target() {
            any_sheet = true;
            maint += m;
            cons += c;
        }
    }
    if any_sheet {
        log::debug!("budget {}..{} resolved from sheet", start, end);
        return ResolvedBudget::new(maint, cons, BudgetSource::Sheet);
    }

    let mut calendar_rows = sources.calendar.range(start..=end).peekable();
    if calendar_rows.peek().is_some() {
        let (maint, cons) = calendar_rows.fold((0.0, 0.0), |(m, c), (_, row)| {
            (m + row.maint_target, c + row.const_target)
        });
        log::debug!("budget {}..{} resolved from calendar", start, end);
        return ResolvedBudget::new(maint, cons, BudgetSource::Calendar);
    }

    let mut rates = MonthlyRates::default();
    let (mut maint, mut cons) = (0.0, 0.0);
    for day in iterate_days(start, end) {
        if !workday_eligible(day, sources.day_records.get(&day)) {
            continue;
        }
        let (m, c) = rates.rate(day.month(), sources);
        maint += m;
        cons += c;
    }
    log::debug!("budget {}..{} resolved from monthly averages", start, end);
    ResolvedBudget::new(maint, cons, BudgetSource::MonthlyAverage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::targets::{CalendarTargetRecord, MonthlyTargetRecord};

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn record(day_type: DayType, maint: Option<f64>, cons: Option<f64>) -> DayRecord {
        DayRecord {
            day_type,
            explicit_target_maint: maint,
            explicit_target_const: cons,
            ..DayRecord::default()
        }
    }

    fn calendar_row(d: &str, maint: f64, cons: f64) -> (DayKey, CalendarTargetRecord) {
        (
            day(d),
            CalendarTargetRecord {
                day: day(d),
                maint_target: maint,
                const_target: cons,
            },
        )
    }

    fn march_targets() -> MonthlyTargets {
        // March 2026 has 22 weekdays
        let mut monthly = MonthlyTargets::new();
        monthly.insert(month("2026-03"), MonthlyTargetRecord::hours(month("2026-03"), 220.0, 440.0));
        monthly
    }

    #[test]
    fn test_eligible_workdays_plain_weekdays() {
        assert_eq!(eligible_workdays(month("2026-03"), &DayRecords::new()), 22);
        assert_eq!(eligible_workdays(month("2026-02"), &DayRecords::new()), 20);
    }

    #[test]
    fn test_eligible_workdays_respects_logged_day_types() {
        let mut records = DayRecords::new();
        // Monday marked as a stat holiday, Saturday logged as a worked weekend
        records.insert(day("2026-03-02"), record(DayType::Stat, None, None));
        records.insert(day("2026-03-07"), record(DayType::Weekend, None, None));
        records.insert(day("2026-03-09"), record(DayType::Holiday, None, None));
        assert_eq!(eligible_workdays(month("2026-03"), &records), 21);
    }

    #[test]
    fn test_monthly_average_without_records() {
        let (records, calendar, monthly) = (DayRecords::new(), CalendarTargets::new(), march_targets());
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        for d in ["2026-03-03", "2026-03-07"] {
            let budget = resolve_day_budget(day(d), &sources);
            assert_eq!(budget.source, BudgetSource::MonthlyAverage);
            assert_eq!(budget.maint, 10.0);
            assert_eq!(budget.cons, 20.0);
            assert_eq!(budget.total(), 30.0);
        }
    }

    #[test]
    fn test_monthly_average_missing_month_is_zero() {
        let (records, calendar, monthly) = (DayRecords::new(), CalendarTargets::new(), march_targets());
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        let budget = resolve_day_budget(day("2026-04-06"), &sources);
        assert_eq!(budget.source, BudgetSource::MonthlyAverage);
        assert_eq!(budget.total(), 0.0);
    }

    #[test]
    fn test_explicit_zero_selects_sheet() {
        let mut records = DayRecords::new();
        records.insert(day("2026-03-03"), record(DayType::Weekday, Some(0.0), None));
        let calendar: CalendarTargets = [calendar_row("2026-03-03", 8.0, 16.0)].into_iter().collect();
        let monthly = march_targets();
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        let budget = resolve_day_budget(day("2026-03-03"), &sources);
        assert_eq!(budget.source, BudgetSource::Sheet);
        assert_eq!(budget.maint, 0.0);
        assert_eq!(budget.cons, 0.0);
    }

    #[test]
    fn test_calendar_beats_monthly_average() {
        let mut records = DayRecords::new();
        records.insert(day("2026-03-03"), record(DayType::Weekday, None, None));
        let calendar: CalendarTargets = [calendar_row("2026-03-03", 8.0, 16.0)].into_iter().collect();
        let monthly = march_targets();
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        let budget = resolve_day_budget(day("2026-03-03"), &sources);
        assert_eq!(budget, ResolvedBudget::new(8.0, 16.0, BudgetSource::Calendar));
    }

    #[test]
    fn test_holiday_gets_no_share_and_raises_others() {
        let mut records = DayRecords::new();
        records.insert(day("2026-03-02"), record(DayType::Holiday, None, None));
        records.insert(day("2026-03-03"), record(DayType::Stat, None, None));
        let (calendar, monthly) = (CalendarTargets::new(), march_targets());
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        assert_eq!(resolve_day_budget(day("2026-03-02"), &sources).total(), 0.0);
        let open_day = resolve_day_budget(day("2026-03-04"), &sources);
        assert_eq!(open_day.maint, 11.0);
        assert_eq!(open_day.cons, 22.0);
    }

    #[test]
    fn test_range_any_sheet_day_wins() {
        let mut records = DayRecords::new();
        records.insert(day("2026-03-10"), record(DayType::Weekday, Some(5.0), Some(7.0)));
        let calendar: CalendarTargets = iterate_days(day("2026-03-01"), day("2026-03-31"))
            .map(|d| calendar_row(&d.to_string(), 8.0, 16.0))
            .collect();
        let monthly = march_targets();
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        let budget = sum_budget_for_range(day("2026-03-01"), day("2026-03-31"), &sources);
        assert_eq!(budget.source, BudgetSource::Sheet);
        assert_eq!(budget.total(), 12.0);
    }

    #[test]
    fn test_range_sheet_outside_range_is_ignored() {
        let mut records = DayRecords::new();
        records.insert(day("2026-02-27"), record(DayType::Weekday, Some(5.0), Some(7.0)));
        let calendar: CalendarTargets = [
            calendar_row("2026-03-02", 8.0, 16.0),
            calendar_row("2026-03-03", 4.0, 2.0),
            calendar_row("2026-04-01", 100.0, 100.0),
        ]
        .into_iter()
        .collect();
        let monthly = march_targets();
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        let budget = sum_budget_for_range(day("2026-03-01"), day("2026-03-31"), &sources);
        assert_eq!(budget, ResolvedBudget::new(12.0, 18.0, BudgetSource::Calendar));
    }

    #[test]
    fn test_range_monthly_average_counts_only_eligible_days() {
        let mut records = DayRecords::new();
        records.insert(day("2026-03-02"), record(DayType::Stat, None, None));
        let (calendar, monthly) = (CalendarTargets::new(), march_targets());
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        // 21 eligible days in March, first week has 4 of them (Mar 3-6)
        let week = sum_budget_for_range(day("2026-03-01"), day("2026-03-08"), &sources);
        assert_eq!(week.source, BudgetSource::MonthlyAverage);
        assert!((week.maint - 4.0 * 220.0 / 21.0).abs() < 1e-9);

        let whole = sum_budget_for_range(day("2026-03-01"), day("2026-03-31"), &sources);
        assert!((whole.maint - 220.0).abs() < 1e-9);
        assert!((whole.cons - 440.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_spanning_months_uses_each_months_rate() {
        let records = DayRecords::new();
        let calendar = CalendarTargets::new();
        let mut monthly = march_targets();
        // April 2026 has 22 weekdays
        monthly.insert(month("2026-04"), MonthlyTargetRecord::hours(month("2026-04"), 44.0, 0.0));
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        // Mar 30, Mar 31, Apr 1
        let budget = sum_budget_for_range(day("2026-03-30"), day("2026-04-01"), &sources);
        assert!((budget.maint - (10.0 + 10.0 + 2.0)).abs() < 1e-9);
        assert!((budget.cons - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let (records, calendar, monthly) = (DayRecords::new(), CalendarTargets::new(), march_targets());
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };
        let budget = sum_budget_for_range(day("2026-03-10"), day("2026-03-01"), &sources);
        assert_eq!(budget, ResolvedBudget::zero(BudgetSource::MonthlyAverage));
    }

    #[test]
    fn test_range_is_idempotent() {
        let mut records = DayRecords::new();
        records.insert(day("2026-03-04"), record(DayType::Holiday, None, None));
        let (calendar, monthly) = (CalendarTargets::new(), march_targets());
        let sources = BudgetSources { day_records: &records, calendar: &calendar, monthly: &monthly };

        let first = sum_budget_for_range(day("2026-03-01"), day("2026-03-19"), &sources);
        let second = sum_budget_for_range(day("2026-03-01"), day("2026-03-19"), &sources);
        assert_eq!(first.maint.to_bits(), second.maint.to_bits());
        assert_eq!(first.cons.to_bits(), second.cons.to_bits());
        assert_eq!(first.source, second.source);
    }
}
