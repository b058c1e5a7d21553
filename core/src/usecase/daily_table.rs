use crate::model::budget::ActualTotals;
use crate::service::budget_service::{resolve_day_budget, BudgetSources};
use crate::service::coverage::{coverage_ratio, CoveragePolicy};
use crate::service::dto::DailyRow;
use crate::time::{iterate_days, DayKey};

/// Day-by-day budget against actuals for the most recent days.
pub struct DailyTableUseCase<'a> {
    sources: BudgetSources<'a>,
    policy: CoveragePolicy,
}

impl<'a> DailyTableUseCase<'a> {
    pub fn new(sources: BudgetSources<'a>, policy: CoveragePolicy) -> Self {
        Self { sources, policy }
    }

    /// `days` rows ending at `as_of`, newest first.
    pub fn rows(&self, as_of: DayKey, days: u32) -> Vec<DailyRow> {
        if days == 0 {
            return Vec::new();
        }
        let start = as_of.checked_sub_days(u64::from(days - 1)).unwrap_or(as_of);
        iterate_days(start, as_of).rev().map(|day| self.row(day)).collect()
    }

    pub fn row(&self, day: DayKey) -> DailyRow {
        let record = self.sources.day_records.get(&day);
        let budget = resolve_day_budget(day, &self.sources);
        let actual = record
            .map(|r| ActualTotals {
                maint: r.actual_maint,
                cons: r.actual_const,
            })
            .unwrap_or_default();

        let ratio = coverage_ratio(actual.total(), budget.total());

        DailyRow {
            date: day,
            day_of_week: day.weekday_label(),
            day_type: record.map(|r| r.day_type).unwrap_or_default(),
            budget,
            actual,
            delta_hours: actual.total() - budget.total(),
            delta_pct: ratio.map(|r| r - 1.0),
            band: self.policy.classify(ratio),
            missed_tickets: record.map(|r| r.missed_tickets).unwrap_or(0.0),
            safety_incidents: record.map(|r| r.safety_incidents).unwrap_or(0.0),
            notes: record.map(|r| r.notes.clone()).unwrap_or_default(),
        }
    }
}
