use crate::model::budget::HoursView;
use crate::service::actuals_service::sum_actuals_for_range;
use crate::service::budget_service::{sum_budget_for_range, BudgetSources};
use crate::service::coverage::{coverage_ratio, CoveragePolicy};
use crate::service::dto::{Period, PeriodSummary};
use crate::time::DayKey;

/// Month-to-date and year-to-date budget coverage.
pub struct SummaryUseCase<'a> {
    sources: BudgetSources<'a>,
    policy: CoveragePolicy,
}

impl<'a> SummaryUseCase<'a> {
    pub fn new(sources: BudgetSources<'a>, policy: CoveragePolicy) -> Self {
        Self { sources, policy }
    }

    pub fn month_to_date(&self, as_of: DayKey, view: HoursView) -> PeriodSummary {
        self.summarize(Period::MonthToDate, as_of.month_start(), as_of, view)
    }

    pub fn year_to_date(&self, as_of: DayKey, view: HoursView) -> PeriodSummary {
        self.summarize(Period::YearToDate, as_of.year_start(), as_of, view)
    }

    fn summarize(&self, period: Period, start: DayKey, end: DayKey, view: HoursView) -> PeriodSummary {
        let budget = sum_budget_for_range(start, end, &self.sources);
        let actual = sum_actuals_for_range(start, end, self.sources.day_records);

        let budget_hours = budget.pick(view);
        let actual_hours = actual.pick(view);
        let ratio = coverage_ratio(actual_hours, budget_hours);

        PeriodSummary {
            period,
            start,
            end,
            view,
            budget,
            actual,
            budget_hours,
            actual_hours,
            variance: actual_hours - budget_hours,
            ratio,
            band: self.policy.classify(ratio),
        }
    }
}
