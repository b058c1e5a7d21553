use chrono::NaiveDate;

use crate::model::budget::HoursView;
use crate::model::pipeline::Division;
use crate::service::coverage::{coverage_ratio, CoveragePolicy};
use crate::service::dto::{RevenuePace, RevenueYear};
use crate::service::projection::project_month;
use crate::service::source_service::SourceSnapshot;
use crate::time::MonthKey;

fn in_scope(view: HoursView, division: Division) -> bool {
    match view {
        HoursView::Maintenance => division == Division::Maintenance,
        HoursView::Construction => division == Division::Construction,
        HoursView::Total => division != Division::Other,
    }
}

pub struct RevenueUseCase<'a> {
    snapshot: &'a SourceSnapshot,
    policy: CoveragePolicy,
}

impl<'a> RevenueUseCase<'a> {
    pub fn new(snapshot: &'a SourceSnapshot, policy: CoveragePolicy) -> Self {
        Self { snapshot, policy }
    }

    /// Target, actual and run-rate projection for one month. The band
    /// compares the projection with the target.
    pub fn pace(&self, month: MonthKey, view: HoursView, today: NaiveDate) -> RevenuePace {
        let target = self
            .snapshot
            .monthly
            .get(&month)
            .map(|t| view.pick(t.maintenance_revenue, t.construction_revenue))
            .unwrap_or(0.0);
        let actual = self
            .snapshot
            .revenue
            .get(&month)
            .map(|a| view.pick(a.maintenance, a.construction))
            .unwrap_or(0.0);
        let projected = project_month(month, actual, today);
        let ratio = coverage_ratio(projected, target);

        RevenuePace {
            month,
            view,
            target,
            actual,
            projected,
            ratio,
            band: self.policy.classify(ratio),
        }
    }

    /// Revenue target over the tracked months against open and closed
    /// pipeline for the same scope.
    pub fn year(&self, view: HoursView, month_keys: &[MonthKey]) -> RevenueYear {
        let target = month_keys
            .iter()
            .filter_map(|m| self.snapshot.monthly.get(m))
            .map(|t| view.pick(t.maintenance_revenue, t.construction_revenue))
            .sum();
        let in_view = self
            .snapshot
            .pipeline
            .iter()
            .filter(|p| in_scope(view, p.division));

        let (pipeline_unweighted, pipeline_weighted) = in_view.fold((0.0, 0.0), |(u, w), p| {
            (u + p.estimated_dollars, w + p.weighted_dollars)
        });

        RevenueYear {
            view,
            target,
            pipeline_unweighted,
            pipeline_weighted,
        }
    }
}
