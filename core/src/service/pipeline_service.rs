use std::collections::BTreeMap;

use crate::model::pipeline::{Division, PipelineOpportunity, WorkTicket};
use crate::time::MonthKey;

pub const PIPELINE_HORIZON_MONTH: u32 = 11;

pub type MonthlySeries = BTreeMap<MonthKey, f64>;

fn zero_series(month_keys: &[MonthKey]) -> MonthlySeries {
    month_keys.iter().map(|m| (*m, 0.0)).collect()
}

pub fn bucket_by_month<T, M, V>(
    items: impl IntoIterator<Item = T>,
    month_of: M,
    value_of: V,
    month_keys: &[MonthKey],
) -> MonthlySeries
where
    M: Fn(&T) -> MonthKey,
    V: Fn(&T) -> f64,
{
    let mut series = zero_series(month_keys);
    for item in items {
        if let Some(slot) = series.get_mut(&month_of(&item)) {
            *slot += value_of(&item);
        }
    }
    series
}

fn spread_months(start: MonthKey) -> Vec<MonthKey> {
    if start.month() > PIPELINE_HORIZON_MONTH {
        return vec![start];
    }
    (start.month()..=PIPELINE_HORIZON_MONTH)
        .filter_map(|m| start.with_month(m))
        .collect()
}

/// Spreads each open maintenance opportunity's weighted hours evenly from its
/// start month through November. Shares landing outside `month_keys` are lost.
pub fn spread_maintenance_pipeline(
    opportunities: &[PipelineOpportunity],
    month_keys: &[MonthKey],
) -> MonthlySeries {
    let mut series = zero_series(month_keys);
    for opp in opportunities.iter().filter(|o| o.is_open_for(Division::Maintenance)) {
        let months = spread_months(opp.start_month);
        let share = opp.weighted_hours / months.len() as f64;
        for month in months {
            if let Some(slot) = series.get_mut(&month) {
                *slot += share;
            }
        }
    }
    series
}

pub fn bucket_construction_pipeline(
    opportunities: &[PipelineOpportunity],
    month_keys: &[MonthKey],
) -> MonthlySeries {
    bucket_by_month(
        opportunities.iter().filter(|o| o.is_open_for(Division::Construction)),
        |o| o.start_month,
        |o| o.weighted_hours,
        month_keys,
    )
}

pub fn bucket_ticket_hours(
    tickets: &[WorkTicket],
    division: Division,
    month_keys: &[MonthKey],
) -> MonthlySeries {
    bucket_by_month(
        tickets.iter().filter(|t| t.is_active_for(division)),
        |t| t.scheduled.month(),
        |t| t.estimated_hours,
        month_keys,
    )
}
