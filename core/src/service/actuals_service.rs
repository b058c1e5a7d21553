use crate::model::budget::ActualTotals;
use crate::model::daily_log::DayRecords;
use crate::time::DayKey;

pub fn sum_actuals_for_range(start: DayKey, end: DayKey, day_records: &DayRecords) -> ActualTotals {
    if start > end {
        return ActualTotals::default();
    }
    day_records
        .range(start..=end)
        .fold(ActualTotals::default(), |acc, (_, record)| ActualTotals {
            maint: acc.maint + record.actual_maint,
            cons: acc.cons + record.actual_const,
        })
}
