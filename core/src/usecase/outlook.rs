use crate::model::pipeline::Division;
use crate::service::dto::{HoursOutlook, OutlookRow};
use crate::service::pipeline_service::{
    bucket_construction_pipeline, bucket_ticket_hours, spread_maintenance_pipeline,
};
use crate::service::source_service::SourceSnapshot;
use crate::time::MonthKey;

/// Monthly hours picture per division: target, capacity, booked tickets and
/// open pipeline.
pub struct OutlookUseCase<'a> {
    snapshot: &'a SourceSnapshot,
}

impl<'a> OutlookUseCase<'a> {
    pub fn new(snapshot: &'a SourceSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn hours_outlook(&self, division: Division, month_keys: &[MonthKey]) -> HoursOutlook {
        let tickets = bucket_ticket_hours(&self.snapshot.tickets, division, month_keys);
        let pipeline = match division {
            Division::Maintenance => spread_maintenance_pipeline(&self.snapshot.pipeline, month_keys),
            _ => bucket_construction_pipeline(&self.snapshot.pipeline, month_keys),
        };

        let rows = month_keys
            .iter()
            .map(|month| {
                let target = self.snapshot.monthly.get(month);
                let capacity = self.snapshot.capacities.get(month);
                let (target_hours, capacity_hours) = match division {
                    Division::Maintenance => (
                        target.map(|t| t.maintenance_monthly).unwrap_or(0.0),
                        capacity.map(|c| c.maint_capacity).unwrap_or(0.0),
                    ),
                    _ => (
                        target.map(|t| t.construction_monthly).unwrap_or(0.0),
                        capacity.map(|c| c.const_capacity).unwrap_or(0.0),
                    ),
                };
                OutlookRow {
                    month: *month,
                    target_hours,
                    capacity_hours,
                    ticket_hours: tickets.get(month).copied().unwrap_or(0.0),
                    pipeline_hours: pipeline.get(month).copied().unwrap_or(0.0),
                }
            })
            .collect();

        HoursOutlook { division, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pipeline::{PipelineOpportunity, PipelineStatus, TicketStatus, WorkTicket};
    use crate::model::targets::{MonthlyCapacity, MonthlyTargetRecord};

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn snapshot() -> SourceSnapshot {
        let mut snapshot = SourceSnapshot::default();
        for m in ["2026-10", "2026-11", "2026-12"] {
            snapshot.monthly.insert(month(m), MonthlyTargetRecord::hours(month(m), 500.0, 900.0));
            snapshot.capacities.insert(
                month(m),
                MonthlyCapacity {
                    month: month(m),
                    maint_capacity: 450.0,
                    const_capacity: 1000.0,
                },
            );
        }
        snapshot.pipeline = vec![
            PipelineOpportunity {
                division: Division::Maintenance,
                status: PipelineStatus::Open,
                start_month: month("2026-10"),
                weighted_hours: 80.0,
                weighted_dollars: 0.0,
                estimated_dollars: 0.0,
            },
            PipelineOpportunity {
                division: Division::Construction,
                status: PipelineStatus::Open,
                start_month: month("2026-10"),
                weighted_hours: 300.0,
                weighted_dollars: 0.0,
                estimated_dollars: 0.0,
            },
        ];
        snapshot.tickets = vec![WorkTicket {
            division: Division::Construction,
            status: TicketStatus::Active,
            scheduled: "2026-12-03".parse().unwrap(),
            estimated_hours: 40.0,
        }];
        snapshot
    }

    #[test]
    fn test_maintenance_outlook_spreads_pipeline() {
        let snapshot = snapshot();
        let months = snapshot.tracked_months(2026);
        let outlook = OutlookUseCase::new(&snapshot).hours_outlook(Division::Maintenance, &months);

        let pipeline: Vec<f64> = outlook.rows.iter().map(|r| r.pipeline_hours).collect();
        assert_eq!(pipeline, vec![40.0, 40.0, 0.0]);
        assert_eq!(outlook.rows[0].target_hours, 500.0);
        assert_eq!(outlook.rows[0].capacity_hours, 450.0);
        assert!(outlook.rows.iter().all(|r| r.ticket_hours == 0.0));
    }

    #[test]
    fn test_construction_outlook_buckets_by_start_month() {
        let snapshot = snapshot();
        let months = snapshot.tracked_months(2026);
        let outlook = OutlookUseCase::new(&snapshot).hours_outlook(Division::Construction, &months);

        assert_eq!(outlook.rows[0].pipeline_hours, 300.0);
        assert_eq!(outlook.rows[1].pipeline_hours, 0.0);
        assert_eq!(outlook.rows[2].ticket_hours, 40.0);
        assert_eq!(outlook.rows[2].projected_hours(), 40.0);
        assert_eq!(outlook.rows[2].capacity_hours, 1000.0);
    }
}
