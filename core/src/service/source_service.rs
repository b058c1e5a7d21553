use anyhow::Result;
use serde::Serialize;

use crate::model::daily_log::DayRecords;
use crate::model::pipeline::{PipelineOpportunity, WorkTicket};
use crate::model::targets::{CalendarTargets, MonthlyCapacities, MonthlyRevenueActuals, MonthlyTargets};
use crate::repository::SourceRepository;
use crate::service::budget_service::BudgetSources;
use crate::time::MonthKey;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum SourceStatus {
    Loaded(usize),
    Failed(String),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub name: &'static str,
    pub status: SourceStatus,
}

#[derive(Debug, Default)]
pub struct SourceSnapshot {
    pub day_records: DayRecords,
    pub calendar: CalendarTargets,
    pub monthly: MonthlyTargets,
    pub pipeline: Vec<PipelineOpportunity>,
    pub tickets: Vec<WorkTicket>,
    pub capacities: MonthlyCapacities,
    pub revenue: MonthlyRevenueActuals,
    pub report: Vec<SourceReport>,
}

impl SourceSnapshot {
    pub fn budget_sources(&self) -> BudgetSources<'_> {
        BudgetSources {
            day_records: &self.day_records,
            calendar: &self.calendar,
            monthly: &self.monthly,
        }
    }

    pub fn tracked_months(&self, fallback_year: i32) -> Vec<MonthKey> {
        if !self.monthly.is_empty() {
            return self.monthly.keys().copied().collect();
        }
        (1..=12)
            .filter_map(|m| MonthKey::new(fallback_year, m).ok())
            .collect()
    }
}

pub struct SourceService<R: SourceRepository> {
    repo: R,
}

impl<R: SourceRepository> SourceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn load(&self) -> SourceSnapshot {
        let mut report = Vec::new();
        let day_records = settle("daily log", self.repo.day_records(), |v| v.len(), &mut report);
        let calendar = settle("calendar", self.repo.calendar_targets(), |v| v.len(), &mut report);
        let monthly = settle("targets", self.repo.monthly_targets(), |v| v.len(), &mut report);
        let pipeline = settle("pipeline", self.repo.pipeline(), |v| v.len(), &mut report);
        let tickets = settle("work tickets", self.repo.work_tickets(), |v| v.len(), &mut report);
        let capacities = settle("capacity", self.repo.capacities(), |v| v.len(), &mut report);
        let revenue = settle("revenue", self.repo.revenue_actuals(), |v| v.len(), &mut report);

        SourceSnapshot {
            day_records,
            calendar,
            monthly,
            pipeline,
            tickets,
            capacities,
            revenue,
            report,
        }
    }
}

fn settle<T: Default>(
    name: &'static str,
    result: Result<T>,
    count: impl Fn(&T) -> usize,
    report: &mut Vec<SourceReport>,
) -> T {
    match result {
        Ok(value) => {
            log::debug!("{}: loaded {} rows", name, count(&value));
            report.push(SourceReport {
                name,
                status: SourceStatus::Loaded(count(&value)),
            });
            value
        }
        Err(e) => {
            log::warn!("{}: {:#}; continuing without it", name, e);
            report.push(SourceReport {
                name,
                status: SourceStatus::Failed(e.to_string()),
            });
            T::default()
        }
    }
}
