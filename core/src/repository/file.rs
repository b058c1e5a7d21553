use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::default_base_dir;
use crate::input::{parse_loose_date, parse_month_label};
use crate::model::daily_log::{DayRecord, DayRecords};
use crate::model::de;
use crate::model::pipeline::{Division, PipelineOpportunity, PipelineStatus, TicketStatus, WorkTicket};
use crate::model::targets::{
    CalendarTargetRecord, CalendarTargets, MonthlyCapacities, MonthlyCapacity, MonthlyRevenueActual,
    MonthlyRevenueActuals, MonthlyTargetRecord, MonthlyTargets,
};
use crate::repository::traits::SourceRepository;

pub const DAILY_LOG_FILE_NAME: &str = "daily_log.json";
pub const CALENDAR_FILE_NAME: &str = "calendar.json";
pub const TARGETS_FILE_NAME: &str = "targets.json";
pub const PIPELINE_FILE_NAME: &str = "pipeline.json";
pub const TICKETS_FILE_NAME: &str = "tickets.json";
pub const CAPACITY_FILE_NAME: &str = "capacity.json";
pub const REVENUE_FILE_NAME: &str = "revenue.json";

/// Row of `daily_log.json`. The date may be a timestamp exported by the log
/// service; rows without a usable date are skipped.
#[derive(Deserialize)]
struct DailyLogRow {
    #[serde(default, alias = "Date", deserialize_with = "de::text")]
    date: String,
    #[serde(flatten)]
    record: DayRecord,
}

#[derive(Deserialize)]
struct CalendarRow {
    #[serde(default, alias = "date", alias = "Date", deserialize_with = "de::text")]
    day: String,
    #[serde(default, alias = "MaintenanceHours", deserialize_with = "de::number")]
    maint_target: f64,
    #[serde(default, alias = "ConstructionHours", deserialize_with = "de::number")]
    const_target: f64,
}

/// Row of `targets.json`. Month labels come straight from the planning sheet.
#[derive(Deserialize)]
struct TargetsRow {
    #[serde(default, alias = "Month", deserialize_with = "de::text")]
    month: String,
    #[serde(default, alias = "Maintenance Hours", deserialize_with = "de::number")]
    maintenance_hours: f64,
    #[serde(default, alias = "Construction Hours", deserialize_with = "de::number")]
    construction_hours: f64,
    #[serde(default, alias = "Maintenance Revenue", deserialize_with = "de::number")]
    maintenance_revenue: f64,
    #[serde(default, alias = "Construction Revenue", deserialize_with = "de::number")]
    construction_revenue: f64,
}

#[derive(Deserialize)]
struct PipelineRow {
    #[serde(default, alias = "Division Name", deserialize_with = "de::text")]
    division: String,
    #[serde(default, alias = "Opp Status", deserialize_with = "de::text")]
    status: String,
    #[serde(default, alias = "Start Date", deserialize_with = "de::text")]
    start_date: String,
    #[serde(default, alias = "Weighted Hours", deserialize_with = "de::number")]
    weighted_hours: f64,
    #[serde(default, alias = "Weighted Pipeline", deserialize_with = "de::number")]
    weighted_dollars: f64,
    #[serde(default, alias = "Estimated $", deserialize_with = "de::number")]
    estimated_dollars: f64,
}

#[derive(Deserialize)]
struct TicketRow {
    #[serde(default, alias = "Division", deserialize_with = "de::text")]
    division: String,
    #[serde(default, alias = "Status", deserialize_with = "de::text")]
    status: String,
    #[serde(default, alias = "Sched Date", deserialize_with = "de::text")]
    scheduled: String,
    #[serde(default, alias = "Est Hrs", deserialize_with = "de::number")]
    estimated_hours: f64,
}

/// Reads the dashboard sources from JSON files in one directory.
#[derive(Clone)]
pub struct FileSourceRepository {
    base_dir: PathBuf,
}

impl FileSourceRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let base_dir = match base_dir {
            Some(dir) => dir,
            None => default_base_dir()?,
        };
        Ok(FileSourceRepository { base_dir })
    }

    fn read_rows<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.base_dir.join(file_name);
        let file = File::open(&path).map_err(|e| anyhow!("{}: {}", path.display(), e))?;
        let reader = BufReader::new(file);
        let rows: Vec<T> = serde_json::from_reader(reader).map_err(|e| anyhow!("{}: {}", path.display(), e))?;
        Ok(rows)
    }
}

impl SourceRepository for FileSourceRepository {
    fn day_records(&self) -> Result<DayRecords> {
        let rows: Vec<DailyLogRow> = self.read_rows(DAILY_LOG_FILE_NAME)?;
        let mut records = DayRecords::new();
        for row in rows {
            let Some(day) = parse_loose_date(&row.date) else {
                log::warn!("daily log: skipping row with unrecognized date '{}'", row.date);
                continue;
            };
            // a later row for the same day replaces the earlier one
            records.insert(day, row.record);
        }
        Ok(records)
    }

    fn calendar_targets(&self) -> Result<CalendarTargets> {
        let rows: Vec<CalendarRow> = self.read_rows(CALENDAR_FILE_NAME)?;
        let mut calendar = CalendarTargets::new();
        for row in rows {
            let Some(day) = parse_loose_date(&row.day) else {
                log::warn!("calendar: skipping row with unrecognized date '{}'", row.day);
                continue;
            };
            calendar.insert(
                day,
                CalendarTargetRecord {
                    day,
                    maint_target: row.maint_target,
                    const_target: row.const_target,
                },
            );
        }
        Ok(calendar)
    }

    fn monthly_targets(&self) -> Result<MonthlyTargets> {
        let rows: Vec<TargetsRow> = self.read_rows(TARGETS_FILE_NAME)?;
        let mut targets = MonthlyTargets::new();
        for row in rows {
            let Some(month) = parse_month_label(&row.month) else {
                log::warn!("targets: skipping row with unrecognized month '{}'", row.month);
                continue;
            };
            targets.insert(
                month,
                MonthlyTargetRecord {
                    month,
                    maintenance_monthly: row.maintenance_hours,
                    construction_monthly: row.construction_hours,
                    maintenance_revenue: row.maintenance_revenue,
                    construction_revenue: row.construction_revenue,
                },
            );
        }
        Ok(targets)
    }

    fn pipeline(&self) -> Result<Vec<PipelineOpportunity>> {
        let rows: Vec<PipelineRow> = self.read_rows(PIPELINE_FILE_NAME)?;
        let total = rows.len();
        let opportunities: Vec<PipelineOpportunity> = rows
            .into_iter()
            .filter_map(|row| {
                let start = parse_loose_date(&row.start_date)?;
                Some(PipelineOpportunity {
                    division: Division::classify(&row.division),
                    status: PipelineStatus::classify(&row.status),
                    start_month: start.month(),
                    weighted_hours: row.weighted_hours,
                    weighted_dollars: row.weighted_dollars,
                    estimated_dollars: row.estimated_dollars,
                })
            })
            .collect();
        if opportunities.len() < total {
            log::warn!("pipeline: skipped {} rows without a start date", total - opportunities.len());
        }
        Ok(opportunities)
    }

    fn work_tickets(&self) -> Result<Vec<WorkTicket>> {
        let rows: Vec<TicketRow> = self.read_rows(TICKETS_FILE_NAME)?;
        Ok(rows
            .into_iter()
            .filter(|row| row.estimated_hours > 0.0)
            .filter_map(|row| {
                Some(WorkTicket {
                    division: Division::classify(&row.division),
                    status: TicketStatus::classify(&row.status),
                    scheduled: parse_loose_date(&row.scheduled)?,
                    estimated_hours: row.estimated_hours,
                })
            })
            .collect())
    }

    fn capacities(&self) -> Result<MonthlyCapacities> {
        let rows: Vec<MonthlyCapacity> = self.read_rows(CAPACITY_FILE_NAME)?;
        Ok(rows.into_iter().map(|r| (r.month, r)).collect())
    }

    fn revenue_actuals(&self) -> Result<MonthlyRevenueActuals> {
        let rows: Vec<MonthlyRevenueActual> = self.read_rows(REVENUE_FILE_NAME)?;
        let mut actuals = MonthlyRevenueActuals::new();
        // the revenue log may hold several rows per month
        for row in rows {
            let (maintenance, construction) = (row.maintenance, row.construction);
            actuals
                .entry(row.month)
                .and_modify(move |acc: &mut MonthlyRevenueActual| {
                    acc.maintenance += maintenance;
                    acc.construction += construction;
                })
                .or_insert(row);
        }
        Ok(actuals)
    }
}
