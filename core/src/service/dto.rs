use serde::Serialize;

use crate::model::budget::{ActualTotals, HoursView, ResolvedBudget};
use crate::model::daily_log::DayType;
use crate::model::pipeline::Division;
use crate::service::coverage::CoverageBand;
use crate::time::{DayKey, MonthKey};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    MonthToDate,
    YearToDate,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::MonthToDate => "MTD",
            Period::YearToDate => "YTD",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: Period,
    pub start: DayKey,
    pub end: DayKey,
    pub view: HoursView,
    pub budget: ResolvedBudget,
    pub actual: ActualTotals,
    // Figures for the selected view
    pub budget_hours: f64,
    pub actual_hours: f64,
    pub variance: f64,
    pub ratio: Option<f64>,
    pub band: CoverageBand,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DailyRow {
    pub date: DayKey,
    pub day_of_week: String, // Mon, Tue...
    pub day_type: DayType,
    pub budget: ResolvedBudget,
    pub actual: ActualTotals,
    pub delta_hours: f64,
    pub delta_pct: Option<f64>,
    pub band: CoverageBand,
    pub missed_tickets: f64,
    pub safety_incidents: f64,
    pub notes: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OutlookRow {
    pub month: MonthKey,
    pub target_hours: f64,
    pub capacity_hours: f64,
    pub ticket_hours: f64,
    pub pipeline_hours: f64,
}

impl OutlookRow {
    pub fn projected_hours(&self) -> f64 {
        self.ticket_hours + self.pipeline_hours
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HoursOutlook {
    pub division: Division,
    pub rows: Vec<OutlookRow>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RevenuePace {
    pub month: MonthKey,
    pub view: HoursView,
    pub target: f64,
    pub actual: f64,
    pub projected: f64,
    pub ratio: Option<f64>,
    pub band: CoverageBand,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RevenueYear {
    pub view: HoursView,
    pub target: f64,
    pub pipeline_unweighted: f64,
    pub pipeline_weighted: f64,
}
