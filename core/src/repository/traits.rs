use anyhow::Result;

use crate::model::daily_log::DayRecords;
use crate::model::pipeline::{PipelineOpportunity, WorkTicket};
use crate::model::targets::{CalendarTargets, MonthlyCapacities, MonthlyRevenueActuals, MonthlyTargets};

/// Where the dashboard's inputs come from. Every method returns data already
/// normalized into the engine's record types.
pub trait SourceRepository {
    fn day_records(&self) -> Result<DayRecords>;
    fn calendar_targets(&self) -> Result<CalendarTargets>;
    fn monthly_targets(&self) -> Result<MonthlyTargets>;
    fn pipeline(&self) -> Result<Vec<PipelineOpportunity>>;
    fn work_tickets(&self) -> Result<Vec<WorkTicket>>;
    fn capacities(&self) -> Result<MonthlyCapacities>;
    fn revenue_actuals(&self) -> Result<MonthlyRevenueActuals>;
}
