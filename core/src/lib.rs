pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::Config;
pub use error::CalendarError;
pub use input::{expand_key, parse_as_of, parse_division, parse_view};
pub use model::budget::{ActualTotals, BudgetSource, HoursView, ResolvedBudget};
pub use model::pipeline::Division;
pub use repository::{FileSourceRepository, SourceRepository};
pub use service::budget_service::{resolve_day_budget, sum_budget_for_range, BudgetSources};
pub use service::coverage::{CoverageBand, CoveragePolicy};
pub use service::source_service::{SourceService, SourceSnapshot};
pub use time::{DayKey, MonthKey};
