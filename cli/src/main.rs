mod dashboard;
mod report;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use opsboard_core::input::parse_month_label;
use opsboard_core::time::month_key;
use opsboard_core::usecase::daily_table::DailyTableUseCase;
use opsboard_core::usecase::outlook::OutlookUseCase;
use opsboard_core::usecase::revenue::RevenueUseCase;
use opsboard_core::usecase::summary::SummaryUseCase;
use opsboard_core::{
    parse_as_of, parse_division, parse_view, Config, DayKey, FileSourceRepository, SourceService,
    SourceSnapshot,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "opsboard")]
#[command(about = "Hours budget, actuals and pipeline board", long_about = None)]
struct Cli {
    /// Directory holding the source JSON files (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Resolved budget and actuals for one day
    Day {
        /// YYYY-MM-DD, today, yesterday or -Nd
        date: String,
    },
    /// Month-to-date and year-to-date coverage
    Summary {
        #[arg(long)]
        as_of: Option<String>,
        /// maint, const or total
        #[arg(long, default_value = "total")]
        view: String,
    },
    /// Day-by-day budget against actuals, newest first
    Table {
        #[arg(long)]
        as_of: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Monthly target, capacity, tickets and pipeline hours
    Outlook {
        /// maint or const
        #[arg(long, default_value = "maint")]
        division: String,
    },
    /// Revenue pace for a month and totals for the year
    Revenue {
        /// YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        #[arg(long, default_value = "total")]
        view: String,
    },
    /// Open the terminal dashboard
    Dashboard {
        #[arg(long)]
        as_of: Option<String>,
    },
}

fn as_of_or_yesterday(input: Option<&str>, today: NaiveDate) -> Result<DayKey> {
    parse_as_of(input.unwrap_or("yesterday"), today)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_snapshot(data_dir: Option<PathBuf>) -> Result<(Config, SourceSnapshot)> {
    let (config, data_dir) = Config::for_data_dir(data_dir)?;
    log::debug!("reading sources from {}", data_dir.display());
    let repo = FileSourceRepository::new(Some(data_dir))?;
    let snapshot = SourceService::new(repo).load();
    Ok((config, snapshot))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let (config, snapshot) = load_snapshot(cli.data_dir)?;
    let today = Local::now().date_naive();
    let sources = snapshot.budget_sources();

    match cli.command {
        Some(Commands::Day { date }) => {
            let day = parse_as_of(&date, today)?;
            let row = DailyTableUseCase::new(sources, config.short_horizon).row(day);
            if cli.json {
                print_json(&row)?;
            } else {
                report::print_day(&row);
            }
        }
        Some(Commands::Summary { as_of, view }) => {
            let as_of = as_of_or_yesterday(as_of.as_deref(), today)?;
            let view = parse_view(&view)?;
            let usecase = SummaryUseCase::new(sources, config.period_tracking);
            let summaries = vec![
                usecase.month_to_date(as_of, view),
                usecase.year_to_date(as_of, view),
            ];
            if cli.json {
                print_json(&summaries)?;
            } else {
                report::print_summaries(&summaries);
            }
        }
        Some(Commands::Table { as_of, days }) => {
            let as_of = as_of_or_yesterday(as_of.as_deref(), today)?;
            let days = days.unwrap_or(config.history_days);
            let rows = DailyTableUseCase::new(sources, config.short_horizon).rows(as_of, days);
            if cli.json {
                print_json(&rows)?;
            } else {
                report::print_daily_table(&rows);
            }
        }
        Some(Commands::Outlook { division }) => {
            let division = parse_division(&division)?;
            let months = snapshot.tracked_months(today.year());
            let outlook = OutlookUseCase::new(&snapshot).hours_outlook(division, &months);
            if cli.json {
                print_json(&outlook)?;
            } else {
                report::print_outlook(&outlook);
            }
        }
        Some(Commands::Revenue { month, view }) => {
            let month = match month {
                Some(label) => parse_month_label(&label)
                    .ok_or_else(|| anyhow!("Invalid month: {}", label))?,
                None => month_key(today),
            };
            let view = parse_view(&view)?;
            let months = snapshot.tracked_months(month.year());
            let usecase = RevenueUseCase::new(&snapshot, config.period_tracking);
            let pace = usecase.pace(month, view, today);
            let year = usecase.year(view, &months);
            if cli.json {
                print_json(&(pace, year))?;
            } else {
                report::print_revenue(&pace, &year);
            }
        }
        Some(Commands::Dashboard { as_of }) => {
            let as_of = as_of_or_yesterday(as_of.as_deref(), today)?;
            dashboard::run(&snapshot, &config, as_of)?;
        }
        None => {
            let as_of = as_of_or_yesterday(None, today)?;
            dashboard::run(&snapshot, &config, as_of)?;
        }
    }

    if !cli.json {
        report::print_source_warnings(&snapshot.report);
    }

    Ok(())
}
