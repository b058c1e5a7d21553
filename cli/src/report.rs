use opsboard_core::service::dto::{DailyRow, HoursOutlook, PeriodSummary, RevenuePace, RevenueYear};
use opsboard_core::service::source_service::{SourceReport, SourceStatus};
use opsboard_core::CoverageBand;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Budget (h)")]
    budget: String,
    #[tabled(rename = "Actual (h)")]
    actual: String,
    #[tabled(rename = "Variance")]
    variance: String,
    #[tabled(rename = "Coverage")]
    coverage: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(Tabled)]
struct DayTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    day_type: String,
    #[tabled(rename = "Budget (h)")]
    budget: String,
    #[tabled(rename = "Actual (h)")]
    actual: String,
    #[tabled(rename = "Delta (h)")]
    delta: String,
    #[tabled(rename = "Delta %")]
    delta_pct: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Missed")]
    missed: String,
    #[tabled(rename = "Safety")]
    safety: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Tickets")]
    tickets: String,
    #[tabled(rename = "Pipeline")]
    pipeline: String,
    #[tabled(rename = "Projected")]
    projected: String,
}

fn band_color(band: CoverageBand) -> &'static str {
    match band {
        CoverageBand::OnTrack => "\x1b[32m",
        CoverageBand::Close => "\x1b[33m",
        CoverageBand::Behind => "\x1b[31m",
        CoverageBand::NoTarget => "\x1b[90m",
    }
}

fn status(band: CoverageBand) -> String {
    format!("{}{}\x1b[0m", band_color(band), band.label())
}

fn percent(ratio: Option<f64>) -> String {
    ratio.map(|r| format!("{:.0}%", r * 100.0)).unwrap_or_else(|| "-".to_string())
}

fn signed_percent(ratio: Option<f64>) -> String {
    ratio.map(|r| format!("{:+.1}%", r * 100.0)).unwrap_or_else(|| "-".to_string())
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

pub fn print_day(row: &DailyRow) {
    println!(
        "\n\x1b[1;36m{} ({})\x1b[0m {}",
        row.date,
        row.day_of_week,
        row.day_type.label()
    );
    println!(
        "  Budget: {:.1}h (maint {:.1}, const {:.1}) from {}",
        row.budget.total(),
        row.budget.maint,
        row.budget.cons,
        row.budget.source.label()
    );
    println!(
        "  Actual: {:.1}h (maint {:.1}, const {:.1})",
        row.actual.total(),
        row.actual.maint,
        row.actual.cons
    );
    println!(
        "  Delta:  {:+.1}h {}  {}",
        row.delta_hours,
        signed_percent(row.delta_pct),
        status(row.band)
    );
    if row.missed_tickets > 0.0 || row.safety_incidents > 0.0 {
        println!(
            "  Missed tickets: {}  Safety incidents: {}",
            row.missed_tickets, row.safety_incidents
        );
    }
    if !row.notes.is_empty() {
        println!("  Notes: {}", row.notes);
    }
}

pub fn print_summaries(summaries: &[PeriodSummary]) {
    let Some(first) = summaries.first() else {
        return;
    };
    println!("\n\x1b[1;36m{} hours as of {}\x1b[0m", first.view.label(), first.end);

    let rows = summaries
        .iter()
        .map(|s| SummaryRow {
            period: s.period.label().to_string(),
            range: format!("{} .. {}", s.start, s.end),
            budget: format!("{:.1}", s.budget_hours),
            actual: format!("{:.1}", s.actual_hours),
            variance: format!("{:+.1}", s.variance),
            coverage: percent(s.ratio),
            status: status(s.band),
            source: s.budget.source.label().to_string(),
        })
        .collect();
    print_table::<SummaryRow>(rows);
}

pub fn print_daily_table(rows: &[DailyRow]) {
    if rows.is_empty() {
        println!("No days to show.");
        return;
    }

    let table_rows = rows
        .iter()
        .map(|r| DayTableRow {
            date: format!("{} ({})", r.date, r.day_of_week),
            day_type: r.day_type.label().to_string(),
            budget: format!("{:.1}", r.budget.total()),
            actual: format!("{:.1}", r.actual.total()),
            delta: format!("{:+.1}", r.delta_hours),
            delta_pct: signed_percent(r.delta_pct),
            status: status(r.band),
            missed: format!("{}", r.missed_tickets),
            safety: format!("{}", r.safety_incidents),
            notes: r.notes.clone(),
        })
        .collect();
    print_table::<DayTableRow>(table_rows);
}

pub fn print_outlook(outlook: &HoursOutlook) {
    println!("\n\x1b[1;36m{:?} hours outlook\x1b[0m", outlook.division);

    let rows = outlook
        .rows
        .iter()
        .map(|r| MonthRow {
            month: r.month.to_string(),
            target: format!("{:.0}", r.target_hours),
            capacity: format!("{:.0}", r.capacity_hours),
            tickets: format!("{:.0}", r.ticket_hours),
            pipeline: format!("{:.0}", r.pipeline_hours),
            projected: format!("{:.0}", r.projected_hours()),
        })
        .collect();
    print_table::<MonthRow>(rows);
}

pub fn print_revenue(pace: &RevenuePace, year: &RevenueYear) {
    println!("\n\x1b[1;36m{} revenue, {}\x1b[0m", pace.view.label(), pace.month);
    println!("  Target:    ${:.0}", pace.target);
    println!("  Actual:    ${:.0}", pace.actual);
    println!(
        "  Projected: ${:.0} ({})  {}",
        pace.projected,
        percent(pace.ratio),
        status(pace.band)
    );

    println!("\n\x1b[1;36m{} revenue, year\x1b[0m", year.view.label());
    println!("  Target:             ${:.0}", year.target);
    println!("  Pipeline:           ${:.0}", year.pipeline_unweighted);
    println!("  Pipeline weighted:  ${:.0}", year.pipeline_weighted);
}

/// Sources that failed to load, on stderr.
pub fn print_source_warnings(report: &[SourceReport]) {
    for source in report {
        if let SourceStatus::Failed(reason) = &source.status {
            eprintln!("\x1b[33mwarning:\x1b[0m {} unavailable: {}", source.name, reason);
        }
    }
}
