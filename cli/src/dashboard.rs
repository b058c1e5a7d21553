use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use opsboard_core::service::dto::{DailyRow, PeriodSummary};
use opsboard_core::service::source_service::SourceStatus;
use opsboard_core::usecase::daily_table::DailyTableUseCase;
use opsboard_core::usecase::summary::SummaryUseCase;
use opsboard_core::{Config, CoverageBand, DayKey, HoursView, SourceSnapshot};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Padding, Paragraph},
};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    budget: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    budget: Color::Blue,
};

fn band_color(band: CoverageBand) -> Color {
    match band {
        CoverageBand::OnTrack => Color::Green,
        CoverageBand::Close => Color::Yellow,
        CoverageBand::Behind => Color::Red,
        CoverageBand::NoTarget => THEME.muted,
    }
}

pub struct DashboardApp<'a> {
    snapshot: &'a SourceSnapshot,
    config: &'a Config,
    pub as_of: DayKey,
    pub view: HoursView,
    pub summaries: Vec<PeriodSummary>,
    pub rows: Vec<DailyRow>,
}

impl<'a> DashboardApp<'a> {
    pub fn new(snapshot: &'a SourceSnapshot, config: &'a Config, as_of: DayKey) -> Self {
        let mut app = Self {
            snapshot,
            config,
            as_of,
            view: HoursView::Total,
            summaries: Vec::new(),
            rows: Vec::new(),
        };
        app.refresh();
        app
    }

    fn refresh(&mut self) {
        let sources = self.snapshot.budget_sources();
        let summary = SummaryUseCase::new(sources, self.config.period_tracking);
        self.summaries = vec![
            summary.month_to_date(self.as_of, self.view),
            summary.year_to_date(self.as_of, self.view),
        ];
        // Oldest first for the chart.
        let mut rows = DailyTableUseCase::new(sources, self.config.short_horizon)
            .rows(self.as_of, self.config.history_days);
        rows.reverse();
        self.rows = rows;
    }

    pub fn previous_day(&mut self) {
        if let Some(day) = self.as_of.checked_sub_days(1) {
            self.as_of = day;
            self.refresh();
        }
    }

    pub fn next_day(&mut self) {
        if let Some(date) = self.as_of.date().succ_opt() {
            self.as_of = DayKey::from(date);
            self.refresh();
        }
    }

    pub fn cycle_view(&mut self) {
        self.view = match self.view {
            HoursView::Total => HoursView::Maintenance,
            HoursView::Maintenance => HoursView::Construction,
            HoursView::Construction => HoursView::Total,
        };
        self.refresh();
    }

    fn failed_sources(&self) -> Vec<&'static str> {
        self.snapshot
            .report
            .iter()
            .filter(|r| matches!(r.status, SourceStatus::Failed(_)))
            .map(|r| r.name)
            .collect()
    }
}

pub fn run(snapshot: &SourceSnapshot, config: &Config, as_of: DayKey) -> Result<()> {
    let mut app = DashboardApp::new(snapshot, config, as_of);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                        KeyCode::Char('v') => app.cycle_view(),
                        _ => {}
                    }
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn ui(frame: &mut Frame, app: &DashboardApp) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + gauges
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    // --- Header ---
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(1), Constraint::Length(40)])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled(
        "OPSBOARD",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(
            format!("{} ({})  {}", app.as_of, app.as_of.weekday_label(), app.view.label()),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", Style::default().fg(THEME.text)),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(THEME.muted)),
        main_layout[0],
    );

    // --- Content ---
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70),
            Constraint::Length(1),
            Constraint::Percentage(30),
        ])
        .split(main_layout[1]);

    draw_chart(frame, app, content_chunks[0]);
    draw_coverage_panel(frame, app, content_chunks[2]);

    // --- Footer ---
    let mut help = vec![
        Span::styled("DAY: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("VIEW: ", Style::default().fg(THEME.muted)),
        Span::styled("v", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ];
    let failed = app.failed_sources();
    if !failed.is_empty() {
        help.push(Span::raw("  "));
        help.push(Span::styled(
            format!("missing: {}", failed.join(", ")),
            Style::default().fg(Color::Yellow),
        ));
    }
    let footer = Paragraph::new(Line::from(help)).alignment(Alignment::Center);
    frame.render_widget(footer, main_layout[2]);
}

fn draw_chart(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let mut bar_items: Vec<Bar> = Vec::new();

    for row in &app.rows {
        let budget = row.budget.pick(app.view);
        let actual = row.actual.pick(app.view);

        bar_items.push(
            Bar::default()
                .label(row.date.date().format("%d").to_string())
                .value(budget.max(0.0).round() as u64)
                .style(Style::default().fg(THEME.budget))
                .text_value(format!("{:.0}", budget)),
        );
        bar_items.push(
            Bar::default()
                .value(actual.max(0.0).round() as u64)
                .style(Style::default().fg(band_color(row.band)))
                .text_value(format!("{:.0}", actual)),
        );
        // Spacer
        bar_items.push(Bar::default().value(0).text_value(String::new()));
    }

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(" Budget vs Actual (h) ");

    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(3)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bar_items));

    frame.render_widget(chart, area);
}

fn draw_coverage_panel(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let mut constraints = vec![Constraint::Length(4); app.summaries.len()];
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (summary, chunk) in app.summaries.iter().zip(chunks.iter()) {
        let ratio = summary.ratio.unwrap_or(0.0);
        let label = match summary.ratio {
            Some(r) => format!("{:.0}%  {}", r * 100.0, summary.band.label()),
            None => summary.band.label().to_string(),
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {} ", summary.period.label()))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(THEME.muted)),
            )
            .gauge_style(Style::default().fg(band_color(summary.band)))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, *chunk);
    }

    let mut lines = Vec::new();
    for summary in &app.summaries {
        lines.push(Line::from(vec![Span::styled(
            summary.period.label(),
            Style::default().add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(vec![
            Span::styled("Budget:   ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{:.1}h", summary.budget_hours), Style::default().fg(THEME.budget)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Actual:   ", Style::default().fg(THEME.muted)),
            Span::styled(
                format!("{:.1}h", summary.actual_hours),
                Style::default().fg(band_color(summary.band)),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Variance: ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{:+.1}h", summary.variance), Style::default().fg(THEME.text)),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(last) = chunks.last() {
        let info = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(" Summary "),
        );
        frame.render_widget(info, *last);
    }
}
