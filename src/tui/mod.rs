//! TUI module - Terminal analytics dashboard with ratatui

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::analytics::{
    AnalyticsService, ChartData, DashboardStreaks, PersonalRecord, Timeframe, WeightProgression,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Number of personal records listed
const MAX_RECORDS: usize = 10;

/// Everything the dashboard shows, computed before the terminal opens
pub struct DashboardData {
    pub streaks: DashboardStreaks,
    pub charts: Vec<ChartData>,
    pub records: Vec<PersonalRecord>,
    pub weight: WeightProgression,
}

impl DashboardData {
    pub async fn load(service: &AnalyticsService, today: NaiveDate) -> Self {
        let mut charts = Vec::with_capacity(Timeframe::all().len());
        for &timeframe in Timeframe::all() {
            charts.push(service.analytics_charts(timeframe, today).await);
        }

        let (streaks, prs, weight) = tokio::join!(
            service.dashboard_streaks(today),
            service.personal_records(today),
            service.weight_progression(),
        );

        Self {
            streaks,
            charts,
            records: prs.sorted().into_iter().take(MAX_RECORDS).cloned().collect(),
            weight,
        }
    }

    fn chart(&self, timeframe: Timeframe) -> Option<&ChartData> {
        self.charts.iter().find(|c| c.timeframe == timeframe)
    }
}

/// App state for TUI
pub struct App {
    data: DashboardData,
    timeframe: Timeframe,
    should_quit: bool,
}

impl App {
    pub fn new(data: DashboardData) -> Self {
        Self {
            data,
            timeframe: Timeframe::Week,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(MAX_RECORDS as u16 + 3),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        if let Some(chart) = self.data.chart(self.timeframe) {
            self.render_periods(frame, middle[0], chart);
            self.render_calorie_chart(frame, middle[1], chart);
        }

        self.render_records(frame, chunks[2]);

        // Footer
        let footer = Paragraph::new("q: quit | tab: next timeframe")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let streaks = &self.data.streaks;
        let weight = match (self.data.weight.current_weight, self.data.weight.change) {
            (Some(current), Some(change)) => format!(" | weight {:.1} ({:+.1})", current, change),
            _ => String::new(),
        };
        let text = format!(
            "fitlog | streak {}d (workout {}d, food {}d){}",
            streaks.activity, streaks.workout, streaks.food, weight
        );
        let header = Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn render_periods(&self, frame: &mut Frame, area: Rect, chart: &ChartData) {
        let rows: Vec<Row> = chart
            .aggregated
            .iter()
            .rev()
            .map(|p| {
                Row::new(vec![
                    Cell::from(p.label.clone()),
                    Cell::from(format!("{:.0}", p.calories)),
                    Cell::from(format!("{:.0}/{:.0}/{:.0}", p.protein, p.carbs, p.fat)),
                    Cell::from(format!("{:.0}", p.volume)),
                    Cell::from(p.days_with_workout.to_string()),
                ])
            })
            .collect();

        let s = &chart.summary;
        let title = format!(
            "{} | avg {:.0} kcal over {} days | {} workouts",
            self.timeframe.label(),
            s.avg_calories,
            s.days_with_food,
            s.days_with_workout
        );

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Min(8),
            ],
        )
        .header(Row::new(vec!["Period", "kcal", "P/C/F", "Volume", "Workouts"]).style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title(title));

        frame.render_widget(table, area);
    }

    fn render_calorie_chart(&self, frame: &mut Frame, area: Rect, chart: &ChartData) {
        let bars: Vec<(&str, u64)> = chart
            .aggregated
            .iter()
            .map(|p| (p.label.as_str(), p.calories.max(0.0) as u64))
            .collect();

        let barchart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Calories"))
            .bar_width(6)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Green))
            .data(bars.as_slice());

        frame.render_widget(barchart, area);
    }

    fn render_records(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .data
            .records
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.exercise_name.clone()),
                    Cell::from(format!("{:.0}", r.one_rep_max)),
                    Cell::from(format!("{} x {}", r.weight, r.reps)),
                    Cell::from(r.date.format("%Y-%m-%d").to_string()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(24),
                Constraint::Length(8),
                Constraint::Length(14),
                Constraint::Min(12),
            ],
        )
        .header(Row::new(vec!["Exercise", "1RM", "Best set", "Date"]).style(Style::default().bold()))
        .block(Block::default().borders(Borders::ALL).title("Personal records"));

        frame.render_widget(table, area);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                        KeyCode::Tab => self.timeframe = self.timeframe.next(),
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
