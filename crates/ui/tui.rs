use crate::data::{self, MetricLine, NOT_AVAILABLE};
use crate::picker::{Focus, RangePicker};
use chrono::NaiveDate;
use log::debug;
use rental::{Dashboard, DateRange, Locale, RentalRecord};
use std::{error::Error, io};

use ratatui::{
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Constraint, Direction, Layout, Rect},
    style::{self, Color, Modifier, Style, Stylize},
    Frame, Terminal,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Gauge, Paragraph, Sparkline},
};
use style::palette::tailwind;

const PALETTES: [tailwind::Palette; 4] = [
    tailwind::BLUE,
    tailwind::EMERALD,
    tailwind::INDIGO,
    tailwind::RED,
];
const INFO_TEXT: &str =
    "(Esc) quit | (Tab) start/end | (←/→) ±1 day | (↑/↓) ±30 days | (r) full range | (c) next color";

struct DashboardColors {
    buffer_bg: Color,
    header_fg: Color,
    text_fg: Color,
    accent: Color,
    muted: Color,
    footer_border_color: Color,
}

impl DashboardColors {
    const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            header_fg: tailwind::SLATE.c200,
            text_fg: tailwind::SLATE.c200,
            accent: color.c400,
            muted: tailwind::SLATE.c600,
            footer_border_color: color.c400,
        }
    }
}

struct App<'a> {
    records: &'a [RentalRecord],
    locale: Locale,
    picker: RangePicker,
    dashboard: Dashboard,
    colors: DashboardColors,
    color_index: usize,
}

impl<'a> App<'a> {
    fn new(
        records: &'a [RentalRecord],
        bounds: DateRange,
        initial: DateRange,
        locale: Locale,
    ) -> rental::Result<Self> {
        let picker = RangePicker::new(bounds, initial);
        let dashboard = Dashboard::build(records, picker.range(), locale)?;
        Ok(Self {
            records,
            locale,
            picker,
            dashboard,
            colors: DashboardColors::new(&PALETTES[0]),
            color_index: 0,
        })
    }

    fn refresh(&mut self) -> rental::Result<()> {
        let range = self.picker.range();
        debug!("recompute dashboard for {}..={}", range.start, range.end);
        self.dashboard = Dashboard::build(self.records, range, self.locale)?;
        Ok(())
    }

    pub fn shift(&mut self, days: i64) -> rental::Result<()> {
        if self.picker.shift(days) {
            self.refresh()?;
        }
        Ok(())
    }

    pub fn reset(&mut self) -> rental::Result<()> {
        if self.picker.reset() {
            self.refresh()?;
        }
        Ok(())
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTES.len();
    }

    pub fn set_colors(&mut self) {
        self.colors = DashboardColors::new(&PALETTES[self.color_index]);
    }
}

/// Runs the interactive dashboard until the user quits.
///
/// `records` must contain at least one row; `bounds` is its full date range.
pub fn run(
    records: &[RentalRecord],
    bounds: DateRange,
    initial: DateRange,
    locale: Locale,
) -> Result<(), Box<dyn Error>> {
    // fail on bad data before touching the terminal
    let app = App::new(records, bounds, initial, locale)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Tab => app.picker.toggle_focus(),
                    KeyCode::Char('l') | KeyCode::Right => app.shift(1)?,
                    KeyCode::Char('h') | KeyCode::Left => app.shift(-1)?,
                    KeyCode::Char('k') | KeyCode::Up => app.shift(30)?,
                    KeyCode::Char('j') | KeyCode::Down => app.shift(-30)?,
                    KeyCode::Char('r') => app.reset()?,
                    KeyCode::Char('c') => app.next_color(),
                    _ => {}
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rects = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(7),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Length(3),
    ])
    .split(f.area());

    app.set_colors();

    f.render_widget(Block::new().bg(app.colors.buffer_bg), f.area());

    render_header(f, app, rects[0]);

    render_daily(f, app, rects[1]);

    render_riders(f, app, rects[2]);

    render_weekdays(f, app, rects[3]);

    render_footer(f, app, rects[4]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let range = app.picker.range();
    let focus = app.picker.focus();
    let bound = |label: &str, date: NaiveDate, focused: bool| {
        let style = if focused {
            Style::new()
                .fg(app.colors.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::new().fg(app.colors.text_fg)
        };
        Span::styled(format!(" {}: {} ", label, date), style)
    };
    let line = Line::from(vec![
        Span::styled(
            "Bike Sharing Dashboard  ",
            Style::new()
                .fg(app.colors.header_fg)
                .add_modifier(Modifier::BOLD),
        ),
        bound("start", range.start, focus == Focus::Start),
        Span::raw(" "),
        bound("end", range.end, focus == Focus::End),
    ]);
    let header = Paragraph::new(line).block(
        Block::bordered().border_style(Style::new().fg(app.colors.footer_border_color)),
    );
    f.render_widget(header, area);
}

fn split_section(area: Rect, metrics: &[MetricLine]) -> (Rect, Rect) {
    // border plus one column of padding on each side
    let width = data::panel_width(metrics).saturating_add(4);
    let rects = Layout::horizontal([Constraint::Length(width), Constraint::Min(10)]).split(area);
    (rects[0], rects[1])
}

fn metrics_panel(title: &'static str, metrics: &[MetricLine], app: &App) -> Paragraph<'static> {
    let lines: Vec<Line> = metrics
        .iter()
        .map(|m| {
            let value_style = match m.value.chars().next() {
                Some('+') => Style::new().fg(tailwind::GREEN.c400),
                Some('-') => Style::new().fg(tailwind::RED.c400),
                _ => Style::new().fg(app.colors.text_fg),
            };
            Line::from(vec![
                Span::styled(format!(" {}: ", m.title), Style::new().fg(app.colors.muted)),
                Span::styled(m.value.clone(), value_style.add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    Paragraph::new(lines).block(Block::bordered().title(title))
}

fn empty_panel(title: &'static str, app: &App) -> Paragraph<'static> {
    Paragraph::new("No rentals in the selected range")
        .style(Style::new().fg(app.colors.muted))
        .centered()
        .block(Block::bordered().title(title))
}

fn render_daily(f: &mut Frame, app: &App, area: Rect) {
    let metrics = data::daily_metrics(&app.dashboard.metrics);
    let (left, right) = split_section(area, &metrics);
    f.render_widget(metrics_panel("Daily rentals", &metrics, app), left);

    if app.dashboard.is_empty() {
        f.render_widget(empty_panel("Rentals per day", app), right);
        return;
    }
    // newest days win when the series is wider than the panel
    let visible_width = right.width.saturating_sub(2) as usize;
    let counts: Vec<u64> = app.dashboard.daily_orders.iter().map(|o| o.cnt).collect();
    let visible = &counts[counts.len().saturating_sub(visible_width)..];
    let sparkline = Sparkline::default()
        .block(Block::bordered().title("Rentals per day"))
        .data(visible)
        .style(Style::new().fg(app.colors.accent));
    f.render_widget(sparkline, right);
}

fn render_riders(f: &mut Frame, app: &App, area: Rect) {
    let metrics = data::rider_metrics(&app.dashboard.metrics);
    let (left, right) = split_section(area, &metrics);
    f.render_widget(metrics_panel("Rider demographics", &metrics, app), left);

    let (ratio, label) = match app.dashboard.metrics.casual_share {
        Some(share) => (
            share.clamp(0.0, 1.0),
            format!(
                "casual {} | registered {}",
                data::format_share(Some(share)),
                data::format_share(Some(1.0 - share))
            ),
        ),
        None => (0.0, NOT_AVAILABLE.to_string()),
    };
    let gauge = Gauge::default()
        .block(Block::bordered().title("Casual vs Registered"))
        .gauge_style(Style::new().fg(app.colors.accent).bg(app.colors.muted))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, right);
}

fn render_weekdays(f: &mut Frame, app: &App, area: Rect) {
    let metrics = data::weekday_metrics(&app.dashboard.metrics);
    let (left, right) = split_section(area, &metrics);
    f.render_widget(metrics_panel("Weekdays", &metrics, app), left);

    if app.dashboard.weekdays.is_empty() {
        f.render_widget(empty_panel("Rentals by weekday", app), right);
        return;
    }
    // busiest and quietest stand out
    let last = app.dashboard.weekdays.len() - 1;
    let bars: Vec<Bar> = app
        .dashboard
        .weekdays
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let color = if i == 0 || i == last {
                app.colors.accent
            } else {
                app.colors.muted
            };
            Bar::default()
                .value(w.cnt_total)
                .label(Line::from(w.weekday_label))
                .text_value(data::format_count(w.cnt_total))
                .style(Style::new().fg(color))
                .value_style(Style::new().fg(app.colors.header_fg).bg(color))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::bordered().title("Rentals by weekday"))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, right);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let info_footer = Paragraph::new(Line::from(INFO_TEXT))
        .style(Style::new().fg(app.colors.text_fg).bg(app.colors.buffer_bg))
        .centered()
        .block(
            Block::bordered()
                .border_type(BorderType::Double)
                .border_style(Style::new().fg(app.colors.footer_border_color)),
        );
    f.render_widget(info_footer, area);
}
