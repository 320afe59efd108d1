use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, BorderType, Paragraph, Padding, Wrap},
};
use bikeshare_core::{format_thousands, DashboardView};

use crate::tui::app::{App, Focus};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    error: Color,
    casual: Color,
    registered: Color,
    regular_day: Color,
    holiday: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    error: Color::Red,
    casual: Color::Yellow,
    registered: Color::Green,
    regular_day: Color::Blue,
    holiday: Color::LightRed,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header / Date picker
            Constraint::Length(notice_height(&app.view)),
            Constraint::Min(10),   // Charts + Metrics
            Constraint::Length(1), // Footer / Help
        ])
        .split(size);

    draw_header(frame, app, main_layout[0]);
    draw_notices(frame, &app.view, main_layout[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(72), // Hourly chart
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(28), // Metrics + Day type chart
        ])
        .split(main_layout[2]);

    draw_hourly_chart(frame, &app.view, content_chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(8),
        ])
        .split(content_chunks[2]);

    draw_metrics(frame, &app.view, side_chunks[0]);
    draw_day_type_chart(frame, &app.view, side_chunks[1]);

    let help = Line::from(vec![
        Span::styled("SELECT: ", Style::default().fg(THEME.muted)),
        Span::styled("Tab ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("DAY: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("WEEK: ", Style::default().fg(THEME.muted)),
        Span::styled("↑/↓ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("MONTH: ", Style::default().fg(THEME.muted)),
        Span::styled("PgUp/PgDn ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("RESET: ", Style::default().fg(THEME.muted)),
        Span::styled("r ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center);
    frame.render_widget(footer, main_layout[3]);
}

fn notice_height(view: &DashboardView) -> u16 {
    if view.has_notices() {
        view.notices.len() as u16 + 2
    } else {
        0
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),     // Title
            Constraint::Length(40), // Date range picker
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "BIKE SHARING USAGE BY HOUR AND DAY",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(title, header_layout[0]);

    let picker = match app.range {
        Some(range) => {
            let date_style = |focus: Focus| {
                if app.focus == focus {
                    Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(THEME.text)
                }
            };
            Line::from(vec![
                Span::styled("Date Range ", Style::default().fg(THEME.muted)),
                Span::styled(range.start.format("%Y-%m-%d").to_string(), date_style(Focus::Start)),
                Span::styled(" → ", Style::default().fg(THEME.muted)),
                Span::styled(range.end.format("%Y-%m-%d").to_string(), date_style(Focus::End)),
            ])
        }
        None => Line::from(Span::styled("No dates available", Style::default().fg(THEME.muted))),
    };
    let picker = Paragraph::new(picker)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(picker, header_layout[1]);

    frame.render_widget(header_block, area);
}

fn draw_notices(frame: &mut Frame, view: &DashboardView, area: Rect) {
    if !view.has_notices() {
        return;
    }
    let lines: Vec<Line> = view
        .notices
        .iter()
        .map(|n| Line::from(Span::styled(n.as_str(), Style::default().fg(THEME.error))))
        .collect();
    let notices = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.error))
            .title(" Errors "),
    );
    frame.render_widget(notices, area);
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(title)
}

fn draw_placeholder(frame: &mut Frame, title: &str, area: Rect) {
    let placeholder = Paragraph::new(Span::styled("No data for this range", Style::default().fg(THEME.muted)))
        .alignment(Alignment::Center)
        .block(chart_block(title).padding(Padding::new(0, 0, area.height.saturating_sub(2) / 2, 0)));
    frame.render_widget(placeholder, area);
}

fn draw_hourly_chart(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let title = " Usage Distribution by Hour (total rentals) ";
    if view.hourly.is_empty() {
        draw_placeholder(frame, title, area);
        return;
    }

    // Shade bars from cool to warm by their share of the busiest hour.
    let max = view.hourly.iter().map(|h| h.total).max().unwrap_or(0).max(1);
    let bars: Vec<Bar> = view.hourly.iter().map(|h| {
        let ratio = h.total as f64 / max as f64;
        Bar::default()
            .label(h.label())
            .value(h.total)
            .style(Style::default().fg(heat_color(ratio)))
            .text_value(String::new())
    }).collect();

    // 24 bars of width 5 with a 1-cell gap fit in about 144 columns.
    let inner_width = area.width.saturating_sub(2) as usize;
    let count = bars.len().max(1);
    let bar_width = ((inner_width / count).saturating_sub(1)).clamp(1, 5) as u16;

    let chart = BarChart::default()
        .block(chart_block(title))
        .bar_width(bar_width)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .max(max);

    frame.render_widget(chart, area);
}

fn heat_color(ratio: f64) -> Color {
    match ratio {
        r if r >= 0.8 => Color::Red,
        r if r >= 0.6 => Color::LightRed,
        r if r >= 0.4 => Color::LightYellow,
        r if r >= 0.2 => Color::LightCyan,
        _ => Color::Blue,
    }
}

fn draw_metrics(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let text = match &view.metrics {
        Some(metrics) => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Casual:     ", Style::default().fg(THEME.muted)),
                Span::styled(format_thousands(metrics.casual), Style::default().fg(THEME.casual).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Registered: ", Style::default().fg(THEME.muted)),
                Span::styled(format_thousands(metrics.registered), Style::default().fg(THEME.registered).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Rows:       ", Style::default().fg(THEME.muted)),
                Span::styled(format_thousands(view.rows as u64), Style::default().fg(THEME.text)),
            ]),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled("No totals", Style::default().fg(THEME.muted))),
        ],
    };

    let metrics = Paragraph::new(text).block(chart_block(" Total Users "));
    frame.render_widget(metrics, area);
}

fn draw_day_type_chart(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let title = " Holiday vs Regular Day ";
    if view.holiday.is_empty() {
        draw_placeholder(frame, title, area);
        return;
    }

    let bars: Vec<Bar> = view.holiday.iter().map(|d| {
        let color = match d.flag {
            0 => THEME.regular_day,
            1 => THEME.holiday,
            _ => THEME.muted,
        };
        Bar::default()
            .label(d.label.clone())
            .value(d.total)
            .style(Style::default().fg(color))
            .value_style(Style::default().fg(THEME.text).bg(color))
            .text_value(format_thousands(d.total))
    }).collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let count = bars.len().max(1);
    let bar_width = ((inner_width / count).saturating_sub(2)).clamp(3, 14) as u16;

    let chart = BarChart::default()
        .block(chart_block(title))
        .bar_width(bar_width)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}
