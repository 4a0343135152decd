use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use farewheel_core::FareBreakdown;

use crate::app::App;
use crate::theme::Theme;

const CURRENCY: &str = "₹";

/// Expanded card: tab bar over the fare receipt
pub struct FareViewWidget;

impl FareViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let titles: Vec<&str> = app.carousel.items().iter().map(|i| i.title()).collect();
        let active = app.carousel.state().active_tab();

        let tab_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.grey0));
        let inner = tab_block.inner(chunks[0]);

        let tabs = Tabs::new(titles.clone())
            .block(tab_block)
            .select(active)
            .style(Style::default().fg(app.theme.grey2))
            .highlight_style(
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, chunks[0]);

        app.tab_areas = tab_hit_areas(inner, &titles);
        app.card_areas.clear();

        let receipt_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.accent))
            .style(Style::default().bg(app.theme.bg1));
        let body_width = receipt_block.inner(chunks[1]).width as usize;

        let lines = match &app.fare {
            Some(fare) => receipt_lines(fare, body_width, &app.theme),
            None => vec![Line::from(Span::styled(
                "Fare unavailable",
                Style::default().fg(app.theme.error),
            ))],
        };
        frame.render_widget(
            Paragraph::new(lines)
                .block(receipt_block)
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    }
}

/// Click targets for each tab title inside the tab bar's inner area.
/// Mirrors `Tabs` spacing: one space of padding either side and a
/// one-column divider between tabs.
pub fn tab_hit_areas(inner: Rect, titles: &[&str]) -> Vec<(usize, Rect)> {
    let mut areas = Vec::with_capacity(titles.len());
    let mut x = inner.x;
    for (i, title) in titles.iter().enumerate() {
        let width = title.width() as u16 + 2;
        if x >= inner.right() {
            break;
        }
        let width = width.min(inner.right() - x);
        areas.push((i, Rect::new(x, inner.y, width, 1.min(inner.height))));
        x = x.saturating_add(width + 1);
    }
    areas
}

/// `label ........ ₹ 123.45` padded to `width` columns
pub fn amount_line(label: &str, amount: f64, width: usize) -> String {
    let amount = format!("{} {:.2}", CURRENCY, amount);
    let used = label.width() + amount.width();
    let pad = width.saturating_sub(used).max(1);
    format!("{}{}{}", label, " ".repeat(pad), amount)
}

fn receipt_lines(fare: &FareBreakdown, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let grey = Style::default().fg(theme.grey1);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                fare.title().to_string(),
                Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   Receipt #{}", fare.receipt), grey),
        ]),
        Line::from(Span::styled(
            format!(
                "{:.2} km | departs {} | waiting {} min",
                fare.trip.distance_km,
                fare.trip.departure.format("%H:%M"),
                fare.trip.waiting_minutes
            ),
            grey,
        )),
        Line::from(""),
    ];

    for line in &fare.lines {
        lines.push(Line::from(Span::styled(
            amount_line(&line.label, line.amount, width),
            Style::default().fg(theme.fg0),
        )));
        let note = match &line.details {
            Some(details) => format!("  {} ({})", details, line.tooltip),
            None => format!("  {}", line.tooltip),
        };
        lines.push(Line::from(Span::styled(note, Style::default().fg(theme.grey0))));
    }

    lines.push(Line::from(Span::styled("─".repeat(width), grey)));
    lines.push(
        Line::from(Span::styled(
            amount_line("Total", fare.total(), width),
            Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Left),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "1-3 switch tab | d distance | n night | +/- waiting | Esc close",
        Style::default().fg(theme.grey0),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_hit_areas_follow_titles() {
        let inner = Rect::new(1, 1, 60, 1);
        let areas = tab_hit_areas(inner, &["Auto Rikshaw", "Bus", "Taxi"]);
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0], (0, Rect::new(1, 1, 14, 1)));
        assert_eq!(areas[1], (1, Rect::new(16, 1, 5, 1)));
        assert_eq!(areas[2], (2, Rect::new(22, 1, 6, 1)));
    }

    #[test]
    fn test_tab_hit_areas_truncate() {
        let inner = Rect::new(0, 0, 16, 1);
        let areas = tab_hit_areas(inner, &["Auto Rikshaw", "Bus", "Taxi"]);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].1.width, 1);
    }

    #[test]
    fn test_amount_line_right_aligns() {
        let line = amount_line("Minimum fare", 30.0, 30);
        assert_eq!(line.width(), 30);
        assert!(line.starts_with("Minimum fare "));
        assert!(line.ends_with("₹ 30.00"));

        // Never glued together when the width is too small
        assert_eq!(amount_line("Total", 5.0, 3), "Total ₹ 5.00");
    }
}
