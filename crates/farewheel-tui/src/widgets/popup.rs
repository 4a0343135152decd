use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::DistancePrompt;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// First-run hint floating over the top of the carousel
    pub fn render_onboarding_hint(frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = 44u16.min(area.width.saturating_sub(2));
        let height = 4u16.min(area.height);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let popup_area = Rect::new(x, area.y, width, height);

        frame.render_widget(Clear, popup_area);
        let block = Block::default()
            .title(" Swipe ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.info))
            .style(Style::default().bg(theme.bg1));

        let text = vec![
            Line::from(Span::styled(
                "« drag, scroll or press h/l »",
                Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "click the front card to see fares",
                Style::default().fg(theme.grey1),
            )),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center),
            popup_area,
        );
    }

    /// Distance entry: a number of km or "<place> to <place>"
    pub fn render_distance_prompt(frame: &mut Frame, prompt: &DistancePrompt, theme: &Theme) {
        let area = frame.area();
        let popup_width = 56u16.min(area.width.saturating_sub(4));
        let popup_height = 8u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Trip distance ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Help
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Error
            ])
            .split(inner_area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "km, or a route like \"Kochi to Thrissur\"",
                Style::default().fg(theme.grey1),
            )),
            chunks[0],
        );

        let visible = truncate_left(&prompt.input, chunks[2].width.saturating_sub(3) as usize);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("> ", Style::default().fg(theme.accent)),
                Span::styled(visible, Style::default().fg(theme.fg0)),
                Span::styled("_", Style::default().fg(theme.grey1)),
            ])),
            chunks[2],
        );

        if let Some(error) = &prompt.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(theme.error))),
                chunks[4],
            );
        }
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Keep the tail of `s` so the cursor end stays visible
fn truncate_left(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        s.chars().skip(count - max_len).collect()
    }
}
