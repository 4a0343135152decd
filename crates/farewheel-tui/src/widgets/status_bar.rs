use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let expanded = app.carousel.state().is_expanded();
        let mode_str = match &app.mode {
            Mode::DistancePrompt(_) => "DISTANCE",
            Mode::Normal if expanded => "FARE",
            Mode::Normal => "BROWSE",
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} | {}", mode_str, msg),
            None => format!(
                " {} | {} | {:.2} km | {} | wait {} min",
                mode_str,
                app.carousel.current_item().title(),
                app.trip.distance_km,
                app.trip.departure.format("%H:%M"),
                app.trip.waiting_minutes
            ),
        };

        let help_hint = if app.is_input_mode() {
            " Enter:ok Esc:cancel "
        } else if expanded {
            " q:quit Esc:close 1-3:tab d:distance "
        } else {
            " q:quit h/l:swipe Enter:open d:distance "
        };
        let padding_len = (area.width as usize).saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
