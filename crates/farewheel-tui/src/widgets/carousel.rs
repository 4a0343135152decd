use std::time::Instant;

use farewheel_core::{CarouselSnapshot, Direction, VehicleKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

/// Columns between neighboring cards
const CARD_GAP: u16 = 2;
/// Rows the side cards are inset from the front card
const SIDE_INSET: u16 = 2;

/// Where one card lands in the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub index: usize,
    /// Position relative to the front card
    pub offset: usize,
    pub rect: Rect,
}

/// Lay out the front card and its two neighbors. `shift` moves every card
/// horizontally (drag offset plus slide animation), clipped to `area`.
/// Cards further around the ring are not drawn.
pub fn card_slots(area: Rect, snapshot: &CarouselSnapshot, shift: i32) -> Vec<CardSlot> {
    let len = snapshot.ring_offsets.len();
    if len == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }

    let card_w = (area.width.saturating_sub(2 * CARD_GAP) / 3).max(1);
    let center_x = i32::from(area.x) + i32::from(area.width.saturating_sub(card_w) / 2);
    let stride = i32::from(card_w + CARD_GAP);

    let mut slots = Vec::new();
    for (index, &offset) in snapshot.ring_offsets.iter().enumerate() {
        let (column, inset) = if offset == 0 {
            (0, 0)
        } else if offset == 1 {
            (1, SIDE_INSET)
        } else if offset == len - 1 {
            (-1, SIDE_INSET)
        } else {
            continue;
        };

        let height = area.height.saturating_sub(2 * inset).max(1);
        let x = center_x + column * stride + shift;
        if let Some(rect) = clip(x, area.y + inset, card_w, height, area) {
            slots.push(CardSlot {
                index,
                offset,
                rect,
            });
        }
    }
    slots
}

fn clip(x: i32, y: u16, width: u16, height: u16, area: Rect) -> Option<Rect> {
    let left = x.max(i32::from(area.x));
    let right = (x + i32::from(width)).min(i32::from(area.right()));
    if right <= left {
        return None;
    }
    let left = u16::try_from(left).ok()?;
    let right = u16::try_from(right).ok()?;
    Some(Rect::new(left, y, right - left, height))
}

pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App, now: Instant) {
        let snapshot = app.carousel.snapshot();
        let card_w = area.width.saturating_sub(2 * CARD_GAP) / 3;
        let stride = f64::from(card_w + CARD_GAP);
        let shift = app.slide.shift(now) * stride + snapshot.drag_offset.unwrap_or(0.0);

        let mut slots = card_slots(area, &snapshot, shift.round() as i32);
        // Front last so it covers its neighbors mid-slide; the previous
        // front is drawn above the other side card.
        slots.sort_by_key(|slot| {
            (
                slot.offset == 0,
                slot.index == snapshot.previous_front,
            )
        });

        app.card_areas = slots.iter().map(|s| (s.index, s.rect)).collect();
        app.tab_areas.clear();

        for slot in &slots {
            let kind = app.carousel.items()[slot.index].kind;
            render_card(frame, slot, kind, &snapshot, &app.theme);
        }

        if let Some(front) = slots.iter().find(|s| s.offset == 0) {
            render_swipe_hint(frame, front.rect, &snapshot, app.slide.wiggle(now), &app.theme);
        }
    }
}

fn render_card(
    frame: &mut Frame,
    slot: &CardSlot,
    kind: VehicleKind,
    snapshot: &CarouselSnapshot,
    theme: &Theme,
) {
    let is_front = slot.offset == 0;
    let border = if is_front {
        theme.accent
    } else if slot.index == snapshot.previous_front {
        theme.previous
    } else {
        theme.grey0
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if is_front {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", kind.title()))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(if is_front { theme.bg1 } else { theme.bg0 }));

    let mut lines = vec![Line::from("")];
    lines.extend(glyph(kind).iter().map(|row| {
        Line::from(Span::styled(*row, Style::default().fg(theme.yellow)))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        kind.title(),
        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
    )));
    if is_front {
        lines.push(Line::from(Span::styled(
            "Enter or click to see fares",
            Style::default().fg(theme.grey1),
        )));
    }

    frame.render_widget(Clear, slot.rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        slot.rect,
    );
}

/// Arrow along the bottom edge of the front card that wiggles with the pulse
fn render_swipe_hint(
    frame: &mut Frame,
    card: Rect,
    snapshot: &CarouselSnapshot,
    wiggle: Option<i16>,
    theme: &Theme,
) {
    let (Some(dx), Some(direction)) = (wiggle, snapshot.pulse.direction) else {
        return;
    };
    if card.height < 3 || card.width < 8 {
        return;
    }
    let arrow = match direction {
        Direction::Next => "»»",
        Direction::Previous => "««",
    };
    let base = i32::from(card.x) + i32::from(card.width / 2) - 1 + i32::from(dx);
    let Some(hint) = clip(base, card.bottom() - 2, 2, 1, card) else {
        return;
    };
    frame.render_widget(
        Paragraph::new(Span::styled(arrow, Style::default().fg(theme.aqua))),
        hint,
    );
}

fn glyph(kind: VehicleKind) -> &'static [&'static str] {
    match kind {
        VehicleKind::Auto => &[" ___ ", "|_|_\\", "'o-o'"],
        VehicleKind::Bus => &[" _______ ", "|_|_|_|_|", " 'o---o' "],
        VehicleKind::Taxi => &["  _[]_  ", " /_||_\\ ", "'o----o'"],
    }
}
