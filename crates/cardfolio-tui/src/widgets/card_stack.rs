use cardfolio_core::layout::{scroll_hint_opacity, ItemPose};
use cardfolio_core::CardRecord;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::theme::{fade, PlatinumNoir};

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 5;
/// Card width at scale 1, relative to the stack area
const WIDTH_RATIO: f64 = 0.8;
/// Below this opacity a card is not drawn
const HIDDEN_OPACITY: f64 = 0.05;
/// Below this opacity a card is drawn dimmed
const DIM_OPACITY: f64 = 0.5;

pub struct CardStackWidget;

impl CardStackWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(
            Block::default().style(Style::default().bg(PlatinumNoir::BG0)),
            area,
        );

        if app.wallet.is_empty() {
            let empty = Paragraph::new("No cards saved yet")
                .alignment(Alignment::Center)
                .style(Style::default().fg(PlatinumNoir::GREY1));
            frame.render_widget(empty, centered_row(area, area.height / 2));
            return;
        }

        let poses = app.engine.poses();
        let mut order: Vec<usize> = (0..poses.len()).collect();
        order.sort_by_key(|&index| poses[index].z_order);

        for index in order {
            let pose = &poses[index];
            if pose.opacity < HIDDEN_OPACITY {
                continue;
            }
            let (Some(card), Some(rect)) = (
                app.wallet.get(index),
                card_rect(area, pose, app.config.ui.units_per_row),
            ) else {
                continue;
            };

            let marker = if app.selection.is_active(index) {
                Marker::Active
            } else if app.cursor == index {
                Marker::Cursor
            } else {
                Marker::None
            };
            Self::render_card(frame, rect, index, card, pose, marker);
        }

        if app.config.ui.show_scroll_hint {
            Self::render_scroll_hint(frame, area, app.progress());
        }
    }

    fn render_card(
        frame: &mut Frame,
        rect: Rect,
        index: usize,
        card: &CardRecord,
        pose: &ItemPose,
        marker: Marker,
    ) {
        let opacity = pose.opacity;
        let mut base = Style::default()
            .fg(fade(PlatinumNoir::FG0, PlatinumNoir::BG1, opacity))
            .bg(PlatinumNoir::BG1);
        if opacity < DIM_OPACITY {
            base = base.add_modifier(Modifier::DIM);
        }

        let border_color = match marker {
            Marker::Active => PlatinumNoir::ACCENT,
            Marker::Cursor => PlatinumNoir::GOLD,
            Marker::None => PlatinumNoir::GREY0,
        };
        let mut border_style = base.fg(fade(border_color, PlatinumNoir::BG1, opacity));
        if marker == Marker::Active {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", index + 1))
            .style(base);

        let inner_width = rect.width.saturating_sub(4) as usize;
        let muted = base.fg(fade(PlatinumNoir::GREY1, PlatinumNoir::BG1, opacity));
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", card.monogram()),
                    base.fg(fade(PlatinumNoir::GOLD, PlatinumNoir::BG1, opacity))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    truncate(&card.company, inner_width.saturating_sub(3)),
                    base.add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!(" {}", truncate(&card.owner, inner_width)),
                base,
            )),
            Line::from(Span::styled(
                format!(" {}", truncate(&card.role, inner_width)),
                muted,
            )),
        ];

        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(lines).block(block), rect);
    }

    fn render_scroll_hint(frame: &mut Frame, area: Rect, progress: f64) {
        let opacity = scroll_hint_opacity(progress);
        if opacity < HIDDEN_OPACITY || area.height == 0 {
            return;
        }
        let hint = Paragraph::new("Scroll ↓")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(fade(PlatinumNoir::GREY1, PlatinumNoir::BG0, opacity))
                    .bg(PlatinumNoir::BG0),
            );
        frame.render_widget(hint, centered_row(area, area.height - 1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Active,
    Cursor,
    None,
}

/// Screen rectangle of a card at `pose`, clipped to `area`
///
/// The pose position maps to a row offset (`units_per_row` layout units per
/// row) and the scale to the card width. Returns `None` when the card lies
/// entirely below the area.
pub fn card_rect(area: Rect, pose: &ItemPose, units_per_row: f64) -> Option<Rect> {
    let units_per_row = if units_per_row > 0.0 { units_per_row } else { 1.0 };
    let row = (pose.position / units_per_row).round().max(0.0);
    if row >= area.height as f64 {
        return None;
    }
    let row = row as u16;

    let width = (area.width as f64 * WIDTH_RATIO * pose.scale).round();
    let width = (width.max(4.0) as u16).min(area.width);
    let height = CARD_HEIGHT.min(area.height - row);

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + row,
        width,
        height,
    })
}

/// Cut `text` to at most `max_width` columns, marking the cut with an ellipsis
pub fn truncate(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return out;
    }

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn centered_row(area: Rect, row: u16) -> Rect {
    Rect {
        x: area.x,
        y: area.y + row.min(area.height.saturating_sub(1)),
        width: area.width,
        height: 1.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cardfolio_core::{AppConfig, Wallet};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn pose(position: f64, scale: f64) -> ItemPose {
        ItemPose {
            position,
            depth: 0.0,
            scale,
            opacity: 1.0,
            z_order: 10,
        }
    }

    #[test]
    fn test_card_rect_rows_and_width() {
        let area = Rect::new(0, 0, 50, 30);

        let rect = card_rect(area, &pose(60.0, 1.0), 20.0).unwrap();
        assert_eq!(rect.y, 3);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.x, 5);
        assert_eq!(rect.height, CARD_HEIGHT);

        let small = card_rect(area, &pose(0.0, 0.9), 20.0).unwrap();
        assert_eq!(small.width, 36);
    }

    #[test]
    fn test_card_rect_clips_and_hides_offstage() {
        let area = Rect::new(0, 0, 50, 30);
        assert!(card_rect(area, &pose(1000.0, 0.9), 20.0).is_none());

        let clipped = card_rect(area, &pose(560.0, 1.0), 20.0).unwrap();
        assert_eq!(clipped.y, 28);
        assert_eq!(clipped.height, 2);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Cyberdyne", 20), "Cyberdyne");
        assert_eq!(truncate("Nebula Innovations", 8), "Nebula …");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_renders_settled_stack() {
        let mut app = App::new(Arc::new(AppConfig::default()), Wallet::sample());
        app.animator.set(1.0);
        app.update();
        app.engine.settle();

        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|frame| CardStackWidget::render(frame, frame.area(), &app))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Monolith Corp"));
        assert!(content.contains("Tyrell Corp"));
        assert!(!content.contains("Scroll"));
    }
}
