use cardfolio_core::{CardFace, CardRecord, RevealSnapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use tokio::time::Instant;

use crate::app::App;
use crate::theme::PlatinumNoir;
use crate::widgets::card_stack::truncate;

const CARD_WIDTH: u16 = 48;
const CARD_HEIGHT: u16 = 12;
/// Narrower than this only the outline is drawn
const MIN_CONTENT_WIDTH: u16 = 10;

pub struct RevealCardWidget;

impl RevealCardWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(
            Block::default().style(Style::default().bg(PlatinumNoir::BG0)),
            area,
        );

        let Some(card) = app.current_card() else {
            return;
        };
        let snapshot = app.reveal.snapshot();
        let now = Instant::now();
        let angle = snapshot.flip_angle(now);
        let rect = face_rect(area, angle, snapshot.zoomed);
        if rect.width == 0 || rect.height == 0 {
            return;
        }

        let face = snapshot.face(now);
        let border_color = match face {
            CardFace::Back => PlatinumNoir::GOLD,
            CardFace::Front => PlatinumNoir::ACCENT,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(PlatinumNoir::BG1).fg(PlatinumNoir::FG0));

        frame.render_widget(Clear, rect);
        if rect.width < MIN_CONTENT_WIDTH {
            frame.render_widget(block, rect);
            return;
        }

        let width = rect.width.saturating_sub(4) as usize;
        let lines = match face {
            CardFace::Back => back_face(card, &snapshot, width),
            CardFace::Front => front_face(card, width),
        };
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, rect);
    }
}

fn back_face(card: &CardRecord, snapshot: &RevealSnapshot, width: usize) -> Vec<Line<'static>> {
    let gold = Style::default().fg(PlatinumNoir::GOLD);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]", card.monogram()),
            gold.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate(&card.company.to_uppercase(), width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if !snapshot.is_turning() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "press space to reveal",
            Style::default().fg(PlatinumNoir::GREY1),
        )));
    }
    lines
}

fn front_face(card: &CardRecord, width: usize) -> Vec<Line<'static>> {
    let muted = Style::default().fg(PlatinumNoir::GREY1);
    vec![
        Line::from(""),
        Line::from(Span::styled(
            truncate(&card.owner, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(truncate(&card.role, width), muted)),
        Line::from(""),
        Line::from(Span::styled(
            truncate(&card.company, width),
            Style::default().fg(PlatinumNoir::GOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate(&card.navigation_target().path(), width),
            Style::default().fg(PlatinumNoir::GREY0),
        )),
    ]
}

/// Rectangle of the card at flip `angle` (degrees)
///
/// The card is squeezed horizontally by |cos(angle)| to fake the turn; the
/// zoomed card fills the area less a one-cell margin.
pub fn face_rect(area: Rect, angle: f64, zoomed: bool) -> Rect {
    let (base_width, base_height) = if zoomed {
        (area.width.saturating_sub(2), area.height.saturating_sub(2))
    } else {
        (CARD_WIDTH.min(area.width), CARD_HEIGHT.min(area.height))
    };

    let squeeze = angle.to_radians().cos().abs();
    let width = (base_width as f64 * squeeze).round() as u16;
    let width = width.clamp(base_width.min(1), base_width);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - base_height) / 2,
        width,
        height: base_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_rect_squeezes_with_angle() {
        let area = Rect::new(0, 0, 80, 24);

        let flat = face_rect(area, 0.0, false);
        assert_eq!(flat.width, CARD_WIDTH);
        assert_eq!(flat.height, CARD_HEIGHT);
        assert_eq!(flat.x, 16);
        assert_eq!(flat.y, 6);

        let edge_on = face_rect(area, 90.0, false);
        assert_eq!(edge_on.width, 1);

        let front = face_rect(area, 180.0, false);
        assert_eq!(front.width, CARD_WIDTH);

        let half = face_rect(area, 60.0, false);
        assert_eq!(half.width, 24);
    }

    #[test]
    fn test_zoomed_card_fills_area() {
        let area = Rect::new(0, 0, 80, 24);
        let zoomed = face_rect(area, 180.0, true);
        assert_eq!(zoomed, Rect::new(1, 1, 78, 22));
    }

    #[test]
    fn test_tiny_area() {
        let area = Rect::new(0, 0, 3, 2);
        let rect = face_rect(area, 0.0, false);
        assert!(rect.width <= 3 && rect.height <= 2);
    }
}
