use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, View};
use crate::theme::PlatinumNoir;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            match app.view {
                View::Wallet => {
                    let active = app
                        .selection
                        .active()
                        .map(|i| format!("{}", i + 1))
                        .unwrap_or_else(|| "-".to_string());
                    format!(
                        " WALLET | Cards: {} | Progress: {:.2} | Active: {}",
                        app.wallet.len(),
                        app.progress(),
                        active
                    )
                }
                View::Card(_) => {
                    let company = app
                        .current_card()
                        .map(|c| c.company.as_str())
                        .unwrap_or("Unknown");
                    let zoom = if app.reveal.is_zoomed() { " (zoomed)" } else { "" };
                    format!(" CARD | {} | {}{}", company, app.reveal.state(), zoom)
                }
            }
        };

        let help_hint = match app.view {
            View::Wallet => " q:quit j/k:scroll tab:cursor enter:tap 1-9:tap ",
            View::Card(_) => " q:quit space:reveal b:flip back esc:wallet ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(PlatinumNoir::FG0).bg(PlatinumNoir::BG2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(PlatinumNoir::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(PlatinumNoir::GREY1).bg(PlatinumNoir::BG2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
