use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use cardfolio_core::{AppConfig, Wallet};
use cardfolio_tui::{
    app::{App, View},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    widgets::{CardStackWidget, RevealCardWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, wallet: Wallet) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    info!(cards = wallet.len(), "Starting wallet UI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Cardfolio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), wallet);
    let result = main_loop(&mut terminal, &mut app, &keymap, &config);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    config: &AppConfig,
) -> Result<()> {
    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.scroll.animation_fps);

    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = true;

    loop {
        app.update();

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            match app.view {
                View::Wallet => CardStackWidget::render(frame, layout[0], app),
                View::Card(_) => RevealCardWidget::render(frame, layout[0], app),
            }
            StatusBarWidget::render(frame, layout[1], app);
        })?;

        if let Some(AppEvent::Key(key)) = event_handler.next(needs_fast_update)? {
            let action = handle_key_event(key, app, keymap);
            handle_action(app, action);
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action) {
    // Any key other than the second 'g' cancels a pending "gg"
    if action != Action::PendingG {
        app.pending_key = None;
    }
    if action != Action::None {
        app.clear_status();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::ScrollDown => app.scroll_by(1),
        Action::ScrollUp => app.scroll_by(-1),
        Action::ScrollPageDown => app.scroll_page(1),
        Action::ScrollPageUp => app.scroll_page(-1),
        Action::JumpToTop => app.jump_to(0.0),
        Action::JumpToBottom => app.jump_to(1.0),
        Action::PendingG => app.pending_key = Some('g'),
        Action::NextCard => app.move_cursor(1),
        Action::PrevCard => app.move_cursor(-1),
        Action::Tap => app.tap_cursor(),
        Action::TapIndex(index) => app.tap(index),
        Action::Reveal => app.reveal(),
        Action::FlipBack => app.flip_back(),
        Action::Back => app.back(),
        Action::None => {}
    }
}
