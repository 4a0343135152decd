use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tracing::info;

use farewheel_core::{AppConfig, JsonFlagStore};
use farewheel_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{CarouselWidget, FareViewWidget, PopupWidget, StatusBarWidget},
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    let flags = JsonFlagStore::new(config.state_path());
    let mut app = App::new(config.clone(), Box::new(flags), Instant::now())?;
    info!("Starting farewheel UI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Farewheel"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app);

    // No timer may fire once the UI is gone
    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let event_handler = EventHandler::with_animation_fps(
        app.config.ui.tick_rate_ms,
        app.config.animation.animation_fps,
    );

    loop {
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| draw(frame, app, now))?;

        // Wake up for the next timer or animation frame
        let event = event_handler.next_before(app.next_deadline(), app.needs_fast_update())?;
        let now = Instant::now();
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    app.handle_action(action, now);
                }
                AppEvent::Mouse(mouse) => {
                    let input = handle_mouse_event(mouse, app);
                    app.handle_pointer(input, now);
                }
                AppEvent::Resize(_, _) => {
                    // Hit areas are stale until the next frame
                    app.carousel.pointer_cancel();
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let size = frame.area();

    // Main layout: content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    let expanded = app.carousel.state().is_expanded();
    if expanded {
        FareViewWidget::render(frame, main_layout[0], app);
    } else {
        CarouselWidget::render(frame, main_layout[0], app, now);
    }
    StatusBarWidget::render(frame, main_layout[1], app);

    if app.show_onboarding_hint() && !expanded {
        PopupWidget::render_onboarding_hint(frame, main_layout[0], &app.theme);
    }
    if let Mode::DistancePrompt(prompt) = &app.mode {
        PopupWidget::render_distance_prompt(frame, prompt, &app.theme);
    }
}
