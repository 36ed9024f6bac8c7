use anyhow::Result;
use std::time::Instant;

use crate::tui;
use crate::tui::event::{EventHandler, TerminalEvent};

use super::App;

pub async fn run_tui(challenge: bool) -> Result<()> {
    let mut terminal = tui::init()?;

    let mut app = App::new(challenge);
    let mut events = EventHandler::new();

    let result = run_main_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;

    result
}

async fn run_main_loop(
    terminal: &mut tui::Terminal,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| tui::ui::draw(frame, app))?;

        match events.next().await? {
            TerminalEvent::Key(key) => app.handle_key(key),
            TerminalEvent::Resize(_, _) => {}
            TerminalEvent::Tick => app.tick(Instant::now()),
        }

        // listeners only queue; validation happens here
        app.drain_events();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
