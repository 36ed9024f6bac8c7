use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Terminal events surfaced to the main loop. Ticks arrive whenever the
/// poll times out, driving the prefix timer and toast expiry.
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    terminal_rx: mpsc::UnboundedReceiver<TerminalEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (terminal_tx, terminal_rx) = mpsc::unbounded_channel();

        // Dedicated thread for blocking crossterm reads
        std::thread::spawn(move || {
            let poll_timeout = Duration::from_millis(50);
            loop {
                let event = if event::poll(poll_timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => TerminalEvent::Key(key),
                        Ok(Event::Resize(w, h)) => TerminalEvent::Resize(w, h),
                        _ => TerminalEvent::Tick,
                    }
                } else {
                    TerminalEvent::Tick
                };

                if terminal_tx.send(event).is_err() {
                    break; // channel closed, exit thread
                }
            }
        });

        Self { terminal_rx }
    }

    pub async fn next(&mut self) -> Result<TerminalEvent> {
        self.terminal_rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("terminal event channel closed"))
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
