//! TUI event handling
//!
//! Terminal events are polled on a blocking thread and forwarded over a tokio
//! channel so the runner can await them.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Mouse button or drag
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick (nothing happened within the poll interval)
    Tick,
}

/// Translate a crossterm event, dropping the ones the board never reacts to
fn translate(evt: event::Event) -> Option<Event> {
    match evt {
        // Windows reports releases too
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        // Bare pointer motion would flood the channel
        event::Event::Mouse(mouse) if mouse.kind != MouseEventKind::Moved => Some(Event::Mouse(mouse)),
        event::Event::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            debug!("EventHandler::new: event polling thread started");
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read().ok().and_then(translate) {
                        Some(event) => event,
                        None => continue,
                    }
                } else {
                    Event::Tick
                };

                trace!(?event, "EventHandler: forwarding event");
                if tx.send(event).is_err() {
                    debug!("EventHandler: channel closed, exiting loop");
                    break;
                }
            }
            debug!("EventHandler: event polling thread exiting");
        });

        Self { rx }
    }

    /// Get the next event (async)
    pub async fn next(&mut self) -> Result<Event> {
        self.rx.recv().await.ok_or_else(|| eyre::eyre!("Event channel closed"))
    }
}
