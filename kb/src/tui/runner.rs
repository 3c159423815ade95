//! TUI Runner - main loop that owns the terminal
//!
//! Draws a frame, waits for the next event and hands it to the App, until the
//! App asks to quit.

use std::time::Duration;

use boardstore::{BoardStore, Storage};
use eyre::Result;
use tracing::{debug, trace};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner<S: Storage> {
    app: App<S>,
    terminal: Tui,
    event_handler: EventHandler,
}

impl<S: Storage> TuiRunner<S> {
    pub fn new(terminal: Tui, store: BoardStore<S>, tick_rate: Duration) -> Self {
        debug!(?tick_rate, "TuiRunner::new: called");
        Self {
            app: App::new(store),
            terminal,
            event_handler: EventHandler::new(tick_rate),
        }
    }

    /// Run the main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            match self.event_handler.next().await? {
                Event::Tick => trace!("TuiRunner::run: tick"),
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => self.app.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    // Layout is recomputed on the next draw
                    debug!(width, height, "TuiRunner::run: resized");
                }
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }
}
