//! TUI application - event handling and state management
//!
//! The App owns the BoardStore and the AppState and handles keyboard and
//! mouse events. It does not do any rendering - that's delegated to the
//! views module.

use boardstore::{BoardError, BoardStore, Status, Storage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info, trace, warn};

use super::state::{AppState, DropTarget, FormField, InteractionMode};

/// TUI application
pub struct App<S: Storage> {
    /// Persistent board
    store: BoardStore<S>,
    /// Application state
    state: AppState,
}

impl<S: Storage> App<S> {
    /// Create a new application around an opened store
    pub fn new(store: BoardStore<S>) -> Self {
        debug!(?store, "App::new: called");
        let state = AppState::new(store.cards().to_vec(), store.storage().describe());
        Self { store, state }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Get reference to the store
    pub fn store(&self) -> &BoardStore<S> {
        &self.store
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Clear any transient error message on key press
        self.state.clear_error();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        match self.state.interaction_mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Search => self.handle_search_key(key),
            InteractionMode::Dialog => self.handle_dialog_key(key),
            InteractionMode::Help => self.handle_help_key(key),
        }
        self.state.should_quit
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.state.drag.is_active() {
            self.handle_carry_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                debug!("App::handle_normal_key: quit requested");
                self.state.should_quit = true;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            KeyCode::Char('/') => {
                self.state.interaction_mode = InteractionMode::Search;
            }
            KeyCode::Char('n') | KeyCode::Char('+') => {
                debug!("App::handle_normal_key: opening create dialog");
                self.state.interaction_mode = InteractionMode::Dialog;
            }

            // === Navigation ===
            KeyCode::Char('h') | KeyCode::Left => self.state.focus_prev_column(),
            KeyCode::Char('l') | KeyCode::Right => self.state.focus_next_column(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Tab => {
                let next = self.state.focus.next().unwrap_or(Status::Todo);
                self.state.focus = next;
            }

            // === Pick up ===
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(card) = self.state.selected_card() {
                    let id = card.id.clone();
                    let target = DropTarget::Card {
                        status: self.state.focus,
                        index: self.state.selected_index(),
                    };
                    self.state.begin_drag(&id, target);
                }
            }
            _ => {}
        }
    }

    /// Keys while a card is being carried with the keyboard
    fn handle_carry_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_carry_key: called");
        match key.code {
            KeyCode::Esc => self.state.cancel_drag(),
            KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Down => self.state.hover_next(),
            KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Up => self.state.hover_prev(),
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Left => {
                if let Some(prev) = self.state.drop_column.and_then(Status::prev) {
                    self.state.hover_column(prev);
                }
            }
            KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Right => {
                if let Some(next) = self.state.drop_column.and_then(Status::next) {
                    self.state.hover_column(next);
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(target) = self.state.drop_target() {
                    self.drop_on(target);
                } else {
                    self.state.cancel_drag();
                }
            }
            _ => {}
        }
    }

    /// Handle key in search mode (the box is display-only)
    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Backspace => {
                self.state.search_text.pop();
            }
            KeyCode::Char(c) => {
                self.state.search_text.push(c);
            }
            _ => {}
        }
    }

    /// Handle key in the creation dialog
    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                debug!("App::handle_dialog_key: closing dialog, keeping draft");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => self.submit_form(),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => self.state.form.toggle_focus(),
            (KeyCode::Enter, _) => {
                if self.state.form.focus == FormField::Title {
                    self.submit_form();
                } else {
                    self.state.form.description.push('\n');
                }
            }
            (KeyCode::Backspace, _) => {
                self.state.form.active_field().pop();
            }
            (KeyCode::Char(c), _) => {
                self.state.form.active_field().push(c);
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
        ) {
            self.state.interaction_mode = InteractionMode::Normal;
        }
    }

    /// Create a card from the dialog inputs
    ///
    /// An empty title leaves the dialog open with its inputs, without an
    /// error message.
    fn submit_form(&mut self) {
        let title = self.state.form.title.clone();
        let description = self.state.form.description.clone();
        match self.store.create(&title, &description) {
            Ok(card) => {
                info!(id = %card.id, "App::submit_form: card created");
                self.state.form.clear();
                self.state.interaction_mode = InteractionMode::Normal;
                self.refresh();
                self.state.select_card(&card.id);
            }
            Err(BoardError::EmptyTitle) => {
                debug!("App::submit_form: empty title, dialog stays open");
            }
            Err(e) => {
                warn!(error = %e, "App::submit_form: failed to save");
                self.refresh();
                self.state.set_error(format!("Save failed: {}", e));
            }
        }
    }

    /// Handle a mouse event: press on a card starts a drag, moving over the
    /// board updates the hover target, release drops.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        trace!(?mouse, "App::handle_mouse: called");
        if self.state.interaction_mode != InteractionMode::Normal {
            return;
        }
        let hit = self.state.layout.hit_test(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(target @ DropTarget::Card { status, index }) = hit
                    && let Some(card) = self.state.column(status).get(index).copied()
                {
                    let id = card.id.clone();
                    self.state.focus = status;
                    self.state.selected[status.index()] = index;
                    self.state.begin_drag(&id, target);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.state.drag.is_active()
                    && let Some(target) = hit
                {
                    self.state.hover(target);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.state.drag.is_active() {
                    return;
                }
                match hit {
                    Some(target) => self.drop_on(target),
                    None => {
                        debug!("App::handle_mouse: released outside the board, cancelling drag");
                        self.state.cancel_drag();
                    }
                }
            }
            _ => {}
        }
    }

    /// Drop the dragged card onto `target`; drag state is reset either way
    fn drop_on(&mut self, target: DropTarget) {
        let dragged = self.state.dragged_id().map(str::to_string);
        debug!(?dragged, ?target, "App::drop_on: called");

        let result = self
            .store
            .drop_card(&mut self.state.drag, target.status(), target.index());
        self.state.drop_column = None;

        match result {
            Ok(true) => {
                self.refresh();
                if let Some(id) = dragged {
                    self.state.select_card(&id);
                }
            }
            Ok(false) => {
                debug!("App::drop_on: nothing moved");
            }
            Err(e) => {
                warn!(error = %e, "App::drop_on: failed to save");
                self.refresh();
                self.state.set_error(format!("Save failed: {}", e));
            }
        }
    }

    /// Re-read cards from the store
    fn refresh(&mut self) {
        self.state.set_cards(self.store.cards().to_vec());
    }
}
