//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here, and no
//! persistence: the store lives in [`App`](super::App), this is just what the
//! views need to draw a frame plus the transient drag state.

use boardstore::{Card, DragState, Status, column_cards};
use ratatui::layout::{Position, Rect};
use tracing::debug;

/// Sidebar navigation entries (label, active). Static, not wired to anything.
pub const NAV_ITEMS: &[(&str, bool)] = &[("Boards", true), ("Pages", false), ("Settings", false)];

/// What keystrokes currently go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Board navigation and drag-and-drop
    #[default]
    Normal,
    /// Typing into the header search box
    Search,
    /// Creation dialog is open
    Dialog,
    /// Help overlay
    Help,
}

/// Field focused in the creation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
}

/// Inputs of the creation dialog
///
/// Survives closing the dialog; only a successful create clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
    pub focus: FormField,
}

impl CreateForm {
    /// The field currently receiving input
    pub fn active_field(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Where a pointer position landed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// On the card at `index` of `status`
    Card { status: Status, index: usize },
    /// On empty space of a column
    Column(Status),
}

impl DropTarget {
    pub fn status(self) -> Status {
        match self {
            Self::Card { status, .. } | Self::Column(status) => status,
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Self::Card { index, .. } => Some(index),
            Self::Column(_) => None,
        }
    }
}

/// Screen areas recorded by the last render, used for mouse hit-testing
#[derive(Debug, Clone, Default)]
pub struct BoardLayout {
    pub columns: Vec<(Status, Rect)>,
    pub cards: Vec<(Status, usize, Rect)>,
}

impl BoardLayout {
    /// Find what is under the pointer
    pub fn hit_test(&self, column: u16, row: u16) -> Option<DropTarget> {
        let pos = Position::new(column, row);
        if let Some((status, index, _)) = self.cards.iter().find(|(_, _, rect)| rect.contains(pos)) {
            return Some(DropTarget::Card {
                status: *status,
                index: *index,
            });
        }
        self.columns
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(status, _)| DropTarget::Column(*status))
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Cards as last read from the store
    pub cards: Vec<Card>,

    /// Column with keyboard focus
    pub focus: Status,

    /// Selected row per column, indexed by `Status::index`
    pub selected: [usize; 3],

    /// Transient drag state (card being dragged, hovered index)
    pub drag: DragState,

    /// Column the dragged card would drop into
    pub drop_column: Option<Status>,

    /// Current input mode
    pub interaction_mode: InteractionMode,

    /// Creation dialog inputs
    pub form: CreateForm,

    /// Header search box text (display only, no filtering)
    pub search_text: String,

    /// Transient error shown in the footer
    pub error_message: Option<String>,

    /// Set when the app should exit
    pub should_quit: bool,

    /// Hit-test areas from the last frame
    pub layout: BoardLayout,

    /// Where the board lives, for the header
    pub location: String,
}

impl AppState {
    pub fn new(cards: Vec<Card>, location: impl Into<String>) -> Self {
        debug!(count = cards.len(), "AppState::new: called");
        Self {
            cards,
            location: location.into(),
            ..Self::default()
        }
    }

    /// Replace the card snapshot and keep selections in range
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        for status in Status::ALL {
            let len = self.column_len(status);
            let sel = &mut self.selected[status.index()];
            *sel = (*sel).min(len.saturating_sub(1));
        }
    }

    /// Cards of one column in display order
    pub fn column(&self, status: Status) -> Vec<&Card> {
        column_cards(&self.cards, status)
    }

    pub fn column_len(&self, status: Status) -> usize {
        self.cards.iter().filter(|c| c.status == status).count()
    }

    /// Selected row in the focused column
    pub fn selected_index(&self) -> usize {
        self.selected[self.focus.index()]
    }

    /// Card under the keyboard cursor
    pub fn selected_card(&self) -> Option<&Card> {
        self.column(self.focus).get(self.selected_index()).copied()
    }

    /// Select a card by id, focusing its column
    pub fn select_card(&mut self, card_id: &str) {
        let found = Status::ALL.iter().find_map(|&status| {
            self.column(status)
                .iter()
                .position(|c| c.id == card_id)
                .map(|idx| (status, idx))
        });
        if let Some((status, idx)) = found {
            self.focus = status;
            self.selected[status.index()] = idx;
        }
    }

    pub fn select_next(&mut self) {
        let len = self.column_len(self.focus);
        let sel = &mut self.selected[self.focus.index()];
        if *sel + 1 < len {
            *sel += 1;
        }
    }

    pub fn select_prev(&mut self) {
        let sel = &mut self.selected[self.focus.index()];
        *sel = sel.saturating_sub(1);
    }

    pub fn focus_next_column(&mut self) {
        if let Some(next) = self.focus.next() {
            self.focus = next;
        }
    }

    pub fn focus_prev_column(&mut self) {
        if let Some(prev) = self.focus.prev() {
            self.focus = prev;
        }
    }

    /// Id of the card being dragged
    pub fn dragged_id(&self) -> Option<&str> {
        self.drag.dragged.as_deref()
    }

    /// Begin dragging `card_id`, hovering `target`
    pub fn begin_drag(&mut self, card_id: &str, target: DropTarget) {
        debug!(%card_id, ?target, "AppState::begin_drag: called");
        self.drag.start(card_id);
        self.hover(target);
    }

    /// Pointer (or keyboard cursor) entered `target` while dragging
    pub fn hover(&mut self, target: DropTarget) {
        self.drop_column = Some(target.status());
        match target.index() {
            Some(index) => self.drag.enter(index),
            None => self.drag.hover = None,
        }
    }

    /// Current drop target of an active drag
    pub fn drop_target(&self) -> Option<DropTarget> {
        let status = self.drop_column?;
        self.drag.dragged.as_ref()?;
        Some(match self.drag.hover {
            Some(index) => DropTarget::Card { status, index },
            None => DropTarget::Column(status),
        })
    }

    /// Abandon the drag without moving anything
    pub fn cancel_drag(&mut self) {
        debug!("AppState::cancel_drag: called");
        self.drag.reset();
        self.drop_column = None;
    }

    /// Move the keyboard drop cursor down one slot (past the last card is the
    /// append slot)
    pub fn hover_next(&mut self) {
        let Some(status) = self.drop_column else { return };
        let len = self.column_len(status);
        self.drag.hover = match self.drag.hover {
            Some(i) if i + 1 < len => Some(i + 1),
            _ => None,
        };
    }

    /// Move the keyboard drop cursor up one slot
    pub fn hover_prev(&mut self) {
        let Some(status) = self.drop_column else { return };
        let len = self.column_len(status);
        self.drag.hover = match self.drag.hover {
            Some(i) => Some(i.saturating_sub(1)),
            None if len > 0 => Some(len - 1),
            None => None,
        };
    }

    /// Move the keyboard drop cursor to a neighbouring column
    pub fn hover_column(&mut self, status: Status) {
        let len = self.column_len(status);
        self.drop_column = Some(status);
        if let Some(i) = self.drag.hover
            && i >= len
        {
            self.drag.hover = None;
        }
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }
}
