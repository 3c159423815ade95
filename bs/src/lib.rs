//! BoardStore - card state for a three-column task board
//!
//! Owns the flat card collection, recomputes positions when cards are dragged
//! between columns, and persists the whole collection as a single JSON
//! snapshot after every change.
//!
//! # Architecture
//!
//! ```text
//! user action ──▶ reconcile::move_card ──▶ BoardStore ──▶ Storage::write
//!                                               │
//!                                               └──▶ column_cards (renderer)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use boardstore::{BoardStore, Compaction, FileStorage, Status};
//!
//! let mut store = BoardStore::open(FileStorage::new("kanban-cards.json"), Compaction::default())?;
//! let card = store.create("Write release notes", "")?;
//! store.move_card(&card.id, Status::Progress, Some(0))?;
//! ```

pub mod card;
pub mod error;
pub mod reconcile;
pub mod remote;
pub mod seed;
pub mod storage;
mod store;

pub use card::{Card, CardId, Status};
pub use error::{BoardError, Result};
pub use reconcile::{Compaction, DragState, column_cards, drop_card, move_card, normalize};
pub use remote::{RemoteConfig, RemoteError, RemoteSync};
pub use seed::seed_cards;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::BoardStore;

/// File name of the board snapshot
pub const DEFAULT_SNAPSHOT_NAME: &str = "kanban-cards.json";
