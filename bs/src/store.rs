//! BoardStore - owns the card collection and its persistence
//!
//! Every successful mutation writes a full snapshot through the configured
//! [`Storage`] backend. There is no incremental diffing and no history.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::card::{Card, Status, generate_card_id};
use crate::error::{BoardError, Result};
use crate::reconcile::{self, Compaction, DragState};
use crate::remote::{RemoteError, RemoteSync};
use crate::seed::seed_cards;
use crate::storage::Storage;

/// The board state store
pub struct BoardStore<S: Storage> {
    /// Snapshot backend
    storage: S,
    /// All cards, in creation order
    cards: Vec<Card>,
    /// Re-rank policy applied on every move
    compaction: Compaction,
}

impl<S: Storage> std::fmt::Debug for BoardStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore")
            .field("storage", &self.storage.describe())
            .field("cards", &self.cards.len())
            .field("compaction", &self.compaction)
            .finish()
    }
}

impl<S: Storage> BoardStore<S> {
    /// Open a store and hydrate it from `storage`
    pub fn open(storage: S, compaction: Compaction) -> Result<Self> {
        let mut store = Self {
            storage,
            cards: Vec::new(),
            compaction,
        };
        store.load()?;
        debug!(?store, "BoardStore::open: opened");
        Ok(store)
    }

    /// Hydrate from storage
    ///
    /// An absent snapshot seeds the board (and persists the seed). A corrupt
    /// snapshot also falls back to the seed, but leaves the stored payload
    /// alone until the next mutation overwrites it.
    pub fn load(&mut self) -> Result<()> {
        match self.read_snapshot() {
            Ok(Some(cards)) => {
                info!(count = cards.len(), location = %self.storage.describe(), "Loaded board snapshot");
                self.cards = cards;
            }
            Ok(None) => {
                info!(location = %self.storage.describe(), "No board snapshot, using seed cards");
                self.cards = seed_cards();
                self.save()?;
            }
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, location = %self.storage.describe(), "Corrupt board snapshot, using seed cards");
                self.cards = seed_cards();
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Hydrate from storage, failing on a corrupt snapshot
    pub fn load_strict(&mut self) -> Result<()> {
        match self.read_snapshot()? {
            Some(cards) => self.cards = cards,
            None => {
                self.cards = seed_cards();
                self.save()?;
            }
        }
        Ok(())
    }

    fn read_snapshot(&self) -> Result<Option<Vec<Card>>> {
        Self::inspect(&self.storage)
    }

    /// Strictly parse whatever `storage` holds without opening a store
    ///
    /// Nothing is written: an absent snapshot is `Ok(None)`, not a seed.
    pub fn inspect(storage: &S) -> Result<Option<Vec<Card>>> {
        storage
            .read()?
            .map(|raw| serde_json::from_str::<Vec<Card>>(&raw).map_err(BoardError::CorruptSnapshot))
            .transpose()
    }

    /// Write the full collection
    ///
    /// Skipped for an empty collection so a transient empty state never wipes
    /// a stored board.
    pub fn save(&self) -> Result<()> {
        self.write_snapshot(&self.cards)
    }

    fn write_snapshot(&self, cards: &[Card]) -> Result<()> {
        if cards.is_empty() {
            debug!("BoardStore::save: empty collection, skipping");
            return Ok(());
        }
        let snapshot = serde_json::to_string_pretty(cards).map_err(BoardError::Serialize)?;
        self.storage.write(&snapshot)?;
        debug!(count = cards.len(), "BoardStore::save: snapshot written");
        Ok(())
    }

    /// Persist `cards`, then make them current
    ///
    /// On a failed write the in-memory collection is left as it was.
    fn commit(&mut self, cards: Vec<Card>) -> Result<()> {
        self.write_snapshot(&cards)?;
        self.cards = cards;
        Ok(())
    }

    /// Create a card at the end of the to-do column
    pub fn create(&mut self, title: &str, description: &str) -> Result<Card> {
        if title.trim().is_empty() {
            debug!("BoardStore::create: empty title rejected");
            return Err(BoardError::EmptyTitle);
        }

        let now = Utc::now();
        let id = generate_card_id(now, self.cards.iter().map(|c| c.id.as_str()));
        let position = self
            .cards
            .iter()
            .filter(|c| c.status == Status::Todo)
            .map(|c| c.position.saturating_add(1))
            .max()
            .unwrap_or(0);

        let card = Card::new(id, title, description, now, position);
        let mut cards = self.cards.clone();
        cards.push(card.clone());
        self.commit(cards)?;

        info!(id = %card.id, position, "Created card");
        Ok(card)
    }

    /// Move a card to `dest`, at `dest_index` or appended
    ///
    /// Returns `false` without touching storage if the card does not exist.
    /// Like every mutation, nothing changes in memory unless the write
    /// succeeds.
    pub fn move_card(&mut self, card_id: &str, dest: Status, dest_index: Option<usize>) -> Result<bool> {
        if self.get(card_id).is_none() {
            debug!(%card_id, "BoardStore::move_card: unknown card, ignoring");
            return Ok(false);
        }
        let cards = reconcile::move_card(&self.cards, card_id, dest, dest_index, self.compaction);
        self.commit(cards)?;
        info!(%card_id, %dest, ?dest_index, "Moved card");
        Ok(true)
    }

    /// Finish a drag onto `dest`; the drag state is always reset
    pub fn drop_card(&mut self, drag: &mut DragState, dest: Status, drop_index: Option<usize>) -> Result<bool> {
        let moved = drag.dragged.as_deref().is_some_and(|id| self.get(id).is_some());
        let dragged = drag.dragged.clone();
        let cards = reconcile::drop_card(&self.cards, drag, dest, drop_index, self.compaction);
        if moved {
            self.commit(cards)?;
            info!(card_id = ?dragged, %dest, ?drop_index, "Dropped card");
        }
        Ok(moved)
    }

    /// Re-rank every column densely and save
    pub fn repair(&mut self) -> Result<()> {
        let cards = reconcile::normalize(&self.cards);
        self.commit(cards)?;
        info!("Normalized card positions");
        Ok(())
    }

    /// Replace the board with the seed cards and save
    pub fn reset(&mut self) -> Result<()> {
        self.commit(seed_cards())?;
        info!("Reset board to seed cards");
        Ok(())
    }

    /// Hand the current snapshot to a remote sync backend
    pub fn push_remote(&self, remote: &dyn RemoteSync) -> std::result::Result<(), RemoteError> {
        debug!(count = self.cards.len(), "BoardStore::push_remote: called");
        remote.push_snapshot(&self.cards)
    }

    /// All cards in collection order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards of one column in display order
    pub fn column(&self, status: Status) -> Vec<&Card> {
        reconcile::column_cards(&self.cards, status)
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn compaction(&self) -> Compaction {
        self.compaction
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
