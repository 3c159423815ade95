//! Card move reconciliation
//!
//! Recomputes `status` and `position` for every affected card after a card is
//! dropped onto a column. All functions here are pure: they take the current
//! collection and return a new one, leaving the collection order untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::card::{Card, CardId, Status};

/// Which columns get re-ranked after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compaction {
    /// Re-rank the destination column and the column the card left
    #[default]
    SourceAndDestination,
    /// Re-rank only the destination; the source column may keep gaps
    DestinationOnly,
}

/// Transient drag-and-drop state
///
/// Lives in the UI, never persisted. Passed explicitly into [`drop_card`] so
/// the drop path stays a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    /// Card currently being dragged
    pub dragged: Option<CardId>,
    /// Index within the hovered column the pointer last entered
    pub hover: Option<usize>,
}

impl DragState {
    /// Begin dragging a card
    pub fn start(&mut self, card_id: impl Into<CardId>) {
        self.dragged = Some(card_id.into());
        self.hover = None;
    }

    /// Pointer entered the card at `index` of some column
    pub fn enter(&mut self, index: usize) {
        self.hover = Some(index);
    }

    /// Whether a drag is in progress
    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    /// Forget the drag entirely
    pub fn reset(&mut self) {
        self.dragged = None;
        self.hover = None;
    }
}

/// Cards of one column in display order
pub fn column_cards(cards: &[Card], status: Status) -> Vec<&Card> {
    let mut column: Vec<&Card> = cards.iter().filter(|c| c.status == status).collect();
    column.sort_by_key(|c| c.position);
    column
}

/// Move `card_id` into `dest`, optionally at `dest_index`
///
/// With no index the card is appended. An unknown id returns the collection
/// unchanged. Out-of-range indices are absorbed by the final re-rank, which
/// places the card at the end of the column.
pub fn move_card(
    cards: &[Card],
    card_id: &str,
    dest: Status,
    dest_index: Option<usize>,
    compaction: Compaction,
) -> Vec<Card> {
    debug!(%card_id, %dest, ?dest_index, ?compaction, "move_card: called");
    let Some(source) = cards.iter().find(|c| c.id == card_id).map(|c| c.status) else {
        debug!(%card_id, "move_card: card not found, no-op");
        return cards.to_vec();
    };

    // Appending goes one past the highest other position, which is the column
    // length for dense columns and still the end when the card stays put.
    let final_position = dest_index.unwrap_or_else(|| {
        cards
            .iter()
            .filter(|c| c.status == dest && c.id != card_id)
            .map(|c| c.position.saturating_add(1))
            .max()
            .unwrap_or(0)
    });

    let mut updated: Vec<Card> = cards
        .iter()
        .map(|card| {
            let mut card = card.clone();
            if card.id == card_id {
                card.status = dest;
                card.position = final_position;
            } else if card.status == dest && card.position >= final_position {
                card.position = card.position.saturating_add(1);
            }
            card
        })
        .collect();

    rerank(&mut updated, dest);
    if compaction == Compaction::SourceAndDestination && source != dest {
        rerank(&mut updated, source);
    }

    debug!(%card_id, %source, %dest, final_position, "move_card: reconciled");
    updated
}

/// Finish a drag by dropping the dragged card onto `dest`
///
/// A drop with no active drag is a no-op. The drag state is reset in every
/// case.
pub fn drop_card(
    cards: &[Card],
    drag: &mut DragState,
    dest: Status,
    drop_index: Option<usize>,
    compaction: Compaction,
) -> Vec<Card> {
    let dragged = drag.dragged.take();
    drag.reset();

    match dragged {
        Some(card_id) => move_card(cards, &card_id, dest, drop_index, compaction),
        None => {
            debug!(%dest, "drop_card: no active drag");
            cards.to_vec()
        }
    }
}

/// Re-rank every column to dense positions
pub fn normalize(cards: &[Card]) -> Vec<Card> {
    let mut updated = cards.to_vec();
    for status in Status::ALL {
        rerank(&mut updated, status);
    }
    updated
}

/// Assign positions 0..N-1 to the members of `status`, ordered by their
/// current position with ties kept in collection order.
fn rerank(cards: &mut [Card], status: Status) {
    let mut members: Vec<usize> = (0..cards.len()).filter(|&i| cards[i].status == status).collect();
    members.sort_by_key(|&i| cards[i].position);
    for (rank, idx) in members.into_iter().enumerate() {
        cards[idx].position = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_cards;

    fn order(cards: &[Card], status: Status) -> Vec<String> {
        column_cards(cards, status).into_iter().map(|c| c.id.clone()).collect()
    }

    fn positions(cards: &[Card], status: Status) -> Vec<usize> {
        column_cards(cards, status).into_iter().map(|c| c.position).collect()
    }

    fn find<'a>(cards: &'a [Card], id: &str) -> &'a Card {
        cards.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_seed_move_into_middle_of_done() {
        let cards = move_card(&seed_cards(), "3", Status::Done, Some(1), Compaction::default());

        assert_eq!(order(&cards, Status::Done), vec!["5", "3", "6"]);
        assert_eq!(find(&cards, "3").position, 1);
        assert_eq!(find(&cards, "6").position, 2);
        assert_eq!(order(&cards, Status::Progress), vec!["4"]);
        assert_eq!(find(&cards, "4").position, 0);
    }

    #[test]
    fn test_destination_only_leaves_source_gap() {
        let cards = move_card(&seed_cards(), "3", Status::Done, Some(1), Compaction::DestinationOnly);

        assert_eq!(positions(&cards, Status::Done), vec![0, 1, 2]);
        // "4" keeps its stale rank
        assert_eq!(find(&cards, "4").position, 1);
    }

    #[test]
    fn test_append_when_index_omitted() {
        let cards = move_card(&seed_cards(), "1", Status::Done, None, Compaction::default());
        assert_eq!(order(&cards, Status::Done), vec!["5", "6", "1"]);
        assert_eq!(order(&cards, Status::Todo), vec!["2"]);
        assert_eq!(positions(&cards, Status::Todo), vec![0]);
    }

    #[test]
    fn test_append_within_same_column_goes_last() {
        let cards = move_card(&seed_cards(), "1", Status::Todo, None, Compaction::default());
        assert_eq!(order(&cards, Status::Todo), vec!["2", "1"]);
        assert_eq!(positions(&cards, Status::Todo), vec![0, 1]);
    }

    #[test]
    fn test_unknown_card_is_noop() {
        let seed = seed_cards();
        let cards = move_card(&seed, "missing", Status::Done, Some(0), Compaction::default());
        assert_eq!(cards, seed);
    }

    #[test]
    fn test_same_column_same_index_keeps_order() {
        let seed = seed_cards();
        for (id, index) in [("1", 0), ("2", 1)] {
            let cards = move_card(&seed, id, Status::Todo, Some(index), Compaction::default());
            assert_eq!(order(&cards, Status::Todo), vec!["1", "2"]);
            assert_eq!(positions(&cards, Status::Todo), vec![0, 1]);
        }
    }

    #[test]
    fn test_drop_onto_later_card_lands_before_it() {
        let seed = seed_cards();
        let cards = move_card(&seed, "5", Status::Progress, Some(0), Compaction::default());
        let cards = move_card(&cards, "5", Status::Progress, Some(2), Compaction::default());
        // column was [5, 3, 4]; dropping 5 on index 2 puts it ahead of the card there
        assert_eq!(order(&cards, Status::Progress), vec!["3", "5", "4"]);
    }

    #[test]
    fn test_index_beyond_column_is_absorbed() {
        let cards = move_card(&seed_cards(), "1", Status::Progress, Some(99), Compaction::default());
        assert_eq!(order(&cards, Status::Progress), vec!["3", "4", "1"]);
        assert_eq!(positions(&cards, Status::Progress), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_into_empty_column() {
        let mut seed = seed_cards();
        seed.retain(|c| c.status != Status::Done);
        let cards = move_card(&seed, "2", Status::Done, Some(5), Compaction::default());
        assert_eq!(order(&cards, Status::Done), vec!["2"]);
        assert_eq!(find(&cards, "2").position, 0);
    }

    #[test]
    fn test_collection_order_preserved() {
        let seed = seed_cards();
        let cards = move_card(&seed, "6", Status::Todo, Some(0), Compaction::default());
        let before: Vec<&str> = seed.iter().map(|c| c.id.as_str()).collect();
        let after: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let seed = seed_cards();
        let mut drag = DragState {
            dragged: None,
            hover: Some(1),
        };
        let cards = drop_card(&seed, &mut drag, Status::Done, Some(0), Compaction::default());
        assert_eq!(cards, seed);
        assert_eq!(drag, DragState::default());
    }

    #[test]
    fn test_drop_moves_and_resets_drag() {
        let mut drag = DragState::default();
        drag.start("2");
        drag.enter(0);
        assert!(drag.is_active());

        let cards = drop_card(&seed_cards(), &mut drag, Status::Progress, Some(0), Compaction::default());
        assert_eq!(order(&cards, Status::Progress), vec!["2", "3", "4"]);
        assert!(!drag.is_active());
        assert_eq!(drag.hover, None);
    }

    #[test]
    fn test_drop_of_vanished_card_still_resets() {
        let mut drag = DragState::default();
        drag.start("gone");
        let seed = seed_cards();
        let cards = drop_card(&seed, &mut drag, Status::Todo, None, Compaction::default());
        assert_eq!(cards, seed);
        assert!(!drag.is_active());
    }

    #[test]
    fn test_normalize_repairs_gaps_and_duplicates() {
        let mut cards = seed_cards();
        for card in cards.iter_mut() {
            card.position *= 10;
        }
        cards[1].position = 0; // "2" now collides with "1"
        let cards = normalize(&cards);
        for status in Status::ALL {
            assert_eq!(positions(&cards, status), vec![0, 1]);
        }
        assert_eq!(order(&cards, Status::Todo), vec!["1", "2"]);
    }

    #[test]
    fn test_lax_source_is_densified_by_later_move_in() {
        let cards = move_card(&seed_cards(), "3", Status::Done, None, Compaction::DestinationOnly);
        assert_eq!(find(&cards, "4").position, 1);
        let cards = move_card(&cards, "1", Status::Progress, None, Compaction::DestinationOnly);
        assert_eq!(order(&cards, Status::Progress), vec!["4", "1"]);
        assert_eq!(positions(&cards, Status::Progress), vec![0, 1]);
    }

    #[test]
    fn test_extreme_positions_are_absorbed() {
        let mut cards = seed_cards();
        cards[0].position = usize::MAX; // "1"

        let appended = move_card(&cards, "2", Status::Todo, None, Compaction::default());
        assert_eq!(order(&appended, Status::Todo), vec!["1", "2"]);
        assert_eq!(positions(&appended, Status::Todo), vec![0, 1]);

        let inserted = move_card(&cards, "3", Status::Todo, Some(0), Compaction::default());
        assert_eq!(order(&inserted, Status::Todo), vec!["3", "2", "1"]);
        assert_eq!(positions(&inserted, Status::Todo), vec![0, 1, 2]);
    }
}
