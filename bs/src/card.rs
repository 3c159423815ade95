//! Card domain type
//!
//! A card is one task on the board. Its column membership is its `status`,
//! its display order within that column is its `position`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for a card
pub type CardId = String;

/// Column membership of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    Progress,
    /// Finished
    Done,
}

impl Status {
    /// All columns in board order
    pub const ALL: [Status; 3] = [Status::Todo, Status::Progress, Status::Done];

    /// Column heading shown on the board
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To-do",
            Self::Progress => "In-progress",
            Self::Done => "Done",
        }
    }

    /// Serialized name (`todo`, `progress`, `done`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Progress => "progress",
            Self::Done => "done",
        }
    }

    /// Column index in board order
    pub fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::Progress => 1,
            Self::Done => 2,
        }
    }

    /// Column to the left, if any
    pub fn prev(self) -> Option<Self> {
        match self {
            Self::Todo => None,
            Self::Progress => Some(Self::Todo),
            Self::Done => Some(Self::Progress),
        }
    }

    /// Column to the right, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Todo => Some(Self::Progress),
            Self::Progress => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" => Ok(Self::Todo),
            "progress" | "in-progress" | "doing" => Ok(Self::Progress),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown status '{}' (expected todo, progress or done)", other)),
        }
    }
}

/// A single task card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier (creation time in epoch milliseconds)
    pub id: CardId,

    /// Display title, non-empty at creation
    pub title: String,

    /// Free text, may be empty
    pub description: String,

    /// Column the card lives in
    pub status: Status,

    /// Creation timestamp, display-only
    pub created_at: DateTime<Utc>,

    /// Zero-based rank within its column
    pub position: usize,
}

impl Card {
    /// Create a card in the to-do column
    pub fn new(
        id: impl Into<CardId>,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
        position: usize,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: Status::Todo,
            created_at,
            position,
        }
    }

    /// Builder-style status override
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// Generate a timestamp-based card id that does not collide with `existing`
///
/// Ids are epoch milliseconds; on a collision the value is bumped by one
/// millisecond until it is unused.
pub fn generate_card_id<'a>(now: DateTime<Utc>, existing: impl IntoIterator<Item = &'a str> + Clone) -> CardId {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !existing.clone().into_iter().any(|id| id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
