//! Default cards for a board with no stored snapshot

use chrono::{DateTime, TimeZone, Utc};

use crate::card::{Card, Status};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The fixed seed set: two cards per column
pub fn seed_cards() -> Vec<Card> {
    vec![
        Card::new(
            "1",
            "Design landing page for support team",
            "Create a comprehensive landing page with modern design principles",
            at(2024, 1, 15, 10, 30),
            0,
        ),
        Card::new(
            "2",
            "Update navigation",
            "Implement new navigation structure based on user feedback",
            at(2024, 1, 15, 11, 0),
            1,
        ),
        Card::new(
            "3",
            "Create wireframe for next page",
            "Design wireframes for the upcoming feature page",
            at(2024, 1, 15, 9, 45),
            0,
        )
        .with_status(Status::Progress),
        Card::new(
            "4",
            "Research for solve problem in smooth way",
            "Conduct thorough research to identify optimal solutions",
            at(2024, 1, 15, 14, 20),
            1,
        )
        .with_status(Status::Progress),
        Card::new(
            "5",
            "Grow email list",
            "Implement strategies to increase newsletter subscriptions",
            at(2024, 1, 14, 16, 15),
            0,
        )
        .with_status(Status::Done),
        Card::new(
            "6",
            "Provide visitors a personalized experience",
            "Develop personalization features for better user engagement",
            at(2024, 1, 14, 13, 30),
            1,
        )
        .with_status(Status::Done),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_two_cards_per_column() {
        let cards = seed_cards();
        assert_eq!(cards.len(), 6);
        for status in Status::ALL {
            let mut positions: Vec<usize> = cards.iter().filter(|c| c.status == status).map(|c| c.position).collect();
            positions.sort();
            assert_eq!(positions, vec![0, 1], "column {}", status);
        }
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let cards = seed_cards();
        let mut ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), cards.len());
    }
}
