//! Client-side guards: owned-card search and the sell price check

use crate::model::{PlayerCard, MIN_SELL_PRICE};

/// Keep cards whose name or position contains `query`, ignoring case.
///
/// The query is trimmed first; an empty query keeps everything.
pub fn filter_cards(cards: Vec<PlayerCard>, query: &str) -> Vec<PlayerCard> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return cards;
    }

    cards
        .into_iter()
        .filter(|card| {
            card.face.name.to_lowercase().contains(&needle)
                || card.face.position.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Parse a price typed by the user. `None` unless it is a finite number
/// of at least [`MIN_SELL_PRICE`].
pub fn parse_sell_price(input: &str) -> Option<f64> {
    let price: f64 = input.trim().parse().ok()?;
    (price.is_finite() && price >= MIN_SELL_PRICE).then_some(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardFace, Rarity};

    fn card(id: i64, name: &str, position: &str) -> PlayerCard {
        PlayerCard {
            id,
            face: CardFace {
                name: name.to_string(),
                position: position.to_string(),
                rarity: Rarity::Common,
                attack: 50,
                defense: 50,
                speed: 50,
                image: String::new(),
            },
        }
    }

    fn squad() -> Vec<PlayerCard> {
        vec![
            card(1, "Marco Silva", "FW"),
            card(2, "Jan Kowalski", "GK"),
            card(3, "Luis Fwamba", "DF"),
        ]
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        assert_eq!(filter_cards(squad(), "").len(), 3);
        assert_eq!(filter_cards(squad(), "   ").len(), 3);
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let found = filter_cards(squad(), "KOWAL");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn test_matches_position_and_name() {
        // "fw" hits Marco's position and Luis's surname
        let ids: Vec<i64> = filter_cards(squad(), " fw ").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_cards(squad(), "zzz").is_empty());
    }

    #[test]
    fn test_price_boundary() {
        assert_eq!(parse_sell_price("99"), None);
        assert_eq!(parse_sell_price("99.99"), None);
        assert_eq!(parse_sell_price("100"), Some(100.0));
        assert_eq!(parse_sell_price(" 300 "), Some(300.0));
    }

    #[test]
    fn test_price_rejects_garbage() {
        assert_eq!(parse_sell_price("abc"), None);
        assert_eq!(parse_sell_price(""), None);
        assert_eq!(parse_sell_price("inf"), None);
        assert_eq!(parse_sell_price("NaN"), None);
        assert_eq!(parse_sell_price("-500"), None);
    }
}
