//! HTML fragments for the card, market and leaderboard regions
//!
//! Card controls are `data-action` buttons; the page dispatches clicks on
//! them back to the view controller.

use crate::model::{CardFace, LeaderboardEntry, MarketListing, PlayerCard};

/// Where card images are served from
pub const PLAYER_IMAGE_DIR: &str = "/web/images/players/";

/// Inline placeholder used when a card image fails to load
pub const FALLBACK_PLAYER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns=%27http://www.w3.org/2000/svg%27 width=%2796%27 height=%2796%27 viewBox=%270 0 96 96%27%3E%3Crect width=%2796%27 height=%2796%27 rx=%2716%27 fill=%27%231e293b%27/%3E%3Ctext x=%2750%25%27 y=%2756%25%27 dominant-baseline=%27middle%27 text-anchor=%27middle%27 font-size=%2736%27%3E%E2%9A%BD%3C/text%3E%3C/svg%3E";

pub const EMPTY_PLAYERS: &str = "No players yet. Open a pack 🎴";
pub const EMPTY_MARKET: &str = "The market is empty";
pub const EMPTY_LEADERBOARD: &str = "The leaderboard is empty";

/// `data-action` values used by card buttons
pub const ACTION_SELL: &str = "sell";
pub const ACTION_BUY: &str = "buy";

enum Controls {
    Sell { player_id: i64 },
    Buy { market_id: i64, price: i64 },
}

/// Escape text for use inside HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn placeholder(text: &str) -> String {
    format!(r#"<div class="empty">{}</div>"#, escape_html(text))
}

fn image_src(image: &str) -> String {
    if image.is_empty() {
        FALLBACK_PLAYER_IMAGE.to_string()
    } else {
        format!("{}{}", PLAYER_IMAGE_DIR, urlencoding::encode(image))
    }
}

fn render_card(face: &CardFace, controls: Controls) -> String {
    let name = escape_html(&face.name);

    let controls = match controls {
        Controls::Sell { player_id } => format!(
            r#"<button class="small" data-action="{}" data-id="{}">Sell</button>"#,
            ACTION_SELL, player_id
        ),
        Controls::Buy { market_id, price } => format!(
            r#"<p>💰 {}</p><button class="small primary" data-action="{}" data-id="{}">Buy</button>"#,
            price, ACTION_BUY, market_id
        ),
    };

    format!(
        r#"<div class="player-card {rarity}">
    <h3>{name}</h3>
    <img src="{src}" class="player-image" alt="{name}" onerror="this.onerror=null;this.src='{fallback}';">
    <p class="meta">{position}</p>
    <p>ATT:{attack} DEF:{defense} SPD:{speed}</p>
    <p class="meta">Power: {power}</p>
    {controls}
</div>"#,
        rarity = face.rarity,
        name = name,
        src = escape_html(&image_src(&face.image)),
        fallback = FALLBACK_PLAYER_IMAGE,
        position = escape_html(&face.position),
        attack = face.attack,
        defense = face.defense,
        speed = face.speed,
        power = face.power(),
        controls = controls,
    )
}

/// Owned cards, each with a sell button
pub fn render_my_players(cards: &[PlayerCard]) -> String {
    if cards.is_empty() {
        return placeholder(EMPTY_PLAYERS);
    }

    cards
        .iter()
        .map(|card| render_card(&card.face, Controls::Sell { player_id: card.id }))
        .collect()
}

/// Market listings, each with its price and a buy button
pub fn render_market(listings: &[MarketListing]) -> String {
    if listings.is_empty() {
        return placeholder(EMPTY_MARKET);
    }

    listings
        .iter()
        .map(|listing| {
            render_card(
                &listing.face,
                Controls::Buy {
                    market_id: listing.id,
                    price: listing.price,
                },
            )
        })
        .collect()
}

/// Ranked rows; the current user's row gets the `me` class
pub fn render_leaderboard(leaders: &[LeaderboardEntry], current_user: i64) -> String {
    if leaders.is_empty() {
        return placeholder(EMPTY_LEADERBOARD);
    }

    leaders
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let class = if entry.user_id == current_user {
                "leader-row me"
            } else {
                "leader-row"
            };
            format!(
                r#"<div class="{}">
    <span>#{}</span>
    <span>ID {}</span>
    <span>🏆 {}</span>
    <span>W/L {}/{}</span>
    <span>💰 {}</span>
</div>"#,
                class,
                i + 1,
                entry.user_id,
                entry.rating,
                entry.wins,
                entry.losses,
                entry.coins
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rarity;

    fn face(name: &str, rarity: Rarity) -> CardFace {
        CardFace {
            name: name.to_string(),
            position: "MF".to_string(),
            rarity,
            attack: 70,
            defense: 60,
            speed: 80,
            image: "mid fielder.png".to_string(),
        }
    }

    fn leader(user_id: i64, rating: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id,
            rating,
            wins: 3,
            losses: 1,
            coins: 900,
        }
    }

    #[test]
    fn test_empty_lists_render_placeholders() {
        assert_eq!(
            render_my_players(&[]),
            format!(r#"<div class="empty">{}</div>"#, EMPTY_PLAYERS)
        );
        assert!(render_market(&[]).contains(EMPTY_MARKET));
        assert!(render_leaderboard(&[], 1).contains(EMPTY_LEADERBOARD));
    }

    #[test]
    fn test_owned_card_has_sell_control() {
        let html = render_my_players(&[PlayerCard {
            id: 12,
            face: face("Andrea", Rarity::Epic),
        }]);

        assert!(html.contains(r#"class="player-card epic""#));
        assert!(html.contains(r#"data-action="sell" data-id="12""#));
        assert!(html.contains("ATT:70 DEF:60 SPD:80"));
        assert!(html.contains("Power: 210"));
        assert!(html.contains("/web/images/players/mid%20fielder.png"));
        assert!(!html.contains("data-action=\"buy\""));
    }

    #[test]
    fn test_listing_has_price_and_buy_control() {
        let html = render_market(&[MarketListing {
            id: 5,
            player_id: 12,
            seller_id: 2,
            price: 450,
            face: face("Andrea", Rarity::Legendary),
        }]);

        assert!(html.contains("💰 450"));
        assert!(html.contains(r#"data-action="buy" data-id="5""#));
        assert!(html.contains("player-card legendary"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_my_players(&[PlayerCard {
            id: 1,
            face: face("<script>x</script>", Rarity::Common),
        }]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_missing_image_uses_fallback() {
        let mut f = face("Nobody", Rarity::Common);
        f.image.clear();
        let html = render_my_players(&[PlayerCard { id: 1, face: f }]);
        assert!(html.contains(r#"src="data:image/svg+xml"#));
    }

    #[test]
    fn test_leaderboard_highlights_current_user() {
        let html = render_leaderboard(&[leader(10, 300), leader(42, 250), leader(7, 100)], 42);

        assert_eq!(html.matches(r#"class="leader-row me""#).count(), 1);
        assert_eq!(html.matches("leader-row").count(), 3);
        assert!(html.contains("<span>#2</span>\n    <span>ID 42</span>"));
        assert!(html.contains("W/L 3/1"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Ronaldo"), "Ronaldo");
    }
}
