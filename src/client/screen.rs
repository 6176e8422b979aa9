//! Screen seam
//!
//! The regions the view controller writes to. Every write replaces the
//! region's content wholesale.

/// A writable region of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Coins,
    CardsCount,
    TeamPower,
    Rating,
    DailyTimer,
    CardArea,
    MarketArea,
    Leaderboard,
}

impl Region {
    /// DOM id of the element backing this region
    pub fn element_id(&self) -> &'static str {
        match self {
            Region::Coins => "coins",
            Region::CardsCount => "cards-count",
            Region::TeamPower => "team-power",
            Region::Rating => "rating",
            Region::DailyTimer => "daily-timer",
            Region::CardArea => "card-area",
            Region::MarketArea => "market-area",
            Region::Leaderboard => "leaderboard",
        }
    }
}

/// What the view controller needs from the page
pub trait Screen {
    /// Replace a region with plain text
    fn set_text(&self, region: Region, text: String);

    /// Replace a region with an HTML fragment
    fn set_html(&self, region: Region, html: String);

    /// Show a short-lived notification
    fn toast(&self, message: &str);

    /// Current value of the owned-cards search box
    fn search_query(&self) -> String;

    /// Ask the user for a line of input. `None` when dismissed.
    fn prompt(&self, message: &str, default: &str) -> Option<String>;
}
