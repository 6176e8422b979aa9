//! Page State
//!
//! Reactive state management using Leptos signals. [`GameScreen`] is the
//! view controller's screen: each region is a signal the view binds to.

use leptos::*;

use football_stars::client::{Region, Screen};

/// How long a toast stays visible
pub const TOAST_MS: u32 = 2200;

/// Signals behind every writable region of the page
#[derive(Clone, Copy)]
pub struct GameScreen {
    coins: RwSignal<String>,
    cards_count: RwSignal<String>,
    team_power: RwSignal<String>,
    rating: RwSignal<String>,
    daily_timer: RwSignal<String>,
    card_area: RwSignal<String>,
    market_area: RwSignal<String>,
    leaderboard: RwSignal<String>,
    /// Message currently shown in the toast
    pub toast: RwSignal<Option<String>>,
    /// Bumped on every toast so an older timeout does not hide a newer one
    toast_seq: RwSignal<u64>,
    /// Owned-cards search box
    pub search: RwSignal<String>,
}

impl GameScreen {
    pub fn new() -> Self {
        let dash = || create_rw_signal("–".to_string());
        Self {
            coins: dash(),
            cards_count: dash(),
            team_power: dash(),
            rating: dash(),
            daily_timer: create_rw_signal(String::new()),
            card_area: create_rw_signal(String::new()),
            market_area: create_rw_signal(String::new()),
            leaderboard: create_rw_signal(String::new()),
            toast: create_rw_signal(None),
            toast_seq: create_rw_signal(0),
            search: create_rw_signal(String::new()),
        }
    }

    /// Signal backing `region`
    pub fn region(&self, region: Region) -> RwSignal<String> {
        match region {
            Region::Coins => self.coins,
            Region::CardsCount => self.cards_count,
            Region::TeamPower => self.team_power,
            Region::Rating => self.rating,
            Region::DailyTimer => self.daily_timer,
            Region::CardArea => self.card_area,
            Region::MarketArea => self.market_area,
            Region::Leaderboard => self.leaderboard,
        }
    }
}

impl Screen for GameScreen {
    fn set_text(&self, region: Region, text: String) {
        self.region(region).set(text);
    }

    fn set_html(&self, region: Region, html: String) {
        self.region(region).set(html);
    }

    fn toast(&self, message: &str) {
        self.toast_seq.update(|seq| *seq += 1);
        let shown = self.toast_seq.get_untracked();
        self.toast.set(Some(message.to_string()));

        let toast = self.toast;
        let seq = self.toast_seq;
        gloo_timers::callback::Timeout::new(TOAST_MS, move || {
            if seq.get_untracked() == shown {
                toast.set(None);
            }
        })
        .forget();
    }

    fn search_query(&self) -> String {
        self.search.get_untracked()
    }

    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        web_sys::window()?
            .prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    }
}
