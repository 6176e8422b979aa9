//! Stat Bar Component
//!
//! Coins, cards count, team power, rating and the daily countdown.

use leptos::*;

use football_stars::client::Region;

use crate::state::GameScreen;

#[component]
pub fn StatBar() -> impl IntoView {
    let screen = use_context::<GameScreen>().expect("GameScreen not found");

    view! {
        <header class="stats">
            <Stat icon="💰" label="Coins" region=Region::Coins screen=screen />
            <Stat icon="🃏" label="Cards" region=Region::CardsCount screen=screen />
            <Stat icon="⚡" label="Power" region=Region::TeamPower screen=screen />
            <Stat icon="🏆" label="Rating" region=Region::Rating screen=screen />
        </header>
        <div id=Region::DailyTimer.element_id() class="daily-timer">
            {move || screen.region(Region::DailyTimer).get()}
        </div>
    }
}

#[component]
fn Stat(
    icon: &'static str,
    label: &'static str,
    region: Region,
    screen: GameScreen,
) -> impl IntoView {
    let value = screen.region(region);

    view! {
        <div class="stat" title=label>
            <span class="stat-icon">{icon}</span>
            <span id=region.element_id() class="stat-value">{move || value.get()}</span>
        </div>
    }
}
