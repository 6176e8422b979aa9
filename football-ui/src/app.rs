//! App Root Component
//!
//! Builds the view controller, provides it to the tree, starts the first
//! load and the one-second countdown tick.

use leptos::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;

use football_stars::client::render::{ACTION_BUY, ACTION_SELL};
use football_stars::client::{Region, ViewController};

use crate::components::actions::dispatch;
use crate::components::{ActionBar, CoinShop, StatBar, Toast};
use crate::state::GameScreen;
use crate::telegram::TelegramHost;
use crate::transport::{get_api_base, GlooTransport};

/// The page's view controller
pub type Controller = ViewController<GlooTransport, TelegramHost, GameScreen>;

/// A click on a card button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Sell(i64),
    Buy(i64),
}

/// Decode a button's `data-action` / `data-id` pair
pub fn parse_card_action(action: &str, id: &str) -> Option<CardAction> {
    let id = id.trim().parse().ok()?;
    match action {
        ACTION_SELL => Some(CardAction::Sell(id)),
        ACTION_BUY => Some(CardAction::Buy(id)),
        _ => None,
    }
}

/// Find the card button a click landed on, if any
fn clicked_card_action(ev: &ev::MouseEvent) -> Option<CardAction> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = target.closest("[data-action]").ok().flatten()?;
    parse_card_action(
        &button.get_attribute("data-action")?,
        &button.get_attribute("data-id")?,
    )
}

/// Click handler for a card region. Sell and buy buttons are delegated
/// here since the region's HTML is replaced on every refresh.
fn card_click_handler(controller: Rc<Controller>) -> impl Fn(ev::MouseEvent) + 'static {
    move |ev| match clicked_card_action(&ev) {
        Some(CardAction::Sell(id)) => dispatch(&controller, move |c| async move { c.sell_prompt(id).await }),
        Some(CardAction::Buy(id)) => dispatch(&controller, move |c| async move { c.buy(id).await }),
        None => {}
    }
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let screen = GameScreen::new();
    provide_context(screen);

    let controller = Rc::new(Controller::new(
        GlooTransport::new(get_api_base()),
        TelegramHost::detect(),
        screen,
    ));
    provide_context(Rc::clone(&controller));

    dispatch(&controller, |c| async move { c.start().await });

    let ticker = Rc::clone(&controller);
    gloo_timers::callback::Interval::new(1_000, move || ticker.render_daily_timer()).forget();

    let on_search = {
        let controller = Rc::clone(&controller);
        move |ev: ev::Event| {
            screen.search.set(event_target_value(&ev));
            dispatch(&controller, |c| async move { c.load_my_players().await });
        }
    };

    let html = move |region: Region| move || screen.region(region).get();

    view! {
        <div class="app">
            <StatBar />
            <ActionBar />

            <section>
                <h2>"My players"</h2>
                <input
                    id="search-my"
                    type="search"
                    placeholder="Search by name or position"
                    prop:value=move || screen.search.get()
                    on:input=on_search
                />
                <div
                    id=Region::CardArea.element_id()
                    class="card-grid"
                    on:click=card_click_handler(Rc::clone(&controller))
                    inner_html=html(Region::CardArea)
                />
            </section>

            <section>
                <h2>"Transfer market"</h2>
                <div
                    id=Region::MarketArea.element_id()
                    class="card-grid"
                    on:click=card_click_handler(Rc::clone(&controller))
                    inner_html=html(Region::MarketArea)
                />
            </section>

            <section>
                <h2>"Leaderboard"</h2>
                <div id=Region::Leaderboard.element_id() inner_html=html(Region::Leaderboard) />
            </section>

            <CoinShop />
            <Toast />
        </div>
    }
}
