//! Action Components
//!
//! Buttons for the daily bonus, packs, matches and coin purchases.

use leptos::*;
use std::rc::Rc;

use crate::app::Controller;

/// Coin packs offered in the shop
pub const COIN_PACKS: [i64; 3] = [100, 500, 1000];

/// Run a controller action in the background
pub fn dispatch<F, Fut>(controller: &Rc<Controller>, action: F)
where
    F: FnOnce(Rc<Controller>) -> Fut,
    Fut: std::future::Future<Output = ()> + 'static,
{
    spawn_local(action(Rc::clone(controller)));
}

#[component]
pub fn ActionBar() -> impl IntoView {
    let controller = use_context::<Rc<Controller>>().expect("Controller not found");
    let daily = Rc::clone(&controller);
    let pack = Rc::clone(&controller);
    let play = controller;

    view! {
        <section class="actions">
            <button class="primary" on:click=move |_| dispatch(&daily, |c| async move { c.claim_daily().await })>
                "🎁 Daily bonus"
            </button>
            <button class="primary" on:click=move |_| dispatch(&pack, |c| async move { c.open_pack().await })>
                "🎴 Open pack (300)"
            </button>
            <button class="primary" on:click=move |_| dispatch(&play, |c| async move { c.play_match().await })>
                "⚽ Play match"
            </button>
        </section>
    }
}

#[component]
pub fn CoinShop() -> impl IntoView {
    let controller = use_context::<Rc<Controller>>().expect("Controller not found");

    view! {
        <section class="shop">
            <h2>"Buy coins"</h2>
            <div class="shop-row">
                {COIN_PACKS
                    .into_iter()
                    .map(|amount| {
                        let controller = Rc::clone(&controller);
                        view! {
                            <button
                                class="small"
                                on:click=move |_| dispatch(&controller, move |c| async move { c.buy_coins(amount).await })
                            >
                                {format!("+{} 💰", amount)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
