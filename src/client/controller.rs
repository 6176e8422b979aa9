//! View Controller
//!
//! Drives the whole page: reads game state into screen regions and relays
//! player actions to the backend, re-reading whatever an action changed.
//!
//! Every failure ends up as one toast and stops the action. Nothing is
//! retried.

use futures_util::join;
use std::cell::Cell;

use super::api::GameClient;
use super::error::ClientError;
use super::filter::{filter_cards, parse_sell_price};
use super::format::daily_label;
use super::host::{resolve_user_id, HostPlatform, PaymentStatus};
use super::render::{render_leaderboard, render_market, render_my_players};
use super::screen::{Region, Screen};
use super::transport::Transport;
use crate::model::MatchResult;

pub const SELL_PROMPT: &str = "Enter a sale price (minimum 100):";
pub const SELL_PROMPT_DEFAULT: &str = "300";
pub const INVALID_PRICE: &str = "Enter a valid price";

/// Current unix time in seconds
fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Orchestrates read/render and write/refresh cycles for one session
pub struct ViewController<T, H, S> {
    api: GameClient<T>,
    host: H,
    screen: S,
    user_id: i64,
    /// Unix seconds of the last daily claim, from the latest profile read
    last_daily: Cell<i64>,
}

impl<T, H, S> ViewController<T, H, S>
where
    T: Transport,
    H: HostPlatform,
    S: Screen,
{
    /// Resolve the session identity and take over the viewport
    pub fn new(transport: T, host: H, screen: S) -> Self {
        host.expand();
        let user_id = resolve_user_id(&host);
        tracing::info!(user_id, payments = host.supports_payments(), "Session started");

        Self {
            api: GameClient::new(transport),
            host,
            screen,
            user_id,
            last_daily: Cell::new(0),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn api(&self) -> &GameClient<T> {
        &self.api
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    fn fail(&self, action: &'static str, err: ClientError) {
        tracing::warn!(action, user_id = self.user_id, error = ?err, "Action failed");
        self.screen.toast(&err.to_string());
    }

    /// First paint: every region at once
    pub async fn start(&self) {
        join!(
            self.load_profile(),
            self.load_my_players(),
            self.load_market(),
            self.load_leaderboard()
        );
    }

    // ============ Reads ============

    /// Stat bar and daily countdown
    pub async fn load_profile(&self) {
        match self.api.profile(self.user_id).await {
            Ok(profile) => {
                self.screen.set_text(Region::Coins, profile.coins.to_string());
                self.screen
                    .set_text(Region::CardsCount, profile.cards_count.to_string());
                self.screen
                    .set_text(Region::TeamPower, profile.team_power.to_string());
                self.screen.set_text(Region::Rating, profile.rating.to_string());
                self.last_daily.set(profile.last_daily);
                self.render_daily_timer();
            }
            Err(e) => self.fail("profile", e),
        }
    }

    /// Recompute the countdown from the last known claim time.
    ///
    /// Called after each profile read and by the page's one-second tick.
    pub fn render_daily_timer(&self) {
        self.render_daily_timer_at(now_secs());
    }

    pub fn render_daily_timer_at(&self, now: i64) {
        self.screen
            .set_text(Region::DailyTimer, daily_label(self.last_daily.get(), now));
    }

    /// Owned cards, narrowed by the search box
    pub async fn load_my_players(&self) {
        match self.api.my_players(self.user_id).await {
            Ok(cards) => {
                let cards = filter_cards(cards, &self.screen.search_query());
                self.screen.set_html(Region::CardArea, render_my_players(&cards));
            }
            Err(e) => self.fail("my_players", e),
        }
    }

    pub async fn load_market(&self) {
        match self.api.market().await {
            Ok(listings) => self
                .screen
                .set_html(Region::MarketArea, render_market(&listings)),
            Err(e) => self.fail("market", e),
        }
    }

    pub async fn load_leaderboard(&self) {
        match self.api.leaderboard().await {
            Ok(leaders) => self.screen.set_html(
                Region::Leaderboard,
                render_leaderboard(&leaders, self.user_id),
            ),
            Err(e) => self.fail("leaderboard", e),
        }
    }

    // ============ Writes ============

    pub async fn claim_daily(&self) {
        match self.api.claim_daily(self.user_id).await {
            Ok(ack) => {
                self.screen.toast(&ack.message);
                self.load_profile().await;
            }
            Err(e) => self.fail("daily", e),
        }
    }

    pub async fn open_pack(&self) {
        match self.api.open_pack(self.user_id).await {
            Ok(card) => {
                tracing::info!(user_id = self.user_id, card = %card.face.name, "Pack opened");
                self.screen.toast(&format!(
                    "New player: {} ({})",
                    card.face.name, card.face.rarity
                ));
                join!(self.load_profile(), self.load_my_players());
            }
            Err(e) => self.fail("open_pack", e),
        }
    }

    pub async fn play_match(&self) {
        match self.api.play_match(self.user_id).await {
            Ok(report) => {
                let text = match report.result {
                    MatchResult::Win => format!(
                        "🏆 Victory! +{} coins ({} vs {})",
                        report.reward.unwrap_or(0),
                        report.your,
                        report.enemy
                    ),
                    MatchResult::Lose => {
                        format!("😢 Defeat ({} vs {})", report.your, report.enemy)
                    }
                };
                self.screen.toast(&text);
                join!(self.load_profile(), self.load_leaderboard());
            }
            Err(e) => self.fail("match", e),
        }
    }

    /// Ask for a price, then [`sell`](Self::sell). Dismissing the prompt or
    /// leaving it blank does nothing.
    pub async fn sell_prompt(&self, player_id: i64) {
        let input = match self.screen.prompt(SELL_PROMPT, SELL_PROMPT_DEFAULT) {
            Some(input) if !input.trim().is_empty() => input,
            _ => return,
        };
        self.sell(player_id, &input).await;
    }

    /// List an owned card. The price is checked before anything is sent.
    pub async fn sell(&self, player_id: i64, price_input: &str) {
        let Some(price) = parse_sell_price(price_input) else {
            self.screen.toast(INVALID_PRICE);
            return;
        };

        match self.api.sell_player(self.user_id, player_id, price).await {
            Ok(ack) => {
                self.screen.toast(&ack.message);
                join!(self.load_market(), self.load_my_players());
            }
            Err(e) => self.fail("sell", e),
        }
    }

    pub async fn buy(&self, market_id: i64) {
        match self.api.buy_player(self.user_id, market_id).await {
            Ok(ack) => {
                self.screen.toast(&ack.message);
                join!(
                    self.load_profile(),
                    self.load_my_players(),
                    self.load_market()
                );
            }
            Err(e) => self.fail("buy", e),
        }
    }

    /// Buy coins through the host's payment sheet.
    ///
    /// Coins are only requested after the sheet reports `paid`.
    pub async fn buy_coins(&self, amount: i64) {
        if !self.host.supports_payments() {
            self.fail("buy_coins", ClientError::PaymentUnavailable);
            return;
        }

        let invoice = match self.api.buy_coins(self.user_id, amount).await {
            Ok(invoice) => invoice,
            Err(e) => {
                self.fail("buy_coins", e);
                return;
            }
        };

        match self.host.show_invoice(&invoice).await {
            Ok(PaymentStatus::Paid) => {
                if let Err(e) = self.api.add_coins(self.user_id, amount).await {
                    tracing::warn!(user_id = self.user_id, amount, error = ?e, "add_coins failed");
                }
                self.screen
                    .toast(&format!("Payment successful! +{} coins", amount));
                self.load_profile().await;
            }
            Ok(status) => {
                tracing::info!(user_id = self.user_id, amount, ?status, "Payment not completed");
            }
            Err(e) => self.fail("payment", e),
        }
    }
}
