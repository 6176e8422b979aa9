//! Game Service
//!
//! The economy: daily bonus, packs, matches, the transfer market and coin
//! purchases. Every mutation is a single store transaction; dice are rolled
//! before the transaction starts so the RNG lock is never held across it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

use super::error::{GameError, GameResult};
use super::rules;
use crate::catalog::Catalog;
use crate::config::{GameConfig, PaymentsConfig};
use crate::model::{
    Club, Invoice, LeaderboardEntry, MarketListing, MatchResult, PlayerCard, Profile,
    MIN_SELL_PRICE,
};
use crate::store::{team_power, GameStore, StoreError};

/// Outcome of a daily claim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBonus {
    pub reward: i64,
}

/// Outcome of a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub your: i64,
    pub enemy: i64,
    /// Coins paid out, only on a win
    pub reward: Option<i64>,
}

/// A completed trade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    pub market_id: i64,
    pub player_id: i64,
    pub seller_id: i64,
    pub price: i64,
}

pub struct GameService {
    store: GameStore,
    catalog: Catalog,
    game: GameConfig,
    payments: PaymentsConfig,
    rng: Mutex<StdRng>,
}

impl GameService {
    pub fn new(store: GameStore, catalog: Catalog, game: GameConfig, payments: PaymentsConfig) -> Self {
        Self::with_rng(store, catalog, game, payments, StdRng::from_entropy())
    }

    /// Deterministic dice, used by tests
    pub fn with_seed(
        store: GameStore,
        catalog: Catalog,
        game: GameConfig,
        payments: PaymentsConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(store, catalog, game, payments, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        store: GameStore,
        catalog: Catalog,
        game: GameConfig,
        payments: PaymentsConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            catalog,
            game,
            payments,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn payments_enabled(&self) -> bool {
        self.payments.provider_token.is_some()
    }

    fn with_rng_locked<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> GameResult<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(f(&mut *rng))
    }

    // ============ Reads ============

    pub fn profile(&self, user_id: i64) -> GameResult<Profile> {
        Ok(self.store.profile(user_id)?)
    }

    pub fn owned_cards(&self, user_id: i64) -> GameResult<Vec<PlayerCard>> {
        Ok(self.store.owned_cards(user_id)?)
    }

    pub fn market(&self) -> GameResult<Vec<MarketListing>> {
        Ok(self.store.market()?)
    }

    pub fn leaderboard(&self) -> GameResult<Vec<LeaderboardEntry>> {
        Ok(self.store.leaderboard(self.game.leaderboard_limit)?)
    }

    pub fn clubs(&self) -> &[Club] {
        self.catalog.clubs()
    }

    // ============ Economy ============

    pub fn claim_daily(&self, user_id: i64) -> GameResult<DailyBonus> {
        self.claim_daily_at(user_id, chrono::Utc::now().timestamp())
    }

    /// Claim the daily bonus as of `now` (unix seconds)
    pub fn claim_daily_at(&self, user_id: i64, now: i64) -> GameResult<DailyBonus> {
        let reward = self.with_rng_locked(|rng| rules::roll(rng, self.game.daily_reward))?;

        self.store.write(|ledger| {
            let user = ledger.ensure_user(user_id)?;
            if let Some(remaining) = rules::daily_cooldown(user.last_daily, now) {
                return Err(GameError::AlreadyClaimed { remaining });
            }

            ledger.adjust_coins(user_id, reward)?;
            ledger.set_last_daily(user_id, now)?;
            Ok(())
        })?;

        tracing::info!(user_id, reward, "Daily bonus claimed");
        Ok(DailyBonus { reward })
    }

    /// Buy a pack and receive one random card from the catalog
    pub fn open_pack(&self, user_id: i64) -> GameResult<PlayerCard> {
        let face = self.with_rng_locked(|rng| self.catalog.draw(rng).clone())?;
        let price = self.game.pack_price;

        let card = self.store.write(|ledger| {
            let user = ledger.ensure_user(user_id)?;
            if user.coins < price {
                return Err(GameError::NotEnoughCoins);
            }

            ledger.adjust_coins(user_id, -price)?;
            let id = ledger.insert_card(user_id, &face)?;
            Ok(PlayerCard { id, face })
        })?;

        tracing::info!(
            user_id,
            player_id = card.id,
            rarity = %card.face.rarity,
            "Pack opened"
        );
        Ok(card)
    }

    /// Play against a random opponent
    pub fn play_match(&self, user_id: i64) -> GameResult<MatchOutcome> {
        let (enemy, prize) = self.with_rng_locked(|rng| {
            (
                rules::roll(rng, self.game.enemy_power),
                rules::roll(rng, self.game.win_reward),
            )
        })?;

        let outcome = self.store.write(|ledger| {
            ledger.ensure_user(user_id)?;
            let powers = ledger.team_powers(user_id)?;
            if powers.is_empty() {
                return Err(GameError::NoPlayers);
            }

            let your = team_power(&powers);
            let result = rules::resolve_match(your, enemy);
            let reward = match result {
                MatchResult::Win => {
                    ledger.adjust_coins(user_id, prize)?;
                    ledger.record_match(user_id, true, self.game.win_rating)?;
                    Some(prize)
                }
                MatchResult::Lose => {
                    ledger.record_match(user_id, false, -self.game.loss_rating)?;
                    None
                }
            };

            Ok(MatchOutcome {
                result,
                your,
                enemy,
                reward,
            })
        })?;

        tracing::info!(
            user_id,
            your = outcome.your,
            enemy = outcome.enemy,
            result = ?outcome.result,
            "Match played"
        );
        Ok(outcome)
    }

    /// List one of the user's cards; returns the listing id
    pub fn sell(&self, user_id: i64, player_id: i64, price: f64) -> GameResult<i64> {
        let price = rules::listing_price(price).ok_or(GameError::InvalidPrice {
            min: MIN_SELL_PRICE as i64,
        })?;

        let market_id = self.store.write(|ledger| {
            ledger.ensure_user(user_id)?;
            match ledger.card(player_id)? {
                Some((owner, _)) if owner == user_id => {}
                _ => return Err(GameError::PlayerNotFound),
            }
            if ledger.is_listed(player_id)? {
                return Err(GameError::AlreadyListed);
            }

            Ok(ledger.insert_listing(user_id, player_id, price)?)
        })?;

        tracing::info!(user_id, player_id, market_id, price, "Player listed");
        Ok(market_id)
    }

    /// Buy a listing: coins go to the seller, the card to the buyer
    pub fn buy(&self, user_id: i64, market_id: i64) -> GameResult<Trade> {
        let trade = self.store.write(|ledger| {
            let listing = ledger.listing(market_id)?.ok_or(GameError::ListingNotFound)?;
            if listing.seller_id == user_id {
                return Err(GameError::OwnListing);
            }

            let buyer = ledger.ensure_user(user_id)?;
            if buyer.coins < listing.price {
                return Err(GameError::NotEnoughCoins);
            }

            ledger.ensure_user(listing.seller_id)?;
            ledger.adjust_coins(user_id, -listing.price)?;
            ledger.adjust_coins(listing.seller_id, listing.price)?;
            ledger.transfer_card(listing.player_id, user_id)?;
            ledger.delete_listing(market_id)?;

            Ok(Trade {
                market_id,
                player_id: listing.player_id,
                seller_id: listing.seller_id,
                price: listing.price,
            })
        })?;

        tracing::info!(
            user_id,
            market_id,
            seller_id = trade.seller_id,
            price = trade.price,
            "Player bought"
        );
        Ok(trade)
    }

    fn check_amount(&self, amount: i64) -> GameResult<()> {
        if amount < 1 || amount > self.payments.max_amount {
            return Err(GameError::InvalidAmount {
                max: self.payments.max_amount,
            });
        }
        Ok(())
    }

    /// Telegram invoice for a coin purchase
    pub fn invoice(&self, user_id: i64, amount: i64) -> GameResult<Invoice> {
        self.check_amount(amount)?;
        let token = self
            .payments
            .provider_token
            .as_deref()
            .ok_or(GameError::PaymentsDisabled)?;

        tracing::info!(user_id, amount, "Invoice issued");
        Ok(rules::build_invoice(user_id, amount, token, &self.payments))
    }

    /// Credit purchased coins. The payment itself is confirmed client-side.
    pub fn add_coins(&self, user_id: i64, amount: i64) -> GameResult<()> {
        self.check_amount(amount)?;

        self.store.write(|ledger| {
            ledger.ensure_user(user_id)?;
            ledger.adjust_coins(user_id, amount)
        })?;

        tracing::info!(user_id, amount, "Coins credited");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardFace, Rarity};

    const NOW: i64 = 1_700_000_000;

    fn face(name: &str, stat: i64) -> CardFace {
        CardFace {
            name: name.to_string(),
            position: "MF".to_string(),
            rarity: Rarity::Common,
            attack: stat,
            defense: stat,
            speed: stat,
            image: String::new(),
        }
    }

    fn service_with(players: Vec<CardFace>, payments: PaymentsConfig) -> GameService {
        let store = GameStore::in_memory(1000).unwrap();
        let catalog = Catalog::new(players, Vec::new()).unwrap();
        GameService::with_seed(store, catalog, GameConfig::default(), payments, 42)
    }

    fn service() -> GameService {
        service_with(
            vec![face("Strong", 100), face("Weak", 10)],
            PaymentsConfig::default(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let game = service();
        let profile = game.profile(9).unwrap();
        assert_eq!(profile.coins, 1000);
        assert_eq!(profile.rating, 0);
        assert_eq!(profile.cards_count, 0);
    }

    #[test]
    fn test_daily_once_per_period() {
        let game = service();

        let bonus = game.claim_daily_at(1, NOW).unwrap();
        assert!((200..=500).contains(&bonus.reward));
        let profile = game.profile(1).unwrap();
        assert_eq!(profile.coins, 1000 + bonus.reward);
        assert_eq!(profile.last_daily, NOW);

        match game.claim_daily_at(1, NOW + 86_399) {
            Err(GameError::AlreadyClaimed { remaining }) => assert_eq!(remaining, 1),
            other => panic!("expected cooldown, got {:?}", other),
        }
        assert_eq!(game.profile(1).unwrap().coins, 1000 + bonus.reward);

        assert!(game.claim_daily_at(1, NOW + 86_400).is_ok());
    }

    #[test]
    fn test_pack_costs_300() {
        let game = service();

        let card = game.open_pack(1).unwrap();
        assert!(["Strong", "Weak"].contains(&card.face.name.as_str()));

        let profile = game.profile(1).unwrap();
        assert_eq!(profile.coins, 700);
        assert_eq!(profile.cards_count, 1);
        assert_eq!(game.owned_cards(1).unwrap(), vec![card]);
    }

    #[test]
    fn test_pack_without_coins_fails() {
        let game = service();
        for _ in 0..3 {
            game.open_pack(1).unwrap();
        }
        assert_eq!(game.profile(1).unwrap().coins, 100);

        assert!(matches!(game.open_pack(1), Err(GameError::NotEnoughCoins)));
        let profile = game.profile(1).unwrap();
        assert_eq!(profile.coins, 100);
        assert_eq!(profile.cards_count, 3);
    }

    #[test]
    fn test_match_without_cards_fails() {
        let game = service();
        assert!(matches!(game.play_match(1), Err(GameError::NoPlayers)));
        assert_eq!(game.profile(1).unwrap().losses, 0);
    }

    #[test]
    fn test_strong_team_always_wins() {
        let game = service_with(vec![face("Strong", 200)], PaymentsConfig::default());
        game.open_pack(1).unwrap();

        let outcome = game.play_match(1).unwrap();
        assert_eq!(outcome.result, MatchResult::Win);
        assert_eq!(outcome.your, 600);
        assert!((150..=300).contains(&outcome.enemy));
        let reward = outcome.reward.unwrap();
        assert!((200..=400).contains(&reward));

        let profile = game.profile(1).unwrap();
        assert_eq!(profile.coins, 700 + reward);
        assert_eq!(profile.rating, 25);
        assert_eq!(profile.wins, 1);
    }

    #[test]
    fn test_weak_team_always_loses_and_rating_floors() {
        let game = service_with(vec![face("Weak", 10)], PaymentsConfig::default());
        game.open_pack(1).unwrap();

        let outcome = game.play_match(1).unwrap();
        assert_eq!(outcome.result, MatchResult::Lose);
        assert_eq!(outcome.reward, None);

        let profile = game.profile(1).unwrap();
        assert_eq!(profile.coins, 700);
        assert_eq!(profile.rating, 0);
        assert_eq!(profile.losses, 1);
    }

    #[test]
    fn test_sell_rules() {
        let game = service();
        let card = game.open_pack(1).unwrap();

        assert!(matches!(
            game.sell(1, card.id, 99.0),
            Err(GameError::InvalidPrice { min: 100 })
        ));
        assert!(matches!(
            game.sell(2, card.id, 500.0),
            Err(GameError::PlayerNotFound)
        ));

        let market_id = game.sell(1, card.id, 150.7).unwrap();
        let market = game.market().unwrap();
        assert_eq!(market.len(), 1);
        assert_eq!(market[0].id, market_id);
        assert_eq!(market[0].price, 150);

        assert!(matches!(
            game.sell(1, card.id, 200.0),
            Err(GameError::AlreadyListed)
        ));
        assert!(game.owned_cards(1).unwrap().is_empty());
        assert_eq!(game.profile(1).unwrap().cards_count, 0);
    }

    #[test]
    fn test_trade_moves_coins_and_card() {
        let game = service();
        let card = game.open_pack(1).unwrap();
        let market_id = game.sell(1, card.id, 400.0).unwrap();

        assert!(matches!(game.buy(1, market_id), Err(GameError::OwnListing)));

        let trade = game.buy(2, market_id).unwrap();
        assert_eq!(trade.player_id, card.id);
        assert_eq!(trade.price, 400);

        assert_eq!(game.profile(1).unwrap().coins, 700 + 400);
        assert_eq!(game.profile(2).unwrap().coins, 1000 - 400);
        assert_eq!(game.owned_cards(2).unwrap()[0].id, card.id);
        assert!(game.market().unwrap().is_empty());

        assert!(matches!(
            game.buy(3, market_id),
            Err(GameError::ListingNotFound)
        ));
    }

    #[test]
    fn test_buy_without_coins_changes_nothing() {
        let game = service();
        let card = game.open_pack(1).unwrap();
        let market_id = game.sell(1, card.id, 5000.0).unwrap();

        assert!(matches!(game.buy(2, market_id), Err(GameError::NotEnoughCoins)));
        assert_eq!(game.profile(2).unwrap().coins, 1000);
        assert_eq!(game.profile(1).unwrap().coins, 700);
        assert_eq!(game.market().unwrap().len(), 1);
    }

    #[test]
    fn test_invoice_requires_token() {
        let game = service();
        assert!(matches!(
            game.invoice(1, 100),
            Err(GameError::PaymentsDisabled)
        ));

        let game = service_with(
            vec![face("A", 50)],
            PaymentsConfig {
                provider_token: Some("123:TEST".to_string()),
                ..PaymentsConfig::default()
            },
        );
        let invoice = game.invoice(1, 1000).unwrap();
        assert_eq!(invoice.provider_token, "123:TEST");
        assert_eq!(invoice.prices[0].amount, 10_000);

        assert!(matches!(
            game.invoice(1, 0),
            Err(GameError::InvalidAmount { .. })
        ));
        assert!(matches!(
            game.invoice(1, 100_001),
            Err(GameError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_add_coins() {
        let game = service();
        game.add_coins(1, 500).unwrap();
        assert_eq!(game.profile(1).unwrap().coins, 1500);
        assert!(game.add_coins(1, -5).is_err());
    }

    #[test]
    fn test_leaderboard_uses_limit() {
        let store = GameStore::in_memory(1000).unwrap();
        let catalog = Catalog::bundled().unwrap();
        let config = GameConfig {
            leaderboard_limit: 2,
            ..GameConfig::default()
        };
        let game = GameService::with_seed(store, catalog, config, PaymentsConfig::default(), 1);

        for id in 1..=4 {
            game.profile(id).unwrap();
        }
        assert_eq!(game.leaderboard().unwrap().len(), 2);
    }
}
