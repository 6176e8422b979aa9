//! SQLite-backed game store
//!
//! One connection behind a mutex. Reads go straight through; anything that
//! moves coins or cards runs inside [`GameStore::write`], which wraps the
//! closure in a single transaction.

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Transaction};
use std::path::Path;
use std::sync::Mutex;

use super::error::{StoreError, StoreResult};
use crate::model::{CardFace, LeaderboardEntry, MarketListing, PlayerCard, Profile, Rarity};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        coins INTEGER NOT NULL,
        rating INTEGER NOT NULL DEFAULT 0,
        wins INTEGER NOT NULL DEFAULT 0,
        losses INTEGER NOT NULL DEFAULT 0,
        last_daily INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS players (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        position TEXT NOT NULL,
        attack INTEGER NOT NULL,
        defense INTEGER NOT NULL,
        speed INTEGER NOT NULL,
        rarity TEXT NOT NULL,
        image TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_players_user ON players(user_id);

    CREATE TABLE IF NOT EXISTS market (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        seller_id INTEGER NOT NULL,
        player_id INTEGER NOT NULL UNIQUE,
        price INTEGER NOT NULL
    );
";

/// Columns selected for a card face, in [`face_from_row`] order
const FACE_COLUMNS: &str =
    "players.name, players.position, players.rarity, players.attack, players.defense, players.speed, players.image";

/// A user's row
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: i64,
    pub coins: i64,
    pub rating: i64,
    pub wins: i64,
    pub losses: i64,
    pub last_daily: i64,
}

/// A market row without the card face
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub id: i64,
    pub seller_id: i64,
    pub player_id: i64,
    pub price: i64,
}

fn face_from_row(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<CardFace> {
    Ok(CardFace {
        name: row.get(offset)?,
        position: row.get(offset + 1)?,
        rarity: Rarity::from(row.get::<_, Option<String>>(offset + 2)?),
        attack: row.get(offset + 3)?,
        defense: row.get(offset + 4)?,
        speed: row.get(offset + 5)?,
        image: row.get(offset + 6)?,
    })
}

/// Integer mean of card powers, 0 for an empty team
pub fn team_power(powers: &[i64]) -> i64 {
    if powers.is_empty() {
        0
    } else {
        powers.iter().sum::<i64>() / powers.len() as i64
    }
}

/// Persistent game state
pub struct GameStore {
    conn: Mutex<Connection>,
    starting_coins: i64,
}

impl GameStore {
    /// Create or open the database at `path`
    pub fn open(path: &Path, starting_coins: i64) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Self::init(conn, starting_coins)
    }

    /// Throwaway database, used by tests
    pub fn in_memory(starting_coins: i64) -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?, starting_coins)
    }

    fn init(conn: Connection, starting_coins: i64) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            starting_coins,
        })
    }

    /// Run `f` inside one transaction. Committed only if `f` succeeds.
    pub fn write<T, E>(&self, f: impl FnOnce(&Ledger<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let tx = conn.transaction().map_err(StoreError::from)?;
        let ledger = Ledger {
            tx,
            starting_coins: self.starting_coins,
        };

        let value = f(&ledger)?;
        ledger.tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }

    /// Cheap round trip used by the readiness probe
    pub fn ping(&self) -> StoreResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    /// Profile of `user_id`, creating the user on first contact
    pub fn profile(&self, user_id: i64) -> StoreResult<Profile> {
        self.write(|ledger| {
            let user = ledger.ensure_user(user_id)?;
            let powers = ledger.team_powers(user_id)?;

            Ok(Profile {
                user_id,
                coins: user.coins,
                cards_count: powers.len() as i64,
                team_power: team_power(&powers),
                rating: user.rating,
                wins: user.wins,
                losses: user.losses,
                last_daily: user.last_daily,
            })
        })
    }

    /// Cards owned by `user_id` that are not on the market
    pub fn owned_cards(&self, user_id: i64) -> StoreResult<Vec<PlayerCard>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let mut stmt = conn.prepare_cached(&format!(
            "SELECT players.id, {FACE_COLUMNS} FROM players
             WHERE players.user_id = ?
               AND players.id NOT IN (SELECT player_id FROM market)
             ORDER BY players.id"
        ))?;

        let cards = stmt
            .query_map(params![user_id], |row| {
                Ok(PlayerCard {
                    id: row.get(0)?,
                    face: face_from_row(row, 1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cards)
    }

    /// Every open listing, oldest first
    pub fn market(&self) -> StoreResult<Vec<MarketListing>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let mut stmt = conn.prepare_cached(&format!(
            "SELECT market.id, market.player_id, market.seller_id, market.price, {FACE_COLUMNS}
             FROM market JOIN players ON market.player_id = players.id
             ORDER BY market.id"
        ))?;

        let listings = stmt
            .query_map([], |row| {
                Ok(MarketListing {
                    id: row.get(0)?,
                    player_id: row.get(1)?,
                    seller_id: row.get(2)?,
                    price: row.get(3)?,
                    face: face_from_row(row, 4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(listings)
    }

    /// Top `limit` users by rating, then coins
    pub fn leaderboard(&self, limit: usize) -> StoreResult<Vec<LeaderboardEntry>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let mut stmt = conn.prepare_cached(
            "SELECT id, rating, wins, losses, coins FROM users
             ORDER BY rating DESC, coins DESC, id ASC
             LIMIT ?",
        )?;

        let leaders = stmt
            .query_map(params![limit as i64], |row| {
                Ok(LeaderboardEntry {
                    user_id: row.get(0)?,
                    rating: row.get(1)?,
                    wins: row.get(2)?,
                    losses: row.get(3)?,
                    coins: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(leaders)
    }
}

/// Statements available inside a write transaction
pub struct Ledger<'a> {
    tx: Transaction<'a>,
    starting_coins: i64,
}

impl Ledger<'_> {
    /// Fetch a user, creating it with the starting balance if unknown
    pub fn ensure_user(&self, user_id: i64) -> StoreResult<UserRow> {
        self.tx.execute(
            "INSERT OR IGNORE INTO users (id, coins) VALUES (?, ?)",
            params![user_id, self.starting_coins],
        )?;

        let user = self.tx.query_row(
            "SELECT id, coins, rating, wins, losses, last_daily FROM users WHERE id = ?",
            params![user_id],
            |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    coins: row.get(1)?,
                    rating: row.get(2)?,
                    wins: row.get(3)?,
                    losses: row.get(4)?,
                    last_daily: row.get(5)?,
                })
            },
        )?;

        Ok(user)
    }

    /// Add (or with a negative delta, remove) coins
    pub fn adjust_coins(&self, user_id: i64, delta: i64) -> StoreResult<()> {
        self.tx.execute(
            "UPDATE users SET coins = coins + ? WHERE id = ?",
            params![delta, user_id],
        )?;
        Ok(())
    }

    pub fn set_last_daily(&self, user_id: i64, timestamp: i64) -> StoreResult<()> {
        self.tx.execute(
            "UPDATE users SET last_daily = ? WHERE id = ?",
            params![timestamp, user_id],
        )?;
        Ok(())
    }

    /// Apply a match result. Rating never drops below zero.
    pub fn record_match(&self, user_id: i64, won: bool, rating_delta: i64) -> StoreResult<()> {
        let (wins, losses) = if won { (1, 0) } else { (0, 1) };
        self.tx.execute(
            "UPDATE users
             SET rating = MAX(0, rating + ?), wins = wins + ?, losses = losses + ?
             WHERE id = ?",
            params![rating_delta, wins, losses, user_id],
        )?;
        Ok(())
    }

    /// Give `user_id` a new card; returns its id
    pub fn insert_card(&self, user_id: i64, face: &CardFace) -> StoreResult<i64> {
        self.tx.execute(
            "INSERT INTO players (user_id, name, position, attack, defense, speed, rarity, image)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                user_id,
                face.name,
                face.position,
                face.attack,
                face.defense,
                face.speed,
                face.rarity.as_str(),
                face.image
            ],
        )?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Fetch a card with its current owner
    pub fn card(&self, card_id: i64) -> StoreResult<Option<(i64, PlayerCard)>> {
        let card = self
            .tx
            .query_row(
                &format!("SELECT players.user_id, players.id, {FACE_COLUMNS} FROM players WHERE players.id = ?"),
                params![card_id],
                |row| {
                    Ok((
                        row.get(0)?,
                        PlayerCard {
                            id: row.get(1)?,
                            face: face_from_row(row, 2)?,
                        },
                    ))
                },
            )
            .optional()?;
        Ok(card)
    }

    /// Powers of the user's cards that are not on the market
    pub fn team_powers(&self, user_id: i64) -> StoreResult<Vec<i64>> {
        let mut stmt = self.tx.prepare_cached(
            "SELECT attack + defense + speed FROM players
             WHERE user_id = ? AND id NOT IN (SELECT player_id FROM market)",
        )?;
        let powers = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(powers)
    }

    pub fn is_listed(&self, card_id: i64) -> StoreResult<bool> {
        let listed = self
            .tx
            .query_row(
                "SELECT 1 FROM market WHERE player_id = ?",
                params![card_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(listed.is_some())
    }

    /// Put a card on the market; returns the listing id
    pub fn insert_listing(&self, seller_id: i64, card_id: i64, price: i64) -> StoreResult<i64> {
        self.tx.execute(
            "INSERT INTO market (seller_id, player_id, price) VALUES (?, ?, ?)",
            params![seller_id, card_id, price],
        )?;
        Ok(self.tx.last_insert_rowid())
    }

    pub fn listing(&self, market_id: i64) -> StoreResult<Option<ListingRow>> {
        let listing = self
            .tx
            .query_row(
                "SELECT id, seller_id, player_id, price FROM market WHERE id = ?",
                params![market_id],
                |row| {
                    Ok(ListingRow {
                        id: row.get(0)?,
                        seller_id: row.get(1)?,
                        player_id: row.get(2)?,
                        price: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(listing)
    }

    pub fn delete_listing(&self, market_id: i64) -> StoreResult<()> {
        self.tx
            .execute("DELETE FROM market WHERE id = ?", params![market_id])?;
        Ok(())
    }

    pub fn transfer_card(&self, card_id: i64, new_owner: i64) -> StoreResult<()> {
        self.tx.execute(
            "UPDATE players SET user_id = ? WHERE id = ?",
            params![new_owner, card_id],
        )?;
        Ok(())
    }
}
