//! Game Storage
//!
//! SQLite tables for users, their cards and the transfer market.

pub mod error;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use sqlite::{team_power, GameStore, Ledger, ListingRow, UserRow};
