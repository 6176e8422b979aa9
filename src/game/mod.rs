//! Game Logic
//!
//! Rules of the card game on top of the store: who gets which coins and
//! cards, and when.

pub mod error;
pub mod rules;
pub mod service;

pub use error::{GameError, GameResult};
pub use service::{DailyBonus, GameService, MatchOutcome, Trade};
