//! API Routes
//!
//! Route handlers organized by functionality.

pub mod bot;
pub mod cards;
pub mod health;
pub mod market;
pub mod payments;
pub mod profile;
pub mod rewards;
