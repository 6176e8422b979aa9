//! UI Components
//!
//! Leptos components for the single game page.

pub mod actions;
pub mod stats;
pub mod toast;

pub use actions::{ActionBar, CoinShop};
pub use stats::StatBar;
pub use toast::Toast;
