//! Game Client
//!
//! Everything that runs on the player's side: the [`ViewController`] that
//! drives the page, the typed [`GameClient`] over the HTTP contract, and the
//! HTML fragments the regions are filled with.
//!
//! The controller talks to the outside world through three seams:
//!
//! - [`Transport`]: JSON over HTTP (`gloo-net` in the browser, `reqwest` natively)
//! - [`HostPlatform`]: identity and the native payment sheet (Telegram WebApp)
//! - [`Screen`]: the page regions, toasts and the price prompt
//!
//! This module has no native-only dependencies and compiles for
//! `wasm32-unknown-unknown`.

pub mod api;
pub mod controller;
pub mod error;
pub mod filter;
pub mod format;
pub mod host;
pub mod render;
pub mod screen;
pub mod transport;

pub use api::{Ack, GameClient, MatchReport};
pub use controller::ViewController;
pub use error::{ClientError, ClientResult};
pub use filter::{filter_cards, parse_sell_price};
pub use format::{daily_label, daily_remaining, fmt_hms};
pub use host::{resolve_user_id, HostPlatform, PaymentStatus, Standalone};
pub use render::{render_leaderboard, render_market, render_my_players};
pub use screen::{Region, Screen};
pub use transport::Transport;

#[cfg(feature = "native")]
pub use transport::HttpTransport;
