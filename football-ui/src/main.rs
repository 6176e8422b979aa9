//! Football Stars Mini App
//!
//! Browser shell for the card game, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application. All game
//! behavior lives in `football_stars::client::ViewController`; this crate
//! only supplies the three things it needs from the browser:
//!
//! - [`transport::GlooTransport`]: `gloo-net` requests to the backend
//! - [`telegram::TelegramHost`]: `window.Telegram.WebApp`, when present
//! - [`state::GameScreen`]: signal-backed page regions, toast and prompt

use leptos::*;

mod app;
mod components;
mod state;
mod telegram;
mod transport;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
