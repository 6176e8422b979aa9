//! Football Stars CLI
//!
//! Command-line client for a running Football Stars backend:
//! - Show the profile and the daily countdown
//! - List owned cards, the market and the leaderboard
//! - Claim the daily bonus, open packs, play matches
//! - Sell and buy on the transfer market

use anyhow::bail;
use clap::{Parser, Subcommand};
use std::io::Write;

use football_stars::client::{
    daily_label, filter_cards, parse_sell_price, GameClient, HttpTransport,
};
use football_stars::model::{MatchResult, PlayerCard, GUEST_USER_ID};

#[derive(Parser)]
#[command(name = "football-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play Football Stars from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Telegram user id to act as
    #[arg(long, default_value_t = GUEST_USER_ID, global = true)]
    pub user_id: i64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show coins, cards, team power, rating and the daily countdown
    Profile {
        /// Keep the countdown ticking once per second
        #[arg(short, long)]
        watch: bool,
    },

    /// List your cards
    Players {
        /// Case-insensitive filter on name or position
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List the transfer market
    Market,

    /// Show the leaderboard
    Leaderboard,

    /// Claim the daily bonus
    Daily,

    /// Open a pack (300 coins)
    Pack,

    /// Play a match
    Match,

    /// Put one of your cards on the market
    Sell {
        /// Card id (see `players`)
        player_id: i64,
        /// Price in coins, at least 100
        price: String,
    },

    /// Buy a market listing
    Buy {
        /// Listing id (see `market`)
        market_id: i64,
    },

    /// List real clubs
    Clubs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api = GameClient::new(HttpTransport::new(cli.api_url.clone())?);
    let user = cli.user_id;

    match cli.command {
        Commands::Profile { watch } => {
            let profile = api.profile(user).await?;

            println!("User:        {}", user);
            println!("Coins:       {}", profile.coins);
            println!("Cards:       {}", profile.cards_count);
            println!("Team power:  {}", profile.team_power);
            println!("Rating:      {}", profile.rating);
            println!("Record:      {}W / {}L", profile.wins, profile.losses);

            if watch {
                let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            let now = chrono::Utc::now().timestamp();
                            print!("\r{:<24}", daily_label(profile.last_daily, now));
                            std::io::stdout().flush()?;
                        }
                        _ = tokio::signal::ctrl_c() => {
                            println!();
                            break;
                        }
                    }
                }
            } else {
                let now = chrono::Utc::now().timestamp();
                println!("{}", daily_label(profile.last_daily, now));
            }
        }

        Commands::Players { search } => {
            let cards = filter_cards(api.my_players(user).await?, &search);
            if cards.is_empty() {
                println!("No players yet. Open one with: football-cli pack");
            } else {
                print_cards(&cards);
            }
        }

        Commands::Market => {
            let market = api.market().await?;
            if market.is_empty() {
                println!("The market is empty");
            } else {
                println!(
                    "{:<6} {:<22} {:<5} {:<10} {:>5} {:>8} {:>8}",
                    "ID", "Name", "Pos", "Rarity", "Power", "Price", "Seller"
                );
                println!("{}", "-".repeat(70));
                for listing in market {
                    println!(
                        "{:<6} {:<22} {:<5} {:<10} {:>5} {:>8} {:>8}",
                        listing.id,
                        listing.face.name,
                        listing.face.position,
                        listing.face.rarity,
                        listing.face.power(),
                        listing.price,
                        listing.seller_id
                    );
                }
            }
        }

        Commands::Leaderboard => {
            let leaders = api.leaderboard().await?;
            if leaders.is_empty() {
                println!("The leaderboard is empty");
            } else {
                println!(
                    "{:<4} {:<12} {:>7} {:>5} {:>5} {:>8}",
                    "#", "User", "Rating", "W", "L", "Coins"
                );
                println!("{}", "-".repeat(46));
                for (rank, entry) in leaders.iter().enumerate() {
                    let marker = if entry.user_id == user { " <" } else { "" };
                    println!(
                        "{:<4} {:<12} {:>7} {:>5} {:>5} {:>8}{}",
                        rank + 1,
                        entry.user_id,
                        entry.rating,
                        entry.wins,
                        entry.losses,
                        entry.coins,
                        marker
                    );
                }
            }
        }

        Commands::Daily => {
            let ack = api.claim_daily(user).await?;
            println!("{}", ack.message);
        }

        Commands::Pack => {
            let card = api.open_pack(user).await?;
            println!("New player: {} ({})", card.face.name, card.face.rarity);
            print_cards(&[card]);
        }

        Commands::Match => {
            let report = api.play_match(user).await?;
            match report.result {
                MatchResult::Win => println!(
                    "Victory! +{} coins ({} vs {})",
                    report.reward.unwrap_or(0),
                    report.your,
                    report.enemy
                ),
                MatchResult::Lose => println!("Defeat ({} vs {})", report.your, report.enemy),
            }
        }

        Commands::Sell { player_id, price } => {
            let Some(price) = parse_sell_price(&price) else {
                bail!("Enter a valid price");
            };
            let ack = api.sell_player(user, player_id, price).await?;
            println!("{}", ack.message);
        }

        Commands::Buy { market_id } => {
            let ack = api.buy_player(user, market_id).await?;
            println!("{}", ack.message);
        }

        Commands::Clubs => {
            for club in api.clubs().await? {
                if club.league.is_empty() {
                    println!("{:<4} {}", club.id, club.name);
                } else {
                    println!("{:<4} {} ({})", club.id, club.name, club.league);
                }
            }
        }
    }

    Ok(())
}

fn print_cards(cards: &[PlayerCard]) {
    println!(
        "{:<6} {:<22} {:<5} {:<10} {:>4} {:>4} {:>4} {:>6}",
        "ID", "Name", "Pos", "Rarity", "ATT", "DEF", "SPD", "Power"
    );
    println!("{}", "-".repeat(70));
    for card in cards {
        println!(
            "{:<6} {:<22} {:<5} {:<10} {:>4} {:>4} {:>4} {:>6}",
            card.id,
            card.face.name,
            card.face.position,
            card.face.rarity,
            card.face.attack,
            card.face.defense,
            card.face.speed,
            card.face.power()
        );
    }
}
