//! # wgstat-bot
//!
//! Telegram bot that lets a single configured administrator pull WireGuard
//! peer statistics: commands are routed to handlers, `/stats` shells out to
//! the external wgstat script and relays its output as a code block.

pub mod adapters;
pub mod config;
pub mod router;
pub mod runner;
pub mod stats;

pub use config::BotConfig;
pub use router::CommandRouter;
pub use runner::run_bot;
pub use stats::{StatsSource, WgstatProvider};
