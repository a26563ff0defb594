//! # wgstat-core
//!
//! Core types and traits for the WireGuard stats bot: [`Bot`], message and
//! command types, reply formatting, and tracing initialization.
//! Transport-agnostic; the teloxide wiring lives in wgstat-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{code_block, Bot, TelegramBot};
pub use error::{Result, WgstatError};
pub use logger::init_tracing;
pub use types::{Chat, Command, Message, Reply, ReplyFormat, ToCoreMessage, ToCoreUser, User};
