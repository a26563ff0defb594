//! Bot abstraction for sending replies.
//!
//! [`Bot`] trait is transport-agnostic; [`TelegramBot`] implements it via teloxide.

use crate::error::{Result, WgstatError};
use crate::types::{Chat, Reply, ReplyFormat};
use async_trait::async_trait;
use teloxide::{prelude::*, types::ChatId, types::ParseMode};

/// Abstraction for sending a reply to a chat. Implementations map to a
/// transport (e.g. Telegram); tests can substitute another impl.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply to the given chat, rendered per its [`ReplyFormat`].
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()>;
}

/// Renders text as a MarkdownV2 fenced code block, escaping the body first.
pub fn code_block(text: &str) -> String {
    format!("```\n{}\n```", teloxide::utils::markdown::escape(text))
}

/// Teloxide-based implementation of [`Bot`].
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Wraps an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl Bot for TelegramBot {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        match reply.format {
            ReplyFormat::Plain => {
                self.bot
                    .send_message(ChatId(chat.id), reply.text.clone())
                    .await
                    .map_err(|e| WgstatError::Bot(e.to_string()))?;
            }
            ReplyFormat::Code => {
                self.bot
                    .send_message(ChatId(chat.id), code_block(&reply.text))
                    .parse_mode(ParseMode::MarkdownV2)
                    .await
                    .map_err(|e| WgstatError::Bot(e.to_string()))?;
            }
        }
        Ok(())
    }
}
