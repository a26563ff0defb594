//! REPL runner: wires teloxide updates to the command router. Transport,
//! long polling, and retry/backoff are owned entirely by teloxide.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, error, info};
use wgstat_core::{init_tracing, Bot as CoreBot, TelegramBot, ToCoreMessage};

use crate::adapters::TelegramMessageWrapper;
use crate::config::BotConfig;
use crate::router::CommandRouter;
use crate::stats::WgstatProvider;

/// Main entry: validate config, init logging, resolve the bot username for
/// `/cmd@bot` addressing, then run the teloxide REPL until shutdown.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(dir) = std::path::Path::new(&config.log_file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    init_tracing(&config.log_file)?;

    let bot = {
        let bot = Bot::new(config.bot_token.clone());
        match config.telegram_api_url {
            Some(ref url_str) => bot.set_api_url(reqwest::Url::parse(url_str)?),
            None => bot,
        }
    };

    let bot_username = match bot.get_me().await {
        Ok(me) => me.user.username.clone(),
        Err(e) => {
            error!(error = %e, "get_me failed; commands addressed as /cmd@bot will be ignored");
            None
        }
    };
    if let Some(ref username) = bot_username {
        info!(username = %username, "Bot username resolved");
    }

    let stats = Arc::new(WgstatProvider::new(config.wgstat_cmd.clone()));
    let router = Arc::new(CommandRouter::new(config.admin_id, bot_username, stats));
    let sender = Arc::new(TelegramBot::new(bot.clone()));

    info!(
        admin_id = config.admin_id,
        wgstat_cmd = %config.wgstat_cmd,
        "Bot started. Listening for commands..."
    );

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let router = router.clone();
        let sender = sender.clone();

        async move {
            if msg.text().is_none() {
                return Ok(());
            }
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            debug!(
                user_id = ?core_msg.user.as_ref().map(|u| u.id),
                chat_id = core_msg.chat.id,
                message_content = %core_msg.content,
                "Received message"
            );

            if let Some(reply) = router.handle(&core_msg).await {
                if let Err(e) = sender.send_reply(&core_msg.chat, &reply).await {
                    error!(error = %e, chat_id = core_msg.chat.id, "Failed to send reply");
                }
            }
            Ok(())
        }
    })
    .await;

    Ok(())
}
