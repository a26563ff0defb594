//! Command router: a static mapping from command names to reply handlers.
//! Each handler is a pure request/reply mapping with no cross-call state.

use std::sync::Arc;

use tracing::warn;
use wgstat_core::{Command, Message, Reply};

use crate::stats::StatsSource;

const START_TEXT: &str = "Я показываю статистику WireGuard. \
Введи /stats чтобы увидеть всех пиров или /stats <имя> для конкретного.";

const HELP_TEXT: &str = "Команды:\n \
/stats [peer] — статистика по всем или одному пиру.\n \
/id — узнать свой Telegram ID.\n \
/start — краткая справка.\n \
/help — эта помощь.";

const ACCESS_DENIED: &str = "Доступ запрещен";
const NO_USER_ID: &str = "Не удалось определить ID пользователя.";

/// Routes parsed commands to handlers. Holds the admin allow-list (exactly
/// one id) and the stats source; both fixed at startup.
pub struct CommandRouter {
    admin_id: i64,
    bot_username: Option<String>,
    stats: Arc<dyn StatsSource>,
}

impl CommandRouter {
    pub fn new(admin_id: i64, bot_username: Option<String>, stats: Arc<dyn StatsSource>) -> Self {
        Self {
            admin_id,
            bot_username,
            stats,
        }
    }

    /// Handles one incoming message. Returns None for non-command texts and
    /// for commands this bot does not know.
    pub async fn handle(&self, message: &Message) -> Option<Reply> {
        let command = Command::parse(&message.content, self.bot_username.as_deref())?;
        match command.name.as_str() {
            "start" => Some(Reply::plain(START_TEXT)),
            "help" => Some(Reply::plain(HELP_TEXT)),
            "id" => Some(self.id_reply(message)),
            "stats" => Some(self.stats_reply(message, command.arg.as_deref()).await),
            _ => None,
        }
    }

    fn id_reply(&self, message: &Message) -> Reply {
        match &message.user {
            Some(user) => Reply::plain(format!("Твой Telegram ID: {}", user.id)),
            None => Reply::plain(NO_USER_ID),
        }
    }

    /// Strict allow-list of exactly one id; anyone else is denied before the
    /// stats source is ever invoked.
    async fn stats_reply(&self, message: &Message, peer: Option<&str>) -> Reply {
        let sender = message.user.as_ref();
        if sender.map(|u| u.id) != Some(self.admin_id) {
            let attempted = sender
                .map(|u| u.id.to_string())
                .unwrap_or_else(|| "unknown user".to_string());
            warn!(user_id = %attempted, "Unauthorized access attempt");
            return Reply::plain(ACCESS_DENIED);
        }

        Reply::code(self.stats.collect(peer).await)
    }
}
