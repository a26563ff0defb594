//! Core types: user, chat, message, parsed command, and reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A single incoming message. `user` is None when the transport supplies no
/// sender (e.g. channel posts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: Option<User>,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A parsed chat command: `/name arg...` with at most one argument kept
/// (the first whitespace-separated token after the command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub arg: Option<String>,
}

impl Command {
    /// Parses a command out of message text.
    ///
    /// Returns None for non-command texts and for commands addressed to a
    /// different bot (`/name@OtherBot`). The `@botname` suffix comparison is
    /// case-insensitive; when `bot_username` is unknown, suffixed commands
    /// are not matched at all.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Command> {
        let rest = text.trim().strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let head = parts.next()?;

        let (name, target) = match head.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }
        if let Some(target) = target {
            match bot_username {
                Some(me) if me.eq_ignore_ascii_case(target) => {}
                _ => return None,
            }
        }

        Some(Command {
            name: name.to_string(),
            arg: parts.next().map(|s| s.to_string()),
        })
    }
}

/// How a reply body should be rendered by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    /// Send the text as-is, no parse mode.
    Plain,
    /// Escape for MarkdownV2 and wrap in a fenced code block.
    Code,
}

/// An outgoing reply body plus its rendering mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: ReplyFormat,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Code,
        }
    }
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_command() {
        let cmd = Command::parse("/start", None).unwrap();
        assert_eq!(cmd.name, "start");
        assert_eq!(cmd.arg, None);
    }

    #[test]
    fn test_parse_command_with_argument() {
        let cmd = Command::parse("/stats alice", Some("wgstatbot")).unwrap();
        assert_eq!(cmd.name, "stats");
        assert_eq!(cmd.arg.as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_keeps_only_first_argument_token() {
        let cmd = Command::parse("/stats alice bob", None).unwrap();
        assert_eq!(cmd.arg.as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_strips_own_bot_suffix_case_insensitive() {
        let cmd = Command::parse("/stats@WgStatBot alice", Some("wgstatbot")).unwrap();
        assert_eq!(cmd.name, "stats");
        assert_eq!(cmd.arg.as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_rejects_foreign_bot_suffix() {
        assert!(Command::parse("/stats@otherbot", Some("wgstatbot")).is_none());
    }

    #[test]
    fn test_parse_rejects_suffix_when_username_unknown() {
        assert!(Command::parse("/stats@wgstatbot", None).is_none());
    }

    #[test]
    fn test_parse_rejects_non_commands() {
        assert!(Command::parse("hello", None).is_none());
        assert!(Command::parse("", None).is_none());
        assert!(Command::parse("/", None).is_none());
        assert!(Command::parse("/@wgstatbot", Some("wgstatbot")).is_none());
    }
}
