//! Stats provider: runs the external wgstat script and shapes its output
//! into a reply body. The script's output is opaque text; only the exit
//! status and which streams are non-empty drive the wording.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, warn};

/// Bound on one wgstat invocation; expiry kills the child.
pub const DEFAULT_STATS_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of peer statistics text. The router depends on this seam so tests
/// can substitute a fake and observe invocations.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Collects statistics for one peer, or for all peers when `peer` is None.
    /// Always returns reply-ready text; failures are reported in the text itself.
    async fn collect(&self, peer: Option<&str>) -> String;
}

/// Runs `<WGSTAT_CMD> stats [peer]` as a subprocess with the current
/// environment, capturing stdout and stderr.
pub struct WgstatProvider {
    command: String,
    timeout: Duration,
}

impl WgstatProvider {
    pub fn new(command: String) -> Self {
        Self {
            command,
            timeout: DEFAULT_STATS_TIMEOUT,
        }
    }

    pub fn with_timeout(command: String, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    /// Tokenizes the configured command line (shell quoting respected) and
    /// appends the literal `stats` token, then the peer name if any.
    fn build_args(&self, peer: Option<&str>) -> Result<Vec<String>, shell_words::ParseError> {
        let mut argv = shell_words::split(&self.command)?;
        argv.push("stats".to_string());
        if let Some(peer) = peer {
            argv.push(peer.to_string());
        }
        Ok(argv)
    }
}

#[async_trait]
impl StatsSource for WgstatProvider {
    async fn collect(&self, peer: Option<&str>) -> String {
        let argv = match self.build_args(peer) {
            Ok(argv) => argv,
            Err(e) => {
                error!(command = %self.command, error = %e, "WGSTAT_CMD is not a valid command line");
                return format!("Некорректный WGSTAT_CMD: {}", e);
            }
        };

        debug!(command = %shell_words::join(argv.iter().map(String::as_str)), "Executing command");

        let child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(command = %argv[0], error = %e, "wgstat script not found");
                return "wgstat.sh не найден. Укажи путь в переменной WGSTAT_CMD.".to_string();
            }
            Err(e) => {
                error!(command = %argv[0], error = %e, "Failed to spawn wgstat");
                return format!("Не удалось запустить wgstat: {}", e);
            }
        };

        // Dropping the timed-out future drops the child; kill_on_drop reaps it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!(error = %e, "wgstat process failed");
                return format!("Не удалось запустить wgstat: {}", e);
            }
            Err(_) => {
                error!(timeout_secs = self.timeout.as_secs(), "wgstat timed out");
                return format!(
                    "Ошибка запуска wgstat: превышено время ожидания ({} с), процесс остановлен.",
                    self.timeout.as_secs()
                );
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            error!(code = %code, stderr = %stderr, "wgstat returned non-zero");
            if !stderr.is_empty() {
                return format!("Ошибка запуска wgstat (код {}):\n{}", code, stderr);
            }
            return format!("wgstat завершился с кодом {} без вывода ошибок.", code);
        }

        if !stdout.is_empty() {
            return stdout;
        }

        if !stderr.is_empty() {
            warn!("wgstat returned only stderr");
            return format!("wgstat не вывел данные, stderr:\n{}", stderr);
        }

        "wgstat не вернул данных. Проверь запущен ли интерфейс и есть ли пиры.".to_string()
    }
}
