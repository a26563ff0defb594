use thiserror::Error;

#[derive(Error, Debug)]
pub enum WgstatError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WgstatError>;
