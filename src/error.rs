use std::path::PathBuf;

/// Errors returned by [`GameEngine`](crate::game::GameEngine) operations.
///
/// Every variant is reported before the engine mutates any state, so the
/// engine stays usable after an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("game is over")]
    GameOver,

    #[error("no game has been started")]
    NotStarted,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that end a text client session.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("input closed while waiting for a column")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}
