use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("icon catalog is empty")]
    EmptyCatalog,
    #[error("at least 3 reels are required, got {count}")]
    TooFewReels { count: usize },
    #[error("icon height must be positive, got {0}")]
    NonPositiveIconHeight(f64),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("expected {expected} reel surfaces, found {found}")]
    ReelCountMismatch { expected: usize, found: usize },
    #[error("wallet is not connected")]
    WalletDisconnected,
    #[error("spin already in progress")]
    SpinInProgress,
}

pub type SlotResult<T> = Result<T, SlotError>;
