use thiserror::Error;

#[derive(Error, Debug)]
pub enum MicroError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Squad already exists: {0}")]
    DuplicateSquad(String),

    #[error("Strategy not found: {0}")]
    StrategyNotFound(String),

    #[error("Strategy '{name}' is malformed: {reason}")]
    MalformedStrategy { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MicroError>;
