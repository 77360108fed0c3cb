use thiserror::Error;
use wear_action::ActionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("heuristic table: {0}")]
    Heuristic(#[from] ActionError),
}

pub type EngineResult<T> = Result<T, EngineError>;
