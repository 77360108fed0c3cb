use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("heuristic table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ActionResult<T> = Result<T, ActionError>;
