//! Base error type.
//!
//! Sub-crates define their own error enums and convert them into `WearError`
//! via `From` impls where a shared type is convenient.  Runtime operations of
//! the core never fail; these errors come from loading and building only.

use thiserror::Error;

/// The top-level error type for `wear-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WearError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for the `wear-*` crates.
pub type WearResult<T> = Result<T, WearError>;
