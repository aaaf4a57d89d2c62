//! Error types for roster-engine operations.
//!
//! These cover malformed *input* only. A validation that completes with a
//! reject verdict is `Ok` — rejections are data, not errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Invalid time string: {0}")]
    InvalidTime(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid day name: {0}")]
    InvalidDay(String),

    #[error("Invalid room type: {0}")]
    InvalidRoomType(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
