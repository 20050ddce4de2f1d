use std::str::Utf8Error;

use thiserror::Error;

#[cfg_attr(any(test, debug_assertions), derive(PartialEq))]
#[derive(Debug, Error)]
pub enum InvalidVersion {
    #[error("not finite| {0}")]
    NotFinite(f64),
    #[error("negative| {0}")]
    Negative(f64),
}

#[cfg_attr(any(test, debug_assertions), derive(PartialEq))]
#[derive(Debug, Error)]
pub enum InvalidStatusCode {
    #[error("empty status code")]
    Empty,
    #[error("not numeric| {0}")]
    NotNumeric(String),
}

#[cfg_attr(any(test, debug_assertions), derive(PartialEq))]
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("utf8| {0}")]
    Utf8(#[from] Utf8Error),
    #[error("invalid argument| {0}")]
    InvalidArgument(String),
}
