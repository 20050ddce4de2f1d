use thiserror::Error;

#[cfg_attr(any(test, debug_assertions), derive(PartialEq))]
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("empty language token")]
    Empty,
    #[error("wildcard is not a language tag")]
    Star,
    #[error("invalid quality| {0}")]
    InvalidQuality(String),
}
