pub mod abnf;
pub mod error;
pub mod negotiate;
pub mod quality;
pub mod range;
pub mod tag;

pub use error::LanguageError;
pub use negotiate::{Negotiated, Negotiator, best_match, negotiate};
pub use quality::Quality;
pub use range::LanguageRange;
pub use tag::LanguageTag;
