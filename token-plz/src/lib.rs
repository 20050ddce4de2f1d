pub mod abnf;
mod bytes_str;
pub mod error;
pub mod methods;
pub mod status;
pub mod version;

pub use bytes_str::BytesStr;
pub use error::{InvalidStatusCode, InvalidVersion, TokenError};
pub use methods::{Entities, Entity, Method, MethodOptions};
pub use status::{StatusClass, StatusCode, StatusLine};
pub use version::ProtocolVersion;
