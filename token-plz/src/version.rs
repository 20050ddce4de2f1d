use std::{
    cmp::Ordering,
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::abnf::{CRLF, DOT, HTTP_PREFIX, SP};
use crate::error::InvalidVersion;

pub const HTTP_1_0: &str = "HTTP/1.0";
pub const HTTP_1_1: &str = "HTTP/1.1";

/// HTTP-Version = "HTTP" "/" 1*DIGIT "." 1*DIGIT
///
/// Input that does not fit the grammar is kept as `HTTP/<input>` with
/// major and minor 0. Equality, ordering and hashing all go through
/// [`ProtocolVersion::as_f64`], so `HTTP/1.10` and `HTTP/1.1` are the same
/// version.
#[derive(Clone, Debug)]
pub struct ProtocolVersion {
    major: u32,
    minor: u32,
    // rendered text when input did not fit major.minor
    raw: Option<Box<str>>,
}

impl ProtocolVersion {
    pub const ONE_POINT_OH: ProtocolVersion = ProtocolVersion::new(1, 0);
    pub const ONE_POINT_ONE: ProtocolVersion = ProtocolVersion::new(1, 1);

    pub const fn new(major: u32, minor: u32) -> Self {
        ProtocolVersion {
            major,
            minor,
            raw: None,
        }
    }

    /* Steps:
     *      1. If input is "HTTP/" DIGITS "." DIGITS, use it as is.
     *      2. Else render it as "HTTP/<input>" and check again, so a bare
     *         "1.1" becomes "HTTP/1.1".
     *      3. Anything still not matching (or overflowing u32) is kept as
     *         rendered text with major and minor 0.
     */
    pub fn parse(input: &str) -> Self {
        if let Some(version) = from_text(input) {
            return version;
        }
        let rendered = format!("{HTTP_PREFIX}{input}");
        if let Some(version) = from_text(&rendered) {
            return version;
        }
        // digits overflowing u32 keep the input text
        let text = match split_digits(input) {
            Some(_) => input.to_string(),
            None => rendered,
        };
        debug!("version| coerced| {text}");
        ProtocolVersion {
            major: 0,
            minor: 0,
            raw: Some(text.into_boxed_str()),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    // true when input did not fit the grammar and was kept as text
    pub fn is_coerced(&self) -> bool {
        self.raw.is_some()
    }

    // Digit concatenation, HTTP/1.15 => 1.15 and not 1.015. Text that does
    // not fit the grammar is 0.0.
    pub fn as_f64(&self) -> f64 {
        let concat = match &self.raw {
            Some(raw) => match split_digits(raw) {
                Some((major, minor)) => format!("{major}{DOT}{minor}"),
                None => return 0.0,
            },
            None => format!("{}{}{}", self.major, DOT, self.minor),
        };
        concat.parse().unwrap_or(0.0)
    }

    pub fn for_request_line(&self) -> String {
        format!("{SP}{self}{CRLF}")
    }

    pub fn for_response_line(&self) -> String {
        format!("{self}{SP}")
    }
}

fn from_text(input: &str) -> Option<ProtocolVersion> {
    let (major, minor) = split_digits(input)?;
    Some(ProtocolVersion::new(major.parse().ok()?, minor.parse().ok()?))
}

// "HTTP/" 1*DIGIT "." 1*DIGIT => (major, minor) digits
fn split_digits(input: &str) -> Option<(&str, &str)> {
    let (major, minor) = input.strip_prefix(HTTP_PREFIX)?.split_once(DOT)?;
    (is_digits(major) && is_digits(minor)).then_some((major, minor))
}

fn is_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        ProtocolVersion::ONE_POINT_ONE
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.write_str(raw),
            None => {
                write!(f, "{}{}{}{}", HTTP_PREFIX, self.major, DOT, self.minor)
            }
        }
    }
}

impl FromStr for ProtocolVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProtocolVersion::parse(s))
    }
}

impl From<&str> for ProtocolVersion {
    fn from(value: &str) -> Self {
        ProtocolVersion::parse(value)
    }
}

// 1.1 => "HTTP/1.1", 2.0 => "HTTP/2.0"
impl TryFrom<f64> for ProtocolVersion {
    type Error = InvalidVersion;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            warn!("version| not finite| {value}");
            return Err(InvalidVersion::NotFinite(value));
        }
        if value < 0.0 {
            warn!("version| negative| {value}");
            return Err(InvalidVersion::Negative(value));
        }
        // Debug keeps the fraction for integral values, -0.0 => 0.0
        Ok(ProtocolVersion::parse(&format!("{:?}", value + 0.0)))
    }
}

impl Ord for ProtocolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_f64().total_cmp(&other.as_f64())
    }
}

impl PartialOrd for ProtocolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ProtocolVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ProtocolVersion {}

impl Hash for ProtocolVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_f64().to_bits().hash(state);
    }
}

impl PartialEq<f64> for ProtocolVersion {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == *other
    }
}

impl PartialOrd<f64> for ProtocolVersion {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.as_f64().partial_cmp(other)
    }
}

impl Serialize for ProtocolVersion {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProtocolVersion {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProtocolVersion::parse(&raw))
    }
}
