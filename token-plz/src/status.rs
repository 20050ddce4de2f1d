use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt,
    str::FromStr,
    sync::{Arc, PoisonError, RwLock},
};

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace, warn};

use crate::{
    abnf::{CRLF, SP},
    error::InvalidStatusCode,
    version::ProtocolVersion,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusClass {
    // Leading digit
    pub fn from_code(code: u16) -> Self {
        match code / 100 {
            1 => StatusClass::Informational,
            2 => StatusClass::Success,
            3 => StatusClass::Redirection,
            4 => StatusClass::ClientError,
            5 => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }
}

/// Status-Code of a response.
///
/// Every code is interned, [`StatusCode::lookup`] returns the same [`Arc`]
/// for equal codes. Codes outside 100-599 are not an error, they are
/// [`StatusClass::Unknown`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StatusCode {
    code: u16,
    class: StatusClass,
}

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<u16, Arc<StatusCode>>> =
        RwLock::new(HashMap::new());
}

impl StatusCode {
    fn new(code: u16) -> Self {
        let class = StatusClass::from_code(code);
        if class == StatusClass::Unknown {
            debug!("status| unknown| {code}");
        }
        StatusCode { code, class }
    }

    /* Steps:
     *      1. Shared lock, return cached entry if present.
     *      2. Exclusive lock, insert unless another thread won the race.
     *
     * Entries are never mutated after insertion so a poisoned lock still
     * holds a valid map.
     */
    pub fn lookup(code: u16) -> Arc<StatusCode> {
        let cached = REGISTRY
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&code)
            .cloned();
        if let Some(status) = cached {
            return status;
        }
        let mut registry =
            REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
        let status = registry.entry(code).or_insert_with(|| {
            trace!("status| interned| {code}");
            Arc::new(StatusCode::new(code))
        });
        Arc::clone(status)
    }

    pub fn lookup_str(
        token: &str,
    ) -> Result<Arc<StatusCode>, InvalidStatusCode> {
        parse_code(token).map(StatusCode::lookup)
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn class(&self) -> StatusClass {
        self.class
    }

    pub fn is_informational(&self) -> bool {
        self.class == StatusClass::Informational
    }

    pub fn is_success(&self) -> bool {
        self.class == StatusClass::Success
    }

    pub fn is_redirection(&self) -> bool {
        self.class == StatusClass::Redirection
    }

    pub fn is_client_error(&self) -> bool {
        self.class == StatusClass::ClientError
    }

    pub fn is_server_error(&self) -> bool {
        self.class == StatusClass::ServerError
    }

    pub fn is_error(&self) -> bool {
        self.is_client_error() || self.is_server_error()
    }

    pub fn is_unknown(&self) -> bool {
        self.class == StatusClass::Unknown
    }

    // https://www.iana.org/assignments/http-status-codes/http-status-codes.xhtml
    pub fn default_reason_phrase(&self) -> &'static str {
        match self.code {
            100 => "Continue",
            101 => "Switching Protocols",
            102 => "Processing",
            103 => "Early Hints",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            203 => "Non-Authoritative Information",
            204 => "No Content",
            205 => "Reset Content",
            206 => "Partial Content",
            207 => "Multi-Status",
            208 => "Already Reported",
            226 => "IM Used",
            300 => "Multiple Choices",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            305 => "Use Proxy",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            407 => "Proxy Authentication Required",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            411 => "Length Required",
            412 => "Precondition Failed",
            413 => "Content Too Large",
            414 => "URI Too Long",
            415 => "Unsupported Media Type",
            416 => "Range Not Satisfiable",
            417 => "Expectation Failed",
            421 => "Misdirected Request",
            422 => "Unprocessable Content",
            423 => "Locked",
            424 => "Failed Dependency",
            425 => "Too Early",
            426 => "Upgrade Required",
            428 => "Precondition Required",
            429 => "Too Many Requests",
            431 => "Request Header Fields Too Large",
            451 => "Unavailable For Legal Reasons",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            505 => "HTTP Version Not Supported",
            506 => "Variant Also Negotiates",
            507 => "Insufficient Storage",
            508 => "Loop Detected",
            510 => "Not Extended",
            511 => "Network Authentication Required",
            _ => "",
        }
    }
}

// 1*DIGIT, surrounding whitespace ignored
fn parse_code(token: &str) -> Result<u16, InvalidStatusCode> {
    let token = token.trim();
    if token.is_empty() {
        return Err(InvalidStatusCode::Empty);
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        warn!("status| not numeric| {token}");
        return Err(InvalidStatusCode::NotNumeric(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| InvalidStatusCode::NotNumeric(token.to_string()))
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl Ord for StatusCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl PartialOrd for StatusCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<u16> for StatusCode {
    fn eq(&self, other: &u16) -> bool {
        self.code == *other
    }
}

impl PartialOrd<u16> for StatusCode {
    fn partial_cmp(&self, other: &u16) -> Option<Ordering> {
        self.code.partial_cmp(other)
    }
}

impl PartialEq<str> for StatusCode {
    fn eq(&self, other: &str) -> bool {
        parse_code(other).is_ok_and(|code| code == self.code)
    }
}

impl PartialEq<&str> for StatusCode {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl From<&StatusCode> for u16 {
    fn from(status: &StatusCode) -> u16 {
        status.code
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code)
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let code = u16::deserialize(deserializer)?;
        Ok(Arc::unwrap_or_clone(StatusCode::lookup(code)))
    }
}

/// Status code with an optional explicit reason phrase, as found after the
/// version in a status line i.e. "404 Missing File".
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusLine {
    status: Arc<StatusCode>,
    reason: Option<String>,
}

impl StatusLine {
    /* Steps:
     *      1. "<3 DIGIT><SP><reason>" => code + explicit reason, trailing
     *         CRLF is not part of the reason.
     *      2. Else entire input is a status code token.
     *
     * Error:
     *      InvalidStatusCode   [2]
     */
    pub fn parse(input: &str) -> Result<Self, InvalidStatusCode> {
        let input = input.strip_suffix(CRLF).unwrap_or(input);
        if let Some((code, reason)) = split_code_reason(input) {
            return Ok(StatusLine {
                status: StatusCode::lookup_str(code)?,
                reason: Some(reason.to_string()),
            });
        }
        Ok(StatusLine {
            status: StatusCode::lookup_str(input)?,
            reason: None,
        })
    }

    pub fn status(&self) -> &Arc<StatusCode> {
        &self.status
    }

    pub fn code(&self) -> u16 {
        self.status.code()
    }

    // Explicit reason if set, else the default for the code
    pub fn reason_phrase(&self) -> &str {
        match &self.reason {
            Some(reason) => reason,
            None => self.status.default_reason_phrase(),
        }
    }

    pub fn set_reason_phrase(&mut self, reason: impl Into<String>) {
        self.reason = Some(reason.into());
    }

    pub fn to_status_line(&self, version: &ProtocolVersion) -> String {
        format!("{}{}{}", version.for_response_line(), self, CRLF)
    }
}

fn split_code_reason(input: &str) -> Option<(&str, &str)> {
    let (code, reason) = input.split_once(SP)?;
    let is_three_digits =
        code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit());
    // reason is a single line
    if is_three_digits && !reason.contains('\n') {
        Some((code, reason))
    } else {
        None
    }
}

impl From<u16> for StatusLine {
    fn from(code: u16) -> Self {
        StatusLine {
            status: StatusCode::lookup(code),
            reason: None,
        }
    }
}

impl FromStr for StatusLine {
    type Err = InvalidStatusCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusLine::parse(s)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.status, SP, self.reason_phrase())
    }
}
