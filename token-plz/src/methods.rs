use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tracing::{debug, warn};

use crate::{bytes_str::BytesStr, error::TokenError};

pub const CONNECT: &[u8] = b"CONNECT";
pub const DELETE: &[u8] = b"DELETE";
pub const GET: &[u8] = b"GET";
pub const HEAD: &[u8] = b"HEAD";
pub const OPTIONS: &[u8] = b"OPTIONS";
pub const PATCH: &[u8] = b"PATCH";
pub const POST: &[u8] = b"POST";
pub const PUT: &[u8] = b"PUT";
pub const TRACE: &[u8] = b"TRACE";

// Message that may carry an entity body
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Entity {
    Request,
    Response,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Entities {
    request: bool,
    response: bool,
}

impl Entities {
    pub const NONE: Entities = Entities::new(false, false);
    pub const REQUEST: Entities = Entities::new(true, false);
    pub const RESPONSE: Entities = Entities::new(false, true);
    pub const BOTH: Entities = Entities::new(true, true);

    const fn new(request: bool, response: bool) -> Self {
        Entities { request, response }
    }

    pub const fn contains(&self, entity: Entity) -> bool {
        match entity {
            Entity::Request => self.request,
            Entity::Response => self.response,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.request && !self.response
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + use<> {
        let entities = *self;
        [Entity::Request, Entity::Response]
            .into_iter()
            .filter(move |entity| entities.contains(*entity))
    }
}

impl From<&[Entity]> for Entities {
    fn from(entities: &[Entity]) -> Self {
        Entities::new(
            entities.contains(&Entity::Request),
            entities.contains(&Entity::Response),
        )
    }
}

// Settings for a method that is not well known.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MethodOptions {
    pub safe: bool,
    pub idempotent: bool,
    pub entities: Entities,
}

impl Default for MethodOptions {
    fn default() -> Self {
        MethodOptions {
            safe: false,
            idempotent: false,
            entities: Entities::BOTH,
        }
    }
}

/// Request method token.
///
/// Well known methods (RFC 2616 and PATCH from RFC 5789) are created once and
/// shared, [`Method::lookup`] hands out the same [`Arc`] for every call.
/// Every other name is a new method each time. A safe method is always
/// idempotent.
///
/// Two methods are equal when their names are equal (case-sensitive).
#[derive(Clone, Debug)]
pub struct Method {
    name: BytesStr,
    safe: bool,
    idempotent: bool,
    entities: Entities,
}

lazy_static! {
    static ref WELL_KNOWN: [Arc<Method>; 9] = [
        Method::well_known("OPTIONS", true, true, Entities::RESPONSE),
        Method::well_known("GET", true, true, Entities::RESPONSE),
        Method::well_known("HEAD", true, true, Entities::NONE),
        Method::well_known("POST", false, false, Entities::BOTH),
        Method::well_known("PUT", false, true, Entities::BOTH),
        Method::well_known("DELETE", false, true, Entities::RESPONSE),
        Method::well_known("TRACE", true, true, Entities::RESPONSE),
        Method::well_known("CONNECT", false, false, Entities::BOTH),
        Method::well_known("PATCH", false, false, Entities::BOTH),
    ];
}

// Index into WELL_KNOWN
fn well_known_index(src: &[u8]) -> Option<usize> {
    let index = match src.len() {
        3 => match src {
            GET => 1,
            PUT => 4,
            _ => return None,
        },
        4 => match src {
            HEAD => 2,
            POST => 3,
            _ => return None,
        },
        5 => match src {
            TRACE => 6,
            PATCH => 8,
            _ => return None,
        },
        6 => match src {
            DELETE => 5,
            _ => return None,
        },
        7 => match src {
            OPTIONS => 0,
            CONNECT => 7,
            _ => return None,
        },
        _ => return None,
    };
    Some(index)
}

impl Method {
    fn new(name: BytesStr, options: MethodOptions) -> Self {
        Method {
            name,
            safe: options.safe,
            idempotent: options.safe || options.idempotent,
            entities: options.entities,
        }
    }

    fn well_known(
        name: &'static str,
        safe: bool,
        idempotent: bool,
        entities: Entities,
    ) -> Arc<Method> {
        let options = MethodOptions {
            safe,
            idempotent,
            entities,
        };
        Arc::new(Method::new(BytesStr::from_static(name), options))
    }

    pub fn lookup(name: &str) -> Result<Arc<Method>, TokenError> {
        Method::with_options(name, MethodOptions::default())
    }

    /* Steps:
     *      1. If name is well known, return the shared instance, options
     *         are ignored.
     *      2. Else build a new method from options.
     *
     * Error:
     *      TokenError::InvalidArgument     empty name
     */
    pub fn with_options(
        name: &str,
        options: MethodOptions,
    ) -> Result<Arc<Method>, TokenError> {
        if let Some(index) = well_known_index(name.as_bytes()) {
            return Ok(Arc::clone(&WELL_KNOWN[index]));
        }
        Method::custom(BytesStr::from(name), options)
    }

    // Method as read from a request line
    pub fn from_bytes(src: &[u8]) -> Result<Arc<Method>, TokenError> {
        if let Some(index) = well_known_index(src) {
            return Ok(Arc::clone(&WELL_KNOWN[index]));
        }
        Method::custom(BytesStr::try_from(src)?, MethodOptions::default())
    }

    fn custom(
        name: BytesStr,
        options: MethodOptions,
    ) -> Result<Arc<Method>, TokenError> {
        if name.is_empty() {
            warn!("method| empty name");
            return Err(TokenError::InvalidArgument(
                "empty method name".to_string(),
            ));
        }
        debug!("method| custom| {name}");
        Ok(Arc::new(Method::new(name, options)))
    }

    pub fn all_well_known() -> impl Iterator<Item = &'static Arc<Method>> {
        WELL_KNOWN.iter()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    pub fn is_idempotent(&self) -> bool {
        self.idempotent
    }

    pub fn entities(&self) -> Entities {
        self.entities
    }

    pub fn allows(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    pub fn is_well_known(&self) -> bool {
        well_known_index(self.name.as_bytes()).is_some()
    }
}

impl AsRef<[u8]> for Method {
    fn as_ref(&self) -> &[u8] {
        self.name.as_bytes()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Method) -> bool {
        self.name == other.name
    }
}

impl Eq for Method {}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialEq<str> for Method {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}

impl PartialEq<&str> for Method {
    fn eq(&self, other: &&str) -> bool {
        self.name() == *other
    }
}

impl PartialEq<Method> for str {
    fn eq(&self, other: &Method) -> bool {
        other == self
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Method::lookup(&raw)
            .map(Arc::unwrap_or_clone)
            .map_err(de::Error::custom)
    }
}
