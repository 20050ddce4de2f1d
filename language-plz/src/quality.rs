use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::LanguageError;

// qvalue in [0, 1]
#[derive(Clone, Copy, Debug)]
pub struct Quality(f64);

impl Quality {
    pub const ONE: Quality = Quality(1.0);
    pub const ZERO: Quality = Quality(0.0);

    pub fn new(value: f64) -> Result<Self, LanguageError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(LanguageError::InvalidQuality(value.to_string()));
        }
        // -0.0 => 0.0 to keep Ord and PartialEq in agreement
        Ok(Quality(value + 0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_one(&self) -> bool {
        self.0 == 1.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::ONE
    }
}

impl FromStr for Quality {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| LanguageError::InvalidQuality(s.to_string()))?;
        Quality::new(value)
    }
}

impl TryFrom<f64> for Quality {
    type Error = LanguageError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Quality {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Quality {}

impl Ord for Quality {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Quality {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Quality {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialEq<f64> for Quality {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl Serialize for Quality {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Quality {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Quality::new(value).map_err(de::Error::custom)
    }
}
