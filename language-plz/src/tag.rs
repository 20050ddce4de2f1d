use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{
    abnf::{HYPHEN, STAR},
    error::LanguageError,
};

/// Language-Tag = primary-tag *( "-" subtag )
///
/// Only split on "-", segments keep the case they were given in.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LanguageTag {
    primary_tag: String,
    subtags: Vec<String>,
}

impl LanguageTag {
    pub fn parse(input: &str) -> Result<Self, LanguageError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(LanguageError::Empty);
        }
        if input == STAR {
            return Err(LanguageError::Star);
        }
        let (primary_tag, subtags) = split_tag(input);
        Ok(LanguageTag {
            primary_tag,
            subtags,
        })
    }

    pub fn primary_tag(&self) -> &str {
        &self.primary_tag
    }

    pub fn subtags(&self) -> &[String] {
        &self.subtags
    }
}

// first segment, remaining segments
pub(crate) fn split_tag(input: &str) -> (String, Vec<String>) {
    let mut segments = input.split(HYPHEN).map(str::to_string);
    let primary_tag = segments.next().unwrap_or_default();
    (primary_tag, segments.collect())
}

impl FromStr for LanguageTag {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageTag::parse(s)
    }
}

impl TryFrom<&str> for LanguageTag {
    type Error = LanguageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        LanguageTag::parse(value)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary_tag)?;
        for subtag in &self.subtags {
            write!(f, "{HYPHEN}{subtag}")?;
        }
        Ok(())
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LanguageTag::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_primary_only() {
        let tag = LanguageTag::parse("en").unwrap();
        assert_eq!(tag.primary_tag(), "en");
        assert!(tag.subtags().is_empty());
    }

    #[test]
    fn test_tag_subtags_in_order() {
        let tag = LanguageTag::parse("x-pig-latin").unwrap();
        assert_eq!(tag.primary_tag(), "x");
        assert_eq!(tag.subtags(), ["pig", "latin"]);
        assert_eq!(tag.to_string(), "x-pig-latin");
    }

    #[test]
    fn test_tag_preserves_case() {
        let tag: LanguageTag = "en-US".parse().unwrap();
        assert_eq!(tag.subtags(), ["US"]);
        assert_eq!(tag.to_string(), "en-US");
        assert_ne!(tag, LanguageTag::parse("en-us").unwrap());
    }

    #[test]
    fn test_tag_invalid() {
        assert_eq!(LanguageTag::parse(""), Err(LanguageError::Empty));
        assert_eq!(LanguageTag::parse("  "), Err(LanguageError::Empty));
        assert_eq!(LanguageTag::parse("*"), Err(LanguageError::Star));
    }

    #[test]
    fn test_tag_serde() {
        let tag = LanguageTag::parse("en-gb").unwrap();
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#""en-gb""#);
        let verify: LanguageTag = serde_json::from_str(&json).unwrap();
        assert_eq!(verify, tag);
        assert!(serde_json::from_str::<LanguageTag>(r#""*""#).is_err());
    }
}
