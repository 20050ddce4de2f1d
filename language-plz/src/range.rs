use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tracing::warn;

use crate::{
    abnf::{COMMA, SEMICOLON, STAR},
    error::LanguageError,
    quality::Quality,
    tag::{LanguageTag, split_tag},
};

/// Weighted language range from an Accept-Language header,
/// `range [ OWS ";" OWS "q=" qvalue ]`.
///
/// ```
/// use language_plz::{LanguageRange, LanguageTag};
///
/// let range = LanguageRange::parse("en;q=0.5").unwrap();
/// assert!(range.includes(&LanguageTag::parse("en-us").unwrap()));
/// assert_eq!(range.to_string(), "en; q=0.5");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageRange {
    range: String,
    primary_tag: String,
    subtags: Vec<String>,
    quality: Quality,
}

impl LanguageRange {
    /* Steps:
     *      1. Split at first ";". Remainder must be "q" OWS "=" qvalue.
     *      2. Trimmed range must not be empty.
     *      3. "*" has primary tag "*" and no subtags, else split on "-".
     *
     * Error:
     *      LanguageError::InvalidQuality   [1]
     *      LanguageError::Empty            [2]
     */
    pub fn parse(input: &str) -> Result<Self, LanguageError> {
        let (range, quality) = match input.split_once(SEMICOLON) {
            Some((range, params)) => (range, parse_q_param(params)?),
            None => (input, Quality::ONE),
        };
        let range = range.trim();
        if range.is_empty() {
            return Err(LanguageError::Empty);
        }
        let (primary_tag, subtags) = if range == STAR {
            (STAR.to_string(), Vec::new())
        } else {
            split_tag(range)
        };
        Ok(LanguageRange {
            range: range.to_string(),
            primary_tag,
            subtags,
            quality,
        })
    }

    // Accept-Language value, members in header order
    pub fn iter_from_str(
        val: &str,
    ) -> impl Iterator<Item = Result<LanguageRange, LanguageError>> {
        val.split(COMMA)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(LanguageRange::parse)
    }

    pub fn parse_list(val: &str) -> Result<Vec<LanguageRange>, LanguageError> {
        LanguageRange::iter_from_str(val).collect()
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    pub fn is_star(&self) -> bool {
        self.range == STAR
    }

    pub fn primary_tag(&self) -> &str {
        &self.primary_tag
    }

    pub fn subtags(&self) -> &[String] {
        &self.subtags
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn set_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    /* Steps:
     *      1. "*" includes every tag.
     *      2. Primary tags must be equal (case-sensitive).
     *      3. Range subtags must be a prefix of the tag subtags, extra
     *         trailing subtags on the tag are allowed.
     */
    pub fn includes(&self, tag: &LanguageTag) -> bool {
        if self.is_star() {
            return true;
        }
        self.primary_tag == tag.primary_tag()
            && tag.subtags().starts_with(&self.subtags)
    }

    // Specificity used to pick between several ranges that include the same
    // tag. "*" => 0, primary tag => 2, each subtag adds 3.
    pub fn precedence(&self) -> usize {
        if self.is_star() {
            0
        } else {
            2 + 3 * self.subtags.len()
        }
    }
}

fn parse_q_param(params: &str) -> Result<Quality, LanguageError> {
    let value = params
        .trim_start()
        .strip_prefix(|c: char| c.eq_ignore_ascii_case(&'q'))
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='));
    match value {
        Some(value) => value.parse(),
        None => {
            warn!("language range| param| {params}");
            Err(LanguageError::InvalidQuality(params.trim().to_string()))
        }
    }
}

impl FromStr for LanguageRange {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageRange::parse(s)
    }
}

impl TryFrom<&str> for LanguageRange {
    type Error = LanguageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        LanguageRange::parse(value)
    }
}

impl fmt::Display for LanguageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quality.is_one() {
            f.write_str(&self.range)
        } else {
            write!(f, "{}{} q={}", self.range, SEMICOLON, self.quality)
        }
    }
}

impl Serialize for LanguageRange {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LanguageRange {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        LanguageRange::parse(&raw).map_err(de::Error::custom)
    }
}
