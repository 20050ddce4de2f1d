use tracing::trace;

use crate::{
    error::LanguageError, quality::Quality, range::LanguageRange,
    tag::LanguageTag,
};

// Tag chosen by negotiation and the range that decided its quality.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Negotiated<'a> {
    pub tag: &'a LanguageTag,
    pub quality: Quality,
    pub precedence: usize,
    // index into the ranges given to negotiate()
    pub range_index: usize,
}

/* Steps:
 *      1. For every tag find the ranges that include it.
 *      2. Winner is the range with highest precedence, then highest quality,
 *         first seen on a full tie. Its quality is the tag quality.
 *      3. Drop tags without a winner or with quality 0.
 *      4. Stable sort by quality, highest first. Equal qualities keep the
 *         order of the available tags.
 */
pub fn negotiate<'a>(
    tags: &'a [LanguageTag],
    ranges: &[LanguageRange],
) -> Vec<Negotiated<'a>> {
    let mut result: Vec<Negotiated<'a>> = tags
        .iter()
        .filter_map(|tag| {
            let Some((range_index, range)) = winning_range(tag, ranges) else {
                trace!("negotiate| no range| {tag}");
                return None;
            };
            if range.quality().is_zero() {
                trace!("negotiate| refused| {tag}| {range}");
                return None;
            }
            Some(Negotiated {
                tag,
                quality: range.quality(),
                precedence: range.precedence(),
                range_index,
            })
        })
        .collect();
    result.sort_by(|a, b| b.quality.cmp(&a.quality));
    result
}

fn winning_range<'r>(
    tag: &LanguageTag,
    ranges: &'r [LanguageRange],
) -> Option<(usize, &'r LanguageRange)> {
    ranges
        .iter()
        .enumerate()
        .filter(|(_, range)| range.includes(tag))
        .fold(None, |best, (index, range)| match best {
            Some((_, current)) if rank(range) <= rank(current) => best,
            _ => Some((index, range)),
        })
}

fn rank(range: &LanguageRange) -> (usize, Quality) {
    (range.precedence(), range.quality())
}

pub fn best_match<'a>(
    tags: &'a [LanguageTag],
    ranges: &[LanguageRange],
) -> Option<&'a LanguageTag> {
    negotiate(tags, ranges).first().map(|negotiated| negotiated.tag)
}

/// Set of available languages, negotiated against each incoming
/// Accept-Language header.
#[derive(Clone, Debug, Default)]
pub struct Negotiator {
    tags: Vec<LanguageTag>,
}

impl Negotiator {
    pub fn new(tags: Vec<LanguageTag>) -> Self {
        Negotiator { tags }
    }

    pub fn parse<'s>(
        tags: impl IntoIterator<Item = &'s str>,
    ) -> Result<Self, LanguageError> {
        let tags = tags
            .into_iter()
            .map(LanguageTag::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Negotiator::new(tags))
    }

    pub fn tags(&self) -> &[LanguageTag] {
        &self.tags
    }

    pub fn select(&self, ranges: &[LanguageRange]) -> Vec<Negotiated<'_>> {
        negotiate(&self.tags, ranges)
    }

    // An empty header has no ranges so nothing is acceptable.
    pub fn select_header(
        &self,
        accept_language: &str,
    ) -> Result<Vec<Negotiated<'_>>, LanguageError> {
        let ranges = LanguageRange::parse_list(accept_language)?;
        Ok(self.select(&ranges))
    }

    pub fn best(&self, ranges: &[LanguageRange]) -> Option<&LanguageTag> {
        best_match(&self.tags, ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(input: &[&str]) -> Vec<LanguageTag> {
        input.iter().map(|s| LanguageTag::parse(s).unwrap()).collect()
    }

    fn ranges(input: &str) -> Vec<LanguageRange> {
        LanguageRange::parse_list(input).unwrap()
    }

    fn order(result: &[Negotiated]) -> Vec<String> {
        result.iter().map(|n| n.tag.to_string()).collect()
    }

    #[test]
    fn test_negotiate_quality_then_precedence() {
        let available = tags(&["en", "en-gb", "fr"]);
        let client = ranges("en-gb;q=0.8, en;q=0.5, *;q=0.1");
        let result = negotiate(&available, &client);
        assert_eq!(order(&result), ["en-gb", "en", "fr"]);
        assert_eq!(result[0].quality, 0.8);
        assert_eq!(result[0].range_index, 0);
        assert_eq!(result[1].quality, 0.5);
        assert_eq!(result[1].range_index, 1);
        assert_eq!(result[2].quality, 0.1);
        assert_eq!(result[2].precedence, 0);
    }

    #[test]
    fn test_negotiate_precedence_beats_quality() {
        // en-gb is matched by both, the more specific range wins even
        // though its quality is lower
        let available = tags(&["en-gb"]);
        let client = ranges("en;q=0.9, en-gb;q=0.2");
        let result = negotiate(&available, &client);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quality, 0.2);
        assert_eq!(result[0].range_index, 1);
    }

    #[test]
    fn test_negotiate_same_precedence_higher_quality() {
        let available = tags(&["en"]);
        let client = ranges("en;q=0.3, en;q=0.6");
        let result = negotiate(&available, &client);
        assert_eq!(result[0].quality, 0.6);
        assert_eq!(result[0].range_index, 1);
    }

    #[test]
    fn test_negotiate_full_tie_first_seen() {
        let available = tags(&["en"]);
        let client = ranges("en;q=0.5, en;q=0.5");
        let result = negotiate(&available, &client);
        assert_eq!(result[0].range_index, 0);
    }

    #[test]
    fn test_negotiate_zero_quality_excludes() {
        let available = tags(&["en", "fr"]);
        let client = ranges("*, fr;q=0");
        let result = negotiate(&available, &client);
        assert_eq!(order(&result), ["en"]);
    }

    #[test]
    fn test_negotiate_no_match_excluded() {
        let available = tags(&["de", "fr"]);
        let client = ranges("en, en-gb");
        assert!(negotiate(&available, &client).is_empty());
        assert!(negotiate(&available, &[]).is_empty());
        assert!(best_match(&available, &client).is_none());
    }

    #[test]
    fn test_negotiate_equal_quality_keeps_tag_order() {
        let available = tags(&["fr", "de", "en"]);
        let client = ranges("*;q=0.5");
        let result = negotiate(&available, &client);
        assert_eq!(order(&result), ["fr", "de", "en"]);
    }

    #[test]
    fn test_best_match() {
        let available = tags(&["en", "en-gb", "fr"]);
        let client = ranges("fr;q=0.4, en-gb;q=0.7");
        let best = best_match(&available, &client).unwrap();
        assert_eq!(best.to_string(), "en-gb");
    }

    #[test]
    fn test_negotiator_select_header() {
        let negotiator = Negotiator::parse(["en-us", "da", "en-gb"]).unwrap();
        let result = negotiator
            .select_header("da, en-gb;q=0.8, en;q=0.7")
            .unwrap();
        assert_eq!(order(&result), ["da", "en-gb", "en-us"]);
        assert_eq!(result[2].quality, 0.7);
        assert!(negotiator.select_header("").unwrap().is_empty());
        assert!(negotiator.select_header("en;q=abc").is_err());
    }

    #[test]
    fn test_negotiator_parse_invalid() {
        assert_eq!(
            Negotiator::parse(["en", "*"]).unwrap_err(),
            LanguageError::Star
        );
    }

    #[test]
    fn test_negotiator_best() {
        let negotiator = Negotiator::new(tags(&["en", "fr"]));
        let client = ranges("fr");
        assert_eq!(negotiator.best(&client).unwrap().to_string(), "fr");
        assert_eq!(negotiator.tags().len(), 2);
    }
}
