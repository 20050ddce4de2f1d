use language_plz::{
    LanguageError, LanguageRange, LanguageTag, Negotiator, Quality, negotiate,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn tags(input: &[&str]) -> Vec<LanguageTag> {
    input.iter().map(|s| s.parse().unwrap()).collect()
}

#[test]
fn test_accept_language_header_end_to_end() {
    init_tracing();
    let available = tags(&["en", "en-gb", "fr"]);
    let ranges =
        LanguageRange::parse_list("en-gb;q=0.8, en;q=0.5, *;q=0.1").unwrap();
    let result = negotiate(&available, &ranges);
    let verify: Vec<(String, f64)> = result
        .iter()
        .map(|n| (n.tag.to_string(), n.quality.value()))
        .collect();
    assert_eq!(verify, [
        ("en-gb".to_string(), 0.8),
        ("en".to_string(), 0.5),
        ("fr".to_string(), 0.1),
    ]);
}

#[test]
fn test_browser_header() {
    init_tracing();
    let negotiator = Negotiator::parse(["de", "en-US", "fr-CA"]).unwrap();
    let result = negotiator
        .select_header("fr-CA,fr;q=0.9,en-US;q=0.8,en;q=0.7,*;q=0.5")
        .unwrap();
    let order: Vec<String> =
        result.iter().map(|n| n.tag.to_string()).collect();
    assert_eq!(order, ["fr-CA", "en-US", "de"]);
    assert_eq!(result[2].quality, 0.5);
}

#[test]
fn test_wildcard_refused_specific_wins() {
    init_tracing();
    let negotiator = Negotiator::parse(["en", "x-pig-latin"]).unwrap();
    let result = negotiator.select_header("*;q=0, x-pig-latin").unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].tag.primary_tag(), "x");
    assert_eq!(result[0].quality, Quality::ONE);
}

#[test]
fn test_quality_mutation_changes_outcome() {
    init_tracing();
    let available = tags(&["en", "fr"]);
    let mut ranges = LanguageRange::parse_list("en, fr;q=0.5").unwrap();
    assert_eq!(negotiate(&available, &ranges)[0].tag.primary_tag(), "en");

    ranges[0].set_quality(Quality::new(0.2).unwrap());
    assert_eq!(ranges[0].to_string(), "en; q=0.2");
    assert_eq!(negotiate(&available, &ranges)[0].tag.primary_tag(), "fr");
}

#[test]
fn test_invalid_header_member() {
    init_tracing();
    let negotiator = Negotiator::parse(["en"]).unwrap();
    let err = negotiator.select_header("en, ;q=0.5").unwrap_err();
    assert_eq!(err.to_string(), LanguageError::Empty.to_string());
}

#[test]
fn test_serde_round_trip_of_ranges() {
    let ranges = LanguageRange::parse_list("da, en-gb;q=0.8").unwrap();
    let json = serde_json::to_string(&ranges).unwrap();
    assert_eq!(json, r#"["da","en-gb; q=0.8"]"#);
    let verify: Vec<LanguageRange> = serde_json::from_str(&json).unwrap();
    assert_eq!(verify, ranges);
}
