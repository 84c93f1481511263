use gridview::query::{FuzzyRanker, fuzzy_filter};

fn labels(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_empty_query_returns_all() {
    let items = labels(&["Lahore", "Karachi"]);
    let matches = fuzzy_filter("", &items);
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].index, 0);
    assert_eq!(matches[1].index, 1);
}

#[test]
fn test_fuzzy_matching() {
    let items = labels(&["Lahore", "Karachi", "Larkana"]);
    let matches = fuzzy_filter("la", &items);
    // Both Lahore and Larkana start with "la"
    let indices: Vec<usize> = matches.iter().map(|m| m.index).collect();
    assert!(indices.contains(&0));
    assert!(indices.contains(&2));
}

#[test]
fn test_no_matches() {
    let items = labels(&["Lahore", "Karachi"]);
    assert!(fuzzy_filter("xyz", &items).is_empty());
}

#[test]
fn test_case_insensitive() {
    let items = labels(&["Lahore", "KARACHI"]);
    let matches = fuzzy_filter("karachi", &items);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].index, 1);
}

#[test]
fn test_best_match_first() {
    let items = labels(&["Sialkot Road", "Islamabad"]);
    let matches = fuzzy_filter("islamabad", &items);
    assert_eq!(matches[0].index, 1);
}

#[test]
fn test_ranker_minimum_score() {
    let mut lenient = FuzzyRanker::new("ahs", 0);
    assert!(lenient.passes("3 Ahsan"));
    assert!(!lenient.passes("2 Sana"));

    let mut strict = FuzzyRanker::new("ahs", u32::MAX);
    assert!(strict.score("3 Ahsan").is_some());
    assert!(!strict.passes("3 Ahsan"));
}

#[test]
fn test_ranker_tolerates_one_transposition() {
    let mut ranker = FuzzyRanker::new("ahsna", 0);
    assert!(ranker.score("3 Ahsan").is_some());
    assert!(!ranker.passes("2 Sana"));
}

#[test]
fn test_suggestions_tolerate_transposition() {
    let items = labels(&["Lahore", "Karachi"]);
    let matches = fuzzy_filter("karahci", &items);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].index, 1);
}
