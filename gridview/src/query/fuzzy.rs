//! Fuzzy ranking using nucleo-matcher.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Result of a fuzzy filter operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterMatch {
    /// Index of the matched item in the original list.
    pub index: usize,
    /// Match score (higher is better).
    pub score: u32,
}

/// Reusable fuzzy ranker for one query.
///
/// Matching is by subsequence: the query's characters must appear in order,
/// but any characters may be omitted between them. A query the matcher
/// rejects is retried with each pair of adjacent characters swapped, so one
/// transposition is tolerated too. Case is ignored.
/// A haystack passes when the matcher ranks it at all and its score is at
/// least the configured minimum.
pub struct FuzzyRanker {
    matcher: Matcher,
    pattern: Pattern,
    /// Patterns for the query with one adjacent pair swapped.
    transposed: Vec<Pattern>,
    min_score: u32,
    buf: Vec<char>,
}

impl FuzzyRanker {
    /// Create a ranker for a non-empty query.
    pub fn new(query: &str, min_score: u32) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            pattern: pattern(query),
            transposed: transpositions(query).iter().map(|q| pattern(q)).collect(),
            min_score,
            buf: Vec::new(),
        }
    }

    /// Rank a haystack. `None` means no match.
    pub fn score(&mut self, haystack: &str) -> Option<u32> {
        let haystack = Utf32Str::new(haystack, &mut self.buf);
        if let Some(score) = self.pattern.score(haystack, &mut self.matcher) {
            return Some(score);
        }
        self.transposed
            .iter()
            .filter_map(|pattern| pattern.score(haystack, &mut self.matcher))
            .max()
    }

    /// Whether a haystack is ranked as a pass.
    pub fn passes(&mut self, haystack: &str) -> bool {
        self.score(haystack)
            .is_some_and(|score| score >= self.min_score)
    }
}

fn pattern(query: &str) -> Pattern {
    Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    )
}

/// Every variant of `query` with one adjacent pair of characters swapped.
///
/// Pairs involving whitespace are skipped.
fn transpositions(query: &str) -> Vec<String> {
    let chars: Vec<char> = query.chars().collect();
    let mut variants = Vec::new();
    for i in 1..chars.len() {
        let (a, b) = (chars[i - 1], chars[i]);
        if a == b || a.is_whitespace() || b.is_whitespace() {
            continue;
        }
        let mut swapped = chars.clone();
        swapped.swap(i - 1, i);
        variants.push(swapped.into_iter().collect());
    }
    variants
}

/// Fuzzy filter a list of labels.
///
/// Returns matches sorted by score (highest first), ties in list order.
/// Empty query returns all items with score 0.
pub fn fuzzy_filter(query: &str, items: &[String]) -> Vec<FilterMatch> {
    if query.is_empty() {
        return items
            .iter()
            .enumerate()
            .map(|(index, _)| FilterMatch { index, score: 0 })
            .collect();
    }

    let mut ranker = FuzzyRanker::new(query, 0);
    let mut matches: Vec<FilterMatch> = items
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            ranker
                .score(label)
                .map(|score| FilterMatch { index, score })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpositions() {
        assert_eq!(transpositions("abc"), vec!["bac", "acb"]);
        assert_eq!(transpositions("aab"), vec!["aba"]);
        assert_eq!(transpositions("ab cd"), vec!["ba cd", "ab dc"]);
        assert!(transpositions("a").is_empty());
    }
}
