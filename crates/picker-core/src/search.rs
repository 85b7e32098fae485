//! Case-insensitive name and alias matching.

/// Queries shorter than this (in characters) only match as prefixes in
/// [`SearchMode::Auto`].
pub const SUBSTRING_MIN_QUERY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Auto,
    Contains,
    StartsWith,
    Equals,
}

/// Strictest first; full-list search runs these passes in order.
pub const RANKED_PASSES: [SearchMode; 3] =
    [SearchMode::Equals, SearchMode::StartsWith, SearchMode::Auto];

impl SearchMode {
    /// Collapse `Auto` into the concrete mode for `query`.
    pub fn resolve(self, query: &str) -> SearchMode {
        match self {
            SearchMode::Auto if query.chars().count() < SUBSTRING_MIN_QUERY => {
                SearchMode::StartsWith
            }
            SearchMode::Auto => SearchMode::Contains,
            other => other,
        }
    }
}

pub fn matches(candidate: &str, query: &str, mode: SearchMode) -> bool {
    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();
    match mode.resolve(&query) {
        SearchMode::StartsWith => candidate.starts_with(&query),
        SearchMode::Equals => candidate == query,
        SearchMode::Contains | SearchMode::Auto => candidate.contains(&query),
    }
}

/// First of `name` then `aliases` that satisfies `mode`.
pub fn find_match<'a, S: AsRef<str>>(
    name: &'a str,
    aliases: &'a [S],
    query: &str,
    mode: SearchMode,
) -> Option<&'a str> {
    std::iter::once(name)
        .chain(aliases.iter().map(AsRef::as_ref))
        .find(|candidate| matches(candidate, query, mode))
}

/// Character offset of `query` inside `matched`, compared case-insensitively.
pub fn match_offset(matched: &str, query: &str) -> Option<usize> {
    let hay: Vec<char> = matched.chars().flat_map(char::to_lowercase).collect();
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()] == needle[..])
}
