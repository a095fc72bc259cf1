//! Soft title de-duplication.
//!
//! A title "matches" a base when it equals the base ignoring case, or when it
//! is the base followed by a parenthesised counter such as `"Demo (3)"`.

/// Returns true when `candidate` is `base` or a numbered variant of it.
pub fn is_title_variant(base: &str, candidate: &str) -> bool {
    let base = base.to_lowercase();
    let candidate = candidate.to_lowercase();

    if candidate == base {
        return true;
    }

    candidate
        .strip_prefix(&base)
        .and_then(|rest| rest.strip_prefix(" ("))
        .and_then(|rest| rest.strip_suffix(')'))
        .is_some_and(|counter| !counter.is_empty() && counter.chars().all(|c| c.is_ascii_digit()))
}

/// Counts the titles in `existing` that match `base`.
pub fn count_title_variants<'a, I>(base: &str, existing: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .filter(|candidate| is_title_variant(base, candidate))
        .count()
}

/// Picks the title to store given how many existing titles already match.
pub fn disambiguate_title(base: &str, matches: usize) -> String {
    if matches == 0 {
        base.to_string()
    } else {
        format!("{} ({})", base, matches + 1)
    }
}
