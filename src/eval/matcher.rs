use regex::Regex;

/// A predicate over a single candidate string.
///
/// Matchers are immutable once constructed and total: `matches` never fails,
/// for any input including empty strings and control characters. The one
/// fallible step, regex compilation, happens at construction so the builder
/// can reject a bad pattern before an evaluation ever runs.
#[derive(Debug, Clone)]
pub enum Matcher {
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    Regex(Regex),
    /// Negation wrapper around any other matcher.
    Not(Box<Matcher>),
}

impl Matcher {
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Matcher::StartsWith(prefix) => candidate.starts_with(prefix),
            Matcher::EndsWith(suffix) => candidate.ends_with(suffix),
            Matcher::Contains(needle) => candidate.contains(needle),
            Matcher::Regex(re) => re.is_match(candidate),
            Matcher::Not(inner) => !inner.matches(candidate),
        }
    }

    /// Wrap in negation when `negate` is set.
    pub fn negated_if(self, negate: bool) -> Self {
        if negate { Matcher::Not(Box::new(self)) } else { self }
    }
}
