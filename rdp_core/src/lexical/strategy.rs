//! Disambiguation between rules that match at the same offset
//!
//! Candidates are folded in registration order: the first matching rule is
//! the incumbent and each later match replaces it only when the strategy
//! strictly prefers it.

/// A rule that matched at the current offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Registration index of the matching rule
    pub rule_index: usize,
    /// Length of the matched lexeme in characters
    pub width: usize,
}

impl Candidate {
    pub fn new(rule_index: usize, width: usize) -> Self {
        Self { rule_index, width }
    }
}

/// Decides whether a later candidate replaces the current best one
pub trait SelectionStrategy {
    fn prefer(&self, best: Candidate, challenger: Candidate) -> bool;

    fn name(&self) -> &str {
        "custom"
    }
}

/// Longest lexeme wins; ties go to the earliest registered rule
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestMatch;

impl SelectionStrategy for LongestMatch {
    fn prefer(&self, best: Candidate, challenger: Candidate) -> bool {
        challenger.width > best.width
    }

    fn name(&self) -> &str {
        "longest-match"
    }
}

/// Earliest registered matching rule wins regardless of length
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl SelectionStrategy for FirstMatch {
    fn prefer(&self, _best: Candidate, _challenger: Candidate) -> bool {
        false
    }

    fn name(&self) -> &str {
        "first-match"
    }
}

impl<F> SelectionStrategy for F
where
    F: Fn(Candidate, Candidate) -> bool,
{
    fn prefer(&self, best: Candidate, challenger: Candidate) -> bool {
        self(best, challenger)
    }
}

/// Fold candidates in order and return the selected one
pub fn select<S, I>(strategy: &S, candidates: I) -> Option<Candidate>
where
    S: SelectionStrategy + ?Sized,
    I: IntoIterator<Item = Candidate>,
{
    candidates.into_iter().fold(None, |best, challenger| match best {
        Some(incumbent) if !strategy.prefer(incumbent, challenger) => Some(incumbent),
        _ => Some(challenger),
    })
}
