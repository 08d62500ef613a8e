//! Ordered rule table
//!
//! A rule pairs a category with a regular expression and an optional
//! transform producing the token's payload. Matching is an anchored search
//! over the whole text starting at the scan offset, so look-behind style
//! assertions such as `\b` see the characters before the offset. Rules are
//! immutable once registered and registration order is significant.

use std::fmt;

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};

use super::analyzer::LexerError;
use crate::config::constants::compile_time::lexical::MAX_RULE_COUNT;
use crate::tokens::TokenCategory;

/// Converts a lexeme into a typed payload
pub type Transform<V> = Box<dyn Fn(&str) -> V>;

pub struct Rule<C, V> {
    category: C,
    pattern: String,
    regex: Regex,
    transform: Option<Transform<V>>,
}

impl<C: TokenCategory, V> Rule<C, V> {
    pub fn new(category: C, pattern: &str) -> Result<Self, LexerError> {
        let regex = Regex::new(pattern).map_err(|error| LexerError::InvalidPattern {
            category: category.to_string(),
            reason: error.to_string(),
        })?;

        Ok(Self {
            category,
            pattern: pattern.to_string(),
            regex,
            transform: None,
        })
    }

    pub fn with_transform(mut self, transform: impl Fn(&str) -> V + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn category(&self) -> &C {
        &self.category
    }

    /// Pattern as registered
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Match starting exactly at byte `offset` of `text`
    ///
    /// `offset` must lie on a char boundary.
    pub fn match_at<'t>(&self, text: &'t str, offset: usize) -> Option<&'t str> {
        let input = Input::new(text).range(offset..).anchored(Anchored::Yes);
        self.regex.find(input).map(|m| &text[m.range()])
    }

    /// Payload for an accepted lexeme, if the rule has a transform
    pub fn apply(&self, lexeme: &str) -> Option<V> {
        self.transform.as_ref().map(|transform| transform(lexeme))
    }
}

impl<C: fmt::Debug, V> fmt::Debug for Rule<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("category", &self.category)
            .field("pattern", &self.pattern)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Rules in registration order
pub struct RuleTable<C, V> {
    rules: Vec<Rule<C, V>>,
}

impl<C: TokenCategory, V> RuleTable<C, V> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn push(&mut self, rule: Rule<C, V>) -> Result<(), LexerError> {
        if self.rules.len() >= MAX_RULE_COUNT {
            return Err(LexerError::TooManyRules {
                count: self.rules.len() + 1,
            });
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Rule<C, V>> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<C, V>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Categories in registration order, duplicates included
    pub fn categories(&self) -> Vec<&C> {
        self.rules.iter().map(Rule::category).collect()
    }
}

impl<C: TokenCategory, V> Default for RuleTable<C, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Debug, V> fmt::Debug for RuleTable<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter()).finish()
    }
}
