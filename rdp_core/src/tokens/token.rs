//! Token record and the capability traits the tokenizer and cursor work with
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::Position;

/// Requirements on a token category tag
///
/// Satisfied by `String`, `&'static str` and any closed enum deriving
/// `Clone`, `PartialEq` and `Debug` with a `Display` impl.
pub trait TokenCategory: Clone + PartialEq + fmt::Debug + fmt::Display {}

impl<C> TokenCategory for C where C: Clone + PartialEq + fmt::Debug + fmt::Display {}

/// Read access shared by every token type the cursor can walk
pub trait TokenLike {
    type Category: TokenCategory;

    fn category(&self) -> &Self::Category;
    fn lexeme(&self) -> &str;
    /// Absolute character offset of the first character
    fn start(&self) -> usize;
    /// Absolute character offset one past the last character
    fn end(&self) -> usize;
    /// Line of the scan position after the lexeme
    fn line(&self) -> usize;
    /// Column of the scan position after the lexeme
    fn column(&self) -> usize;

    fn len(&self) -> usize {
        self.end() - self.start()
    }

    fn is_category(&self, category: &Self::Category) -> bool {
        self.category() == category
    }
}

/// Everything the tokenizer knows about an accepted match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedLexeme<C, V> {
    pub category: C,
    pub lexeme: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub value: Option<V>,
}

/// Token types the tokenizer can construct
pub trait FromMatch: TokenLike + Sized {
    /// Payload produced by rule transforms
    type Value;

    fn from_match(matched: MatchedLexeme<Self::Category, Self::Value>) -> Self;
}

/// Default token record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token<C = String, V = ()> {
    category: C,
    lexeme: String,
    start: usize,
    end: usize,
    line: usize,
    column: usize,
    value: Option<V>,
}

impl<C: TokenCategory, V> Token<C, V> {
    pub fn new(
        category: C,
        lexeme: impl Into<String>,
        start: usize,
        line: usize,
        column: usize,
    ) -> Self {
        let lexeme = lexeme.into();
        let end = start + lexeme.chars().count();
        Self {
            category,
            lexeme,
            start,
            end,
            line,
            column,
            value: None,
        }
    }

    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    /// Transformed payload, present only when the matching rule had a transform
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<V> {
        self.value
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Position after the lexeme, as tracked by the tokenizer
    pub fn end_position(&self) -> Position {
        Position::new(self.end, self.line, self.column)
    }
}

impl<C: TokenCategory, V> TokenLike for Token<C, V> {
    type Category = C;

    fn category(&self) -> &C {
        &self.category
    }

    fn lexeme(&self) -> &str {
        &self.lexeme
    }

    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }

    fn line(&self) -> usize {
        self.line
    }

    fn column(&self) -> usize {
        self.column
    }
}

impl<C: TokenCategory, V> FromMatch for Token<C, V> {
    type Value = V;

    fn from_match(matched: MatchedLexeme<C, V>) -> Self {
        Self {
            category: matched.category,
            lexeme: matched.lexeme,
            start: matched.start,
            end: matched.end,
            line: matched.line,
            column: matched.column,
            value: matched.value,
        }
    }
}

impl<C: fmt::Display, V> fmt::Display for Token<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' @{}:{}",
            self.category,
            self.lexeme.escape_debug(),
            self.line,
            self.column
        )
    }
}
