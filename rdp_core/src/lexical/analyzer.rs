//! Rule-driven tokenizer
//!
//! At every offset each rule is tried; the selection strategy picks among
//! the matches, the chosen lexeme becomes a token and scanning resumes after
//! it. Lines and columns count characters, a `\n` starting a new line.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use super::rules::{Rule, RuleTable};
use super::strategy::{self, Candidate, LongestMatch, SelectionStrategy};
use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{FromMatch, MatchedLexeme, Token, TokenLike};
use crate::utils::{render_caret_diagram, Position, SourceMap, Span};
use crate::{log_debug, log_error, log_success};

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    /// No rule matches at the scan position. `message` is the rendered
    /// diagram: header, offending line and caret marker.
    #[error("{message}")]
    UnexpectedCharacter {
        excerpt: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid pattern for rule '{category}': {reason}")]
    InvalidPattern { category: String, reason: String },

    #[error("Rule '{category}' matched an empty lexeme at line {line}, column {column}")]
    ZeroWidthMatch {
        category: String,
        line: usize,
        column: usize,
    },

    #[error("Too many tokens: {count} (max {})", MAX_TOKEN_COUNT)]
    TooManyTokens { count: usize },

    #[error("Too many rules: {count} (max {})", MAX_RULE_COUNT)]
    TooManyRules { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnexpectedCharacter { .. } => codes::lexical::UNEXPECTED_CHARACTER,
            LexerError::InvalidPattern { .. } => codes::lexical::INVALID_PATTERN,
            LexerError::ZeroWidthMatch { .. } => codes::lexical::ZERO_WIDTH_MATCH,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::TooManyRules { .. } => codes::lexical::TOO_MANY_RULES,
        }
    }

    /// Short error name
    pub fn name(&self) -> &'static str {
        match self {
            LexerError::UnexpectedCharacter { .. } => "unexpected character",
            LexerError::InvalidPattern { .. } => "invalid pattern",
            LexerError::ZeroWidthMatch { .. } => "zero-width match",
            LexerError::TooManyTokens { .. } => "too many tokens",
            LexerError::TooManyRules { .. } => "too many rules",
        }
    }

    /// Line and column the error refers to, when it has one
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            LexerError::UnexpectedCharacter { line, column, .. }
            | LexerError::ZeroWidthMatch { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// Counters gathered during the last `tokenize` call
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub filtered_tokens: usize,
    pub chars_scanned: usize,
    pub lines_scanned: usize,
    pub max_lexeme_length: usize,
    /// Accepted lexemes whose selection had more than one matching rule
    pub ambiguous_matches: usize,

    /// Per-category counts, only with `collect_detailed_metrics`
    pub category_counts: BTreeMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(
        &mut self,
        category: &dyn fmt::Display,
        width: usize,
        filtered: bool,
        preferences: &LexicalPreferences,
    ) {
        self.total_tokens += 1;
        self.chars_scanned += width;
        self.max_lexeme_length = self.max_lexeme_length.max(width);

        if filtered {
            self.filtered_tokens += 1;
        }

        if preferences.collect_detailed_metrics {
            *self
                .category_counts
                .entry(category.to_string())
                .or_insert(0) += 1;
        }
    }

    pub(crate) fn record_ambiguity(&mut self) {
        self.ambiguous_matches += 1;
    }
}

/// Scan position, reset at the start of every `tokenize` call
#[derive(Debug, Clone, Copy, Default)]
struct ScanState {
    /// Byte offset into the text, for slicing
    byte_offset: usize,
    /// Character offset, line and column, as reported
    position: Position,
}

/// Rule-driven tokenizer producing tokens of type `T`
pub struct Tokenizer<T: FromMatch = Token> {
    rules: RuleTable<T::Category, T::Value>,
    strategy: Box<dyn SelectionStrategy>,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
    scan: ScanState,
    _token: PhantomData<fn() -> T>,
}

impl<T: FromMatch> Tokenizer<T> {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            rules: RuleTable::new(),
            strategy: Box::new(LongestMatch),
            preferences,
            metrics: LexicalMetrics::default(),
            scan: ScanState::default(),
            _token: PhantomData,
        }
    }

    /// Replace the tie-break strategy
    pub fn with_strategy(mut self, strategy: impl SelectionStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn set_strategy(&mut self, strategy: impl SelectionStrategy + 'static) {
        self.strategy = Box::new(strategy);
    }

    /// Register a rule; returns the tokenizer for chaining
    pub fn add_rule(
        &mut self,
        category: impl Into<T::Category>,
        pattern: &str,
    ) -> Result<&mut Self, LexerError> {
        let rule = Rule::new(category.into(), pattern)?;
        self.register(rule)
    }

    /// Register a rule whose tokens carry `transform(lexeme)` as payload
    pub fn add_rule_with(
        &mut self,
        category: impl Into<T::Category>,
        pattern: &str,
        transform: impl Fn(&str) -> T::Value + 'static,
    ) -> Result<&mut Self, LexerError> {
        let rule = Rule::new(category.into(), pattern)?.with_transform(transform);
        self.register(rule)
    }

    fn register(&mut self, rule: Rule<T::Category, T::Value>) -> Result<&mut Self, LexerError> {
        if self.preferences.log_rule_registration {
            log_debug!("Registering rule",
                "category" => rule.category(),
                "pattern" => rule.pattern(),
                "index" => self.rules.len()
            );
        }

        if let Err(error) = self.rules.push(rule) {
            log_error!(error.error_code(), "Rule limit exceeded",
                "limit" => MAX_RULE_COUNT
            );
            return Err(error);
        }
        Ok(self)
    }

    /// Tokenize `text`, dropping tokens whose category is in `filter`
    ///
    /// Either every character is covered by an accepted lexeme or an error
    /// is returned; partial output is never returned.
    pub fn tokenize(
        &mut self,
        text: &str,
        filter: &[T::Category],
    ) -> Result<Vec<T>, LexerError> {
        self.scan = ScanState::default();
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting tokenization",
            "bytes" => text.len(),
            "rules" => self.rules.len(),
            "strategy" => self.strategy.name()
        );

        let mut tokens = Vec::new();
        let mut produced = 0usize;

        while self.scan.byte_offset < text.len() {
            if produced >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: produced + 1,
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = Span::point(self.scan.position),
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let (selected, match_count) = self.select_match(text, self.scan.byte_offset);

            let Some((rule, chosen, lexeme)) = selected else {
                return Err(self.unexpected_character(text));
            };

            let token = self.build_token(rule, lexeme)?;
            if match_count > 1 {
                self.metrics.record_ambiguity();
            }

            let filtered = filter.contains(token.category());
            self.metrics.record_token(
                token.category(),
                chosen.width,
                filtered,
                &self.preferences,
            );

            if self.preferences.log_token_events {
                log_debug!("Token accepted",
                    "category" => token.category(),
                    "lexeme" => lexeme.escape_debug(),
                    "line" => token.line(),
                    "column" => token.column(),
                    "filtered" => filtered
                );
            }

            // The tracker continues from the token's own end position
            self.scan.byte_offset += lexeme.len();
            self.scan.position = Position::new(token.end(), token.line(), token.column());

            produced += 1;
            if !filtered {
                tokens.push(token);
            }
        }

        self.metrics.lines_scanned = if text.is_empty() {
            0
        } else {
            self.scan.position.line + 1
        };

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => tokens.len(),
            "filtered" => self.metrics.filtered_tokens,
            "lines" => self.metrics.lines_scanned
        );

        Ok(tokens)
    }

    /// Try every rule at byte `offset` of `text`
    ///
    /// Returns the selected rule with its candidate and lexeme, and the
    /// number of rules that matched.
    #[allow(clippy::type_complexity)]
    fn select_match<'t>(
        &self,
        text: &'t str,
        offset: usize,
    ) -> (
        Option<(&Rule<T::Category, T::Value>, Candidate, &'t str)>,
        usize,
    ) {
        let matches: Vec<_> = self
            .rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                rule.match_at(text, offset)
                    .map(|lexeme| (rule, Candidate::new(index, lexeme.chars().count()), lexeme))
            })
            .collect();

        let chosen = strategy::select(
            self.strategy.as_ref(),
            matches.iter().map(|&(_, candidate, _)| candidate),
        );
        let selected = chosen.and_then(|chosen| {
            matches
                .iter()
                .find(|(_, candidate, _)| candidate.rule_index == chosen.rule_index)
                .copied()
        });

        (selected, matches.len())
    }

    fn build_token(
        &self,
        rule: &Rule<T::Category, T::Value>,
        lexeme: &str,
    ) -> Result<T, LexerError> {
        if lexeme.is_empty() {
            let error = LexerError::ZeroWidthMatch {
                category: rule.category().to_string(),
                line: self.scan.position.line,
                column: self.scan.position.column,
            };
            log_error!(error.error_code(), "Selected rule matched nothing",
                span = Span::point(self.scan.position),
                "category" => rule.category(),
                "pattern" => rule.pattern()
            );
            return Err(error);
        }

        let start = self.scan.position;
        let end = start.advance_str(lexeme);

        Ok(T::from_match(MatchedLexeme {
            category: rule.category().clone(),
            lexeme: lexeme.to_string(),
            start: start.offset,
            end: end.offset,
            line: end.line,
            column: end.column,
            value: rule.apply(lexeme),
        }))
    }

    fn unexpected_character(&self, text: &str) -> LexerError {
        let Position { line, column, .. } = self.scan.position;
        let source = SourceMap::new(text);
        let excerpt = source.excerpt(line).to_string();
        let header = format!("unexpected character at line {}, column {}", line, column);
        let message = render_caret_diagram(&header, &excerpt, column, ' ');

        let error = LexerError::UnexpectedCharacter {
            excerpt,
            line,
            column,
            message,
        };

        let found = text[self.scan.byte_offset..].chars().next().unwrap_or('\0');
        log_error!(error.error_code(), "No rule matches input",
            span = Span::point(self.scan.position),
            "character" => found.escape_debug(),
            "line" => line,
            "column" => column
        );

        error
    }

    /// Character offset of the scan position
    pub fn start(&self) -> usize {
        self.scan.position.offset
    }

    pub fn line(&self) -> usize {
        self.scan.position.line
    }

    pub fn column(&self) -> usize {
        self.scan.position.column
    }

    pub fn rules(&self) -> &RuleTable<T::Category, T::Value> {
        &self.rules
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }
}

impl<T: FromMatch> Default for Tokenizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FromMatch> fmt::Debug for Tokenizer<T>
where
    T::Category: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("rules", &self.rules)
            .field("strategy", &self.strategy.name())
            .field("start", &self.scan.position.offset)
            .field("line", &self.scan.position.line)
            .field("column", &self.scan.position.column)
            .finish()
    }
}
