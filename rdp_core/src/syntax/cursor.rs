//! Token cursor and diagnostics base for recursive-descent grammars
//!
//! The cursor owns a token sequence and a position in `[0, len]`; the
//! position equals `len` at end of input. Soft errors accumulate in a list,
//! hard errors are returned as [`SyntaxError`] values.

use std::fmt;

use super::error::{SyntaxError, SyntaxResult};
use crate::config::constants::compile_time::syntax::MAX_RECOVERY_SCAN_TOKENS;
use crate::config::runtime::SyntaxPreferences;
use crate::logging::codes;
use crate::tokens::TokenLike;
use crate::utils::SourceMap;
use crate::{log_debug, log_error, log_success, log_warning};

pub struct Cursor<T: TokenLike> {
    tokens: Vec<T>,
    position: usize,
    errors: Vec<String>,
    source: Option<SourceMap>,
    preferences: SyntaxPreferences,
}

impl<T: TokenLike> Cursor<T> {
    pub fn new() -> Self {
        Self::with_preferences(SyntaxPreferences::default())
    }

    pub fn with_preferences(preferences: SyntaxPreferences) -> Self {
        Self {
            tokens: Vec::new(),
            position: 0,
            errors: Vec::new(),
            source: None,
            preferences,
        }
    }

    /// Cursor over `tokens` without source text
    pub fn from_tokens(tokens: Vec<T>) -> Self {
        let mut cursor = Self::new();
        cursor.tokens = tokens;
        cursor
    }

    /// Cursor over `tokens` with the source text used for excerpts
    pub fn with_source(tokens: Vec<T>, source: impl Into<String>) -> Self {
        let mut cursor = Self::from_tokens(tokens);
        cursor.source = Some(SourceMap::new(source));
        cursor
    }

    /// Position 0, no tokens, no errors, no source
    pub fn reset(&mut self) {
        self.position = 0;
        self.tokens.clear();
        self.errors.clear();
        self.source = None;
    }

    /// Reset, then install a new token sequence and optional source
    pub fn load(&mut self, tokens: Vec<T>, source: Option<&str>) {
        self.reset();
        self.tokens = tokens;
        self.source = source.map(SourceMap::new);
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(SourceMap::new(source));
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Token at `position + offset`, if that index exists
    pub fn look_around(&self, offset: isize) -> Option<&T> {
        self.position
            .checked_add_signed(offset)
            .and_then(|index| self.tokens.get(index))
    }

    /// Return the current token and move past it
    ///
    /// At end of input nothing is returned and the position stays put.
    pub fn advance(&mut self) -> Option<&T> {
        if self.is_at_end() {
            return None;
        }
        self.position += 1;

        let token = self.tokens.get(self.position - 1);
        if self.preferences.log_cursor_movement {
            if let Some(token) = token {
                log_debug!("Cursor advanced",
                    "position" => self.position,
                    "category" => token.category(),
                    "lexeme" => token.lexeme().escape_debug()
                );
            }
        }
        token
    }

    pub fn previous(&self) -> Option<&T> {
        self.look_around(-1)
    }

    pub fn current(&self) -> Option<&T> {
        self.look_around(0)
    }

    pub fn peek(&self) -> Option<&T> {
        self.look_around(1)
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.look_around(2)
    }

    /// Whether the current token has `category`; false at end of input
    pub fn check(&self, category: &T::Category) -> bool {
        self.current()
            .map_or(false, |token| token.category() == category)
    }

    /// Advance past the current token if it has any of `categories`
    pub fn match_any(&mut self, categories: &[T::Category]) -> bool {
        if categories.iter().any(|category| self.check(category)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Take a token of `category` or fail without moving
    ///
    /// On failure `message` is recorded as a soft error and a
    /// [`SyntaxError::Consume`] carrying the rendered diagram is returned.
    pub fn consume(&mut self, category: &T::Category, message: &str) -> SyntaxResult<T>
    where
        T: Clone,
    {
        if self.check(category) {
            if let Some(token) = self.advance() {
                return Ok(token.clone());
            }
        }

        let (line, column) = self.anchor();
        let error = SyntaxError::Consume {
            expected: category.to_string(),
            found: self.current().map(|token| token.category().to_string()),
            message: message.to_string(),
            diagnostic: self.make_error_msg(message),
            line,
            column,
        };
        self.add_error(message);
        Err(error)
    }

    /// Record a soft error
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Whether a soft error was recorded since the last reset
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }

    /// Drop soft errors recorded after the first `len`
    pub fn truncate_errors(&mut self, len: usize) {
        self.errors.truncate(len);
    }

    /// All soft errors, one per line
    pub fn error_report(&self) -> String {
        self.errors.join("\n")
    }

    /// Hard error for grammar code to return; not recorded as a soft error
    pub fn error(&self, message: &str) -> SyntaxError {
        SyntaxError::grammar(message, self.make_error_msg(message))
    }

    /// Line and column of the token before the current one, or 0:0 at the start
    fn anchor(&self) -> (usize, usize) {
        self.previous()
            .map_or((0, 0), |token| (token.line(), token.column()))
    }

    /// Render `message` above the source line and a caret marker
    ///
    /// The caret points at the position after the previous token. Without
    /// source text only the line and column are reported.
    pub fn make_error_msg(&self, message: &str) -> String {
        let (line, column) = self.anchor();
        match &self.source {
            Some(source) => {
                source.format_diagram(message, line, column, self.preferences.marker_filler)
            }
            None => format!("{}\n(line {}, column {})", message, line, column),
        }
    }

    pub fn save_position(&self) -> usize {
        self.position
    }

    /// Return to a saved position, clamped to the end of input
    pub fn restore_position(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    /// Skip tokens until one of `categories` is current or input ends
    ///
    /// The synchronizing token itself is not consumed. Returns the number
    /// of tokens skipped.
    pub fn synchronize(&mut self, categories: &[T::Category]) -> usize {
        let start = self.position;
        let mut skipped = 0;

        while !self.is_at_end() && skipped < MAX_RECOVERY_SCAN_TOKENS {
            if categories.iter().any(|category| self.check(category)) {
                log_success!(codes::success::RECOVERY_COMPLETE, "Found recovery point",
                    "start_position" => start,
                    "skipped_tokens" => skipped
                );
                return skipped;
            }
            self.position += 1;
            skipped += 1;
        }

        if skipped >= MAX_RECOVERY_SCAN_TOKENS {
            log_error!(codes::syntax::RECOVERY_SCAN_EXHAUSTED,
                "Recovery scan limit reached without finding recovery point",
                "tokens_scanned" => skipped
            );
        } else {
            log_warning!("No recovery point found, reached end of input",
                "tokens_scanned" => skipped
            );
        }
        skipped
    }

    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_ref().map(SourceMap::source)
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[T] {
        &self.tokens[self.position..]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn preferences(&self) -> &SyntaxPreferences {
        &self.preferences
    }
}

impl<T: TokenLike> Default for Cursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TokenLike> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self
            .current()
            .map(|token| format!("{} '{}'", token.category(), token.lexeme().escape_debug()));
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("len", &self.tokens.len())
            .field("current", &current)
            .field("errors", &self.errors)
            .finish()
    }
}
