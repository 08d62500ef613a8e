//! Lexical analysis: ordered regex rules, match selection and the tokenizer
//!
//! ```
//! use rdp_core::lexical::Tokenizer;
//! use rdp_core::tokens::TokenLike;
//!
//! let mut tokenizer: Tokenizer = Tokenizer::new();
//! tokenizer
//!     .add_rule("NUMBER", r"\d+")?
//!     .add_rule("PLUS", r"\+")?
//!     .add_rule("SPACE", " +")?;
//!
//! let tokens = tokenizer.tokenize("1 + 2", &["SPACE".to_string()])?;
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].lexeme(), "+");
//! # Ok::<(), rdp_core::lexical::LexerError>(())
//! ```

pub mod analyzer;
pub mod rules;
pub mod strategy;

use std::collections::BTreeMap;

use crate::config::constants::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{FromMatch, Token, TokenLike};

pub use analyzer::{LexerError, LexicalMetrics, Tokenizer};
pub use rules::{Rule, RuleTable, Transform};
pub use strategy::{Candidate, FirstMatch, LongestMatch, SelectionStrategy};

/// Tokenizer producing the default [`Token`] with string categories
pub fn create_tokenizer() -> Tokenizer<Token> {
    Tokenizer::new()
}

pub fn create_tokenizer_with_preferences<T: FromMatch>(
    preferences: LexicalPreferences,
) -> Tokenizer<T> {
    Tokenizer::with_preferences(preferences)
}

/// Number of tokens per category, keyed by the category's display form
pub fn get_token_counts<T: TokenLike>(tokens: &[T]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.category().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Check that every lexical code is registered and log the active limits
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let error_codes = [
        codes::lexical::UNEXPECTED_CHARACTER,
        codes::lexical::INVALID_PATTERN,
        codes::lexical::ZERO_WIDTH_MATCH,
        codes::lexical::TOO_MANY_TOKENS,
        codes::lexical::TOO_MANY_RULES,
    ];

    for code in &error_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical limits initialized",
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_rule_count" => MAX_RULE_COUNT
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_lexical_analysis_logging() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_token_counts() {
        let mut tokenizer = create_tokenizer();
        tokenizer
            .add_rule("WORD", "[a-z]+")
            .and_then(|t| t.add_rule("SPACE", " "))
            .unwrap();

        let tokens = tokenizer.tokenize("a bb ccc", &[]).unwrap();
        let counts = get_token_counts(&tokens);
        assert_eq!(counts.get("WORD"), Some(&3));
        assert_eq!(counts.get("SPACE"), Some(&2));
    }

    #[test]
    fn test_tokenizer_with_preferences() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            ..LexicalPreferences::default()
        };
        let mut tokenizer: Tokenizer = create_tokenizer_with_preferences(preferences);
        tokenizer.add_rule("A", "a").unwrap();
        tokenizer.tokenize("aaa", &[]).unwrap();

        assert!(tokenizer.metrics().category_counts.is_empty());
        assert_eq!(tokenizer.metrics().total_tokens, 3);
    }
}
