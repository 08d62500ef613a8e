//! Rule-driven regex tokenizer and recursive-descent parser base
//!
//! [`lexical::Tokenizer`] turns text into tokens using ordered regular
//! expression rules; [`syntax::Cursor`] walks those tokens for hand-written
//! grammars and renders caret diagnostics into the source.

pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod syntax;
pub mod tokens;
pub mod utils;

pub use config::{ConfigError, RuntimeConfig};
pub use lexical::{LexerError, Tokenizer};
pub use syntax::{parse_source, Cursor, Parser, SyntaxError, SyntaxResult};
pub use tokens::{FromMatch, Token, TokenCategory, TokenLike};

/// Install logging preferences from `config` and start global logging
pub fn init(config: &RuntimeConfig) -> Result<(), String> {
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    lexical::init_lexical_analysis_logging()?;
    syntax::init_syntax_analysis_logging()?;
    Ok(())
}
