//! Syntax analysis: token cursor, diagnostics and the parser seam
//!
//! Grammars embed a [`Cursor`] and implement [`Parser`]; the cursor offers
//! lookahead, `match`/`consume` primitives, a soft error list and caret
//! diagrams pointing into the source text.

mod cursor;
mod error;
mod parser;

pub use cursor::Cursor;
pub use error::{SyntaxError, SyntaxResult};
pub use parser::{parse_source, Parser};

use crate::config::constants::compile_time::syntax::MAX_RECOVERY_SCAN_TOKENS;
use crate::log_debug;
use crate::logging::codes;
use crate::tokens::TokenLike;

/// Empty cursor with preferences taken from the environment
pub fn create_cursor<T: TokenLike>() -> Cursor<T> {
    Cursor::new()
}

/// Check that every syntax code is registered and log the recovery limit
pub fn init_syntax_analysis_logging() -> Result<(), String> {
    let error_codes = [
        codes::syntax::GRAMMAR_VIOLATION,
        codes::syntax::REPORTED_ERRORS,
        codes::syntax::RECOVERY_SCAN_EXHAUSTED,
        codes::syntax::UNEXPECTED_TOKEN,
    ];

    for code in &error_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Syntax limits initialized",
        "max_recovery_scan_tokens" => MAX_RECOVERY_SCAN_TOKENS
    );

    Ok(())
}
