//! Syntax error values raised by the cursor and by grammar code

use crate::lexical::LexerError;
use crate::logging::{codes, Code};

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Hard errors interrupting a derivation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    /// `consume` found a different category (or the end of input)
    #[error("{diagnostic}")]
    Consume {
        expected: String,
        found: Option<String>,
        message: String,
        diagnostic: String,
        line: usize,
        column: usize,
    },

    /// Raised explicitly by grammar code
    #[error("{diagnostic}")]
    Grammar { message: String, diagnostic: String },

    /// The parse completed but soft errors were recorded
    #[error("{}", .messages.join("\n"))]
    Reported { messages: Vec<String> },

    #[error(transparent)]
    Lexical(#[from] LexerError),
}

impl SyntaxError {
    pub fn grammar(message: &str, diagnostic: String) -> Self {
        Self::Grammar {
            message: message.to_string(),
            diagnostic,
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::Consume { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::Grammar { .. } => codes::syntax::GRAMMAR_VIOLATION,
            Self::Reported { .. } => codes::syntax::REPORTED_ERRORS,
            Self::Lexical(error) => error.error_code(),
        }
    }

    /// Whether a grammar may synchronize and continue after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Consume { .. } | Self::Grammar { .. } => true,
            Self::Reported { .. } | Self::Lexical(_) => false,
        }
    }

    /// The plain message, without the rendered diagram
    pub fn message(&self) -> String {
        match self {
            Self::Consume { message, .. } | Self::Grammar { message, .. } => message.clone(),
            Self::Reported { messages } => messages.join("\n"),
            Self::Lexical(error) => error.name().to_string(),
        }
    }

    /// Rendered caret diagram, when the error carries one
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Consume { diagnostic, .. } | Self::Grammar { diagnostic, .. } => {
                Some(diagnostic)
            }
            Self::Lexical(LexerError::UnexpectedCharacter { message, .. }) => Some(message),
            _ => None,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }
}
