//! Token model shared by the tokenizer and the cursor
//!
//! [`Token`] is the default record produced by the tokenizer. Grammars that
//! need a richer token implement [`FromMatch`] for their own type and get a
//! tokenizer producing it directly; the cursor only requires [`TokenLike`].
//!
//! Categories are generic: an open `String`/`&str` tag for grammars composed
//! at runtime, or a closed enum when the grammar is known statically.

pub mod token;

pub use token::{FromMatch, MatchedLexeme, Token, TokenCategory, TokenLike};
