//! Parser seam for grammar implementations built on [`Cursor`]

use super::cursor::Cursor;
use super::error::{SyntaxError, SyntaxResult};
use crate::lexical::Tokenizer;
use crate::logging::codes;
use crate::tokens::{FromMatch, TokenLike};
use crate::{log_debug, log_error, log_success};

/// A recursive-descent grammar owning a cursor
///
/// Implementors supply the cursor accessors and the start rule; loading,
/// logging and strict error reporting are provided.
pub trait Parser {
    type Token: TokenLike;
    type Output;

    fn cursor(&self) -> &Cursor<Self::Token>;
    fn cursor_mut(&mut self) -> &mut Cursor<Self::Token>;

    /// Start rule, run against the loaded cursor
    fn parse_tokens(&mut self) -> SyntaxResult<Self::Output>;

    /// Load `tokens` into a freshly reset cursor and run the start rule
    fn parse(
        &mut self,
        tokens: Vec<Self::Token>,
        source: Option<&str>,
    ) -> SyntaxResult<Self::Output> {
        log_debug!("Starting syntax analysis", "tokens" => tokens.len());
        self.cursor_mut().load(tokens, source);

        let result = self.parse_tokens();
        match &result {
            Ok(_) => {
                log_success!(codes::success::PARSE_COMPLETE, "Syntax analysis completed",
                    "tokens_consumed" => self.cursor().position(),
                    "soft_errors" => self.cursor().errors().len()
                );
            }
            Err(error) => {
                log_error!(error.error_code(), "Syntax analysis failed",
                    "error" => error.message(),
                    "position" => self.cursor().position()
                );
            }
        }
        result
    }

    /// Like [`Parser::parse`], but recorded soft errors fail the parse
    fn parse_strict(
        &mut self,
        tokens: Vec<Self::Token>,
        source: Option<&str>,
    ) -> SyntaxResult<Self::Output> {
        let output = self.parse(tokens, source)?;
        if self.cursor().had_error() {
            return Err(SyntaxError::Reported {
                messages: self.cursor().errors().to_vec(),
            });
        }
        Ok(output)
    }

    /// Run `rule` speculatively
    ///
    /// On failure the position and the soft error list are rolled back and
    /// `None` is returned.
    fn attempt<R>(&mut self, rule: impl FnOnce(&mut Self) -> SyntaxResult<R>) -> Option<R>
    where
        Self: Sized,
    {
        let position = self.cursor().save_position();
        let error_count = self.cursor().errors().len();

        match rule(self) {
            Ok(value) => Some(value),
            Err(error) => {
                log_debug!("Speculative parse failed, restoring checkpoint",
                    "position" => position,
                    "error" => error.message()
                );
                let cursor = self.cursor_mut();
                cursor.restore_position(position);
                cursor.truncate_errors(error_count);
                None
            }
        }
    }
}

/// Tokenize `text` and parse the result with `text` as diagnostic source
pub fn parse_source<P, T>(
    parser: &mut P,
    tokenizer: &mut Tokenizer<T>,
    text: &str,
    filter: &[T::Category],
) -> SyntaxResult<P::Output>
where
    P: Parser<Token = T>,
    T: FromMatch,
{
    let tokens = tokenizer.tokenize(text, filter)?;
    parser.parse(tokens, Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;
    use assert_matches::assert_matches;

    type CalcToken = Token<&'static str, i64>;

    fn calc_tokenizer() -> Tokenizer<CalcToken> {
        let mut tokenizer = Tokenizer::new();
        tokenizer
            .add_rule_with("NUMBER", r"\d+", |s| s.parse().unwrap_or_default())
            .and_then(|t| t.add_rule("PLUS", r"\+"))
            .and_then(|t| t.add_rule("MINUS", "-"))
            .and_then(|t| t.add_rule("STAR", r"\*"))
            .and_then(|t| t.add_rule("SLASH", "/"))
            .and_then(|t| t.add_rule("LPAREN", r"\("))
            .and_then(|t| t.add_rule("RPAREN", r"\)"))
            .and_then(|t| t.add_rule("SPACE", r"\s+"))
            .unwrap();
        tokenizer
    }

    /// expression := term (("+" | "-") term)*
    /// term       := factor (("*" | "/") factor)*
    /// factor     := NUMBER | "(" expression ")"
    #[derive(Default)]
    struct Calculator {
        cursor: Cursor<CalcToken>,
    }

    impl Calculator {
        fn operator(&self) -> Option<&'static str> {
            self.cursor.previous().map(|token| *token.category())
        }

        fn expression(&mut self) -> SyntaxResult<i64> {
            let mut value = self.term()?;
            while self.cursor.match_any(&["PLUS", "MINUS"]) {
                let operator = self.operator();
                let rhs = self.term()?;
                value = match operator {
                    Some("PLUS") => value + rhs,
                    _ => value - rhs,
                };
            }
            Ok(value)
        }

        fn term(&mut self) -> SyntaxResult<i64> {
            let mut value = self.factor()?;
            while self.cursor.match_any(&["STAR", "SLASH"]) {
                let operator = self.operator();
                let rhs = self.factor()?;
                value = match operator {
                    Some("STAR") => value * rhs,
                    _ if rhs == 0 => return Err(self.cursor.error("Division by zero")),
                    _ => value / rhs,
                };
            }
            Ok(value)
        }

        fn factor(&mut self) -> SyntaxResult<i64> {
            if self.cursor.match_any(&["NUMBER"]) {
                return self
                    .cursor
                    .previous()
                    .and_then(|token| token.value().copied())
                    .ok_or_else(|| self.cursor.error("Number without value"));
            }
            if self.cursor.match_any(&["LPAREN"]) {
                let value = self.expression()?;
                self.cursor
                    .consume(&"RPAREN", "Expected ')' after expression")?;
                return Ok(value);
            }
            Err(self.cursor.error("Expected expression"))
        }
    }

    impl Parser for Calculator {
        type Token = CalcToken;
        type Output = i64;

        fn cursor(&self) -> &Cursor<CalcToken> {
            &self.cursor
        }

        fn cursor_mut(&mut self) -> &mut Cursor<CalcToken> {
            &mut self.cursor
        }

        fn parse_tokens(&mut self) -> SyntaxResult<i64> {
            let value = self.expression()?;
            if !self.cursor.is_at_end() {
                return Err(self.cursor.error("Unexpected trailing input"));
            }
            Ok(value)
        }
    }

    fn evaluate(text: &str) -> SyntaxResult<i64> {
        let mut parser = Calculator::default();
        parse_source(&mut parser, &mut calc_tokenizer(), text, &["SPACE"])
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(evaluate("1 + 2 * 3").unwrap(), 7);
        assert_eq!(evaluate("(1 + 2) * 3").unwrap(), 9);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3);
        assert_eq!(evaluate("42").unwrap(), 42);
    }

    #[test]
    fn test_missing_paren_reports_diagram() {
        let mut parser = Calculator::default();
        let error = parse_source(&mut parser, &mut calc_tokenizer(), "(1 + 2", &["SPACE"])
            .unwrap_err();

        assert_matches!(
            &error,
            SyntaxError::Consume { expected, found: None, .. } if expected == "RPAREN"
        );
        assert_eq!(
            error.to_string(),
            "Expected ')' after expression\n(1 + 2\n      ^"
        );
        assert_eq!(
            parser.cursor().errors(),
            ["Expected ')' after expression".to_string()]
        );
    }

    #[test]
    fn test_lexical_error_propagates() {
        let error = evaluate("1 $ 2").unwrap_err();
        assert_matches!(error, SyntaxError::Lexical(_));
        assert_eq!(
            error.to_string(),
            "unexpected character at line 0, column 2\n1 $ 2\n  ^"
        );
    }

    #[test]
    fn test_grammar_errors() {
        assert_matches!(evaluate("4 / 0"), Err(SyntaxError::Grammar { ref message, .. }) if message == "Division by zero");
        assert_matches!(evaluate("1 2"), Err(SyntaxError::Grammar { ref message, .. }) if message == "Unexpected trailing input");
        assert_matches!(evaluate(""), Err(SyntaxError::Grammar { .. }));
    }

    #[test]
    fn test_parse_resets_between_runs() {
        let mut tokenizer = calc_tokenizer();
        let mut parser = Calculator::default();

        assert!(parse_source(&mut parser, &mut tokenizer, "(1", &["SPACE"]).is_err());
        assert!(parser.cursor().had_error());

        assert_eq!(parse_source(&mut parser, &mut tokenizer, "2 * 5", &["SPACE"]).unwrap(), 10);
        assert!(!parser.cursor().had_error());
    }

    #[test]
    fn test_attempt_rolls_back() {
        let mut tokenizer = calc_tokenizer();
        let mut parser = Calculator::default();
        let tokens = tokenizer.tokenize("(1 + 2", &["SPACE"]).unwrap();
        parser.cursor_mut().load(tokens, Some("(1 + 2"));

        assert!(parser.attempt(|p| p.expression()).is_none());
        assert_eq!(parser.cursor().position(), 0);
        assert!(!parser.cursor().had_error());

        parser.cursor_mut().advance();
        assert_eq!(parser.attempt(|p| p.term()), Some(1));
        assert_eq!(parser.cursor().position(), 2);
    }

    type StmtToken = Token<&'static str>;

    fn statement_tokenizer() -> Tokenizer<StmtToken> {
        let mut tokenizer = Tokenizer::new();
        tokenizer
            .add_rule("LET", "let")
            .and_then(|t| t.add_rule("IDENT", "[a-z]+"))
            .and_then(|t| t.add_rule("EQUALS", "="))
            .and_then(|t| t.add_rule("NUMBER", r"\d+"))
            .and_then(|t| t.add_rule("SEMI", ";"))
            .and_then(|t| t.add_rule("SPACE", r"\s+"))
            .unwrap();
        tokenizer
    }

    /// program   := statement*
    /// statement := "let" IDENT "=" NUMBER ";"
    ///
    /// A failed statement is skipped up to and including its semicolon.
    #[derive(Default)]
    struct Statements {
        cursor: Cursor<StmtToken>,
    }

    impl Statements {
        fn statement(&mut self) -> SyntaxResult<String> {
            self.cursor.consume(&"LET", "Expected 'let'")?;
            let name = self.cursor.consume(&"IDENT", "Expected variable name")?;
            self.cursor.consume(&"EQUALS", "Expected '='")?;
            self.cursor.consume(&"NUMBER", "Expected number")?;
            self.cursor.consume(&"SEMI", "Expected ';'")?;
            Ok(name.lexeme().to_string())
        }
    }

    impl Parser for Statements {
        type Token = StmtToken;
        type Output = Vec<String>;

        fn cursor(&self) -> &Cursor<StmtToken> {
            &self.cursor
        }

        fn cursor_mut(&mut self) -> &mut Cursor<StmtToken> {
            &mut self.cursor
        }

        fn parse_tokens(&mut self) -> SyntaxResult<Vec<String>> {
            let mut names = Vec::new();
            while !self.cursor.is_at_end() {
                match self.statement() {
                    Ok(name) => names.push(name),
                    Err(error) if error.is_recoverable() => {
                        self.cursor.synchronize(&["SEMI"]);
                        self.cursor.match_any(&["SEMI"]);
                    }
                    Err(error) => return Err(error),
                }
            }
            Ok(names)
        }
    }

    const PROGRAM: &str = "let x = 1; let = 2; let y = 3;";

    #[test]
    fn test_recovery_collects_soft_errors() {
        let mut parser = Statements::default();
        let names =
            parse_source(&mut parser, &mut statement_tokenizer(), PROGRAM, &["SPACE"]).unwrap();

        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(parser.cursor().errors(), ["Expected variable name".to_string()]);
    }

    #[test]
    fn test_strict_parse_fails_on_soft_errors() {
        let tokens = statement_tokenizer().tokenize(PROGRAM, &["SPACE"]).unwrap();
        let mut parser = Statements::default();

        let error = parser.parse_strict(tokens, Some(PROGRAM)).unwrap_err();
        assert_eq!(
            error,
            SyntaxError::Reported {
                messages: vec!["Expected variable name".to_string()]
            }
        );
        assert_eq!(error.error_code(), codes::syntax::REPORTED_ERRORS);
    }

    #[test]
    fn test_strict_parse_passes_clean_input() {
        let source = "let a = 1;";
        let tokens = statement_tokenizer().tokenize(source, &["SPACE"]).unwrap();
        let mut parser = Statements::default();

        assert_eq!(parser.parse_strict(tokens, Some(source)).unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_recovery_at_semicolon_makes_progress() {
        let source = "let x = ; let y = 2;";
        let mut parser = Statements::default();
        let names =
            parse_source(&mut parser, &mut statement_tokenizer(), source, &["SPACE"]).unwrap();

        assert_eq!(names, vec!["y".to_string()]);
        assert_eq!(parser.cursor().error_report(), "Expected number");
    }
}
