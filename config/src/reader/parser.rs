//! Recursive-descent parser from [`Token`]s to a [`serde_json::Value`].

use std::ops::Range;

use logos::Logos;
use serde_json::{Map, Number, Value};

use super::lexer::Token;
use crate::error::{ConfigError, Result};

/// Deepest nesting of objects and arrays accepted.
pub const MAX_DEPTH: usize = 64;

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
}

/// Parses a document in the relaxed JSON dialect.
///
/// Object key order is preserved. Duplicate keys are rejected.
///
/// # Errors
///
/// Returns [`ConfigError::Syntax`] with the line and column of the first
/// offending token.
pub fn parse_str(source: &str) -> Result<Value> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(source).spanned() {
        match token {
            Ok(t) => tokens.push((t, span)),
            Err(()) => {
                let text = &source[span.clone()];
                let message = if text.starts_with("/*") {
                    "unterminated block comment".to_owned()
                } else {
                    let head = text.chars().take(16).collect::<String>();
                    format!("unexpected input `{head}`")
                };
                return Err(syntax_at(source, span.start, message));
            }
        }
    }
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };
    let value = parser.value(0)?;
    if let Some((token, span)) = parser.tokens.get(parser.pos) {
        return Err(syntax_at(
            source,
            span.start,
            format!("unexpected {} after end of document", token.describe()),
        ));
    }
    Ok(value)
}

impl Parser<'_> {
    fn next(&mut self) -> Result<(Token, Range<usize>)> {
        match self.tokens.get(self.pos) {
            Some(entry) => {
                self.pos += 1;
                Ok(entry.clone())
            }
            None => Err(syntax_at(
                self.source,
                self.source.len(),
                "unexpected end of document".to_owned(),
            )),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn error(&self, span: &Range<usize>, message: String) -> ConfigError {
        syntax_at(self.source, span.start, message)
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        let (token, span) = self.next()?;
        match token {
            Token::LBrace => self.object(depth + 1, &span),
            Token::LBracket => self.array(depth + 1, &span),
            Token::Str(s) => Ok(Value::String(s)),
            Token::Number(n) => self.number(&n, &span),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::Null => Ok(Value::Null),
            other => Err(self.error(&span, format!("expected a value, found {}", other.describe()))),
        }
    }

    fn object(&mut self, depth: usize, open: &Range<usize>) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(self.error(open, format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        let mut map = Map::new();
        loop {
            let (token, span) = self.next()?;
            let key = match token {
                Token::RBrace => break,
                Token::Ident(k) | Token::Str(k) => k,
                // Keywords are valid bare keys too.
                Token::True => "true".to_owned(),
                Token::False => "false".to_owned(),
                Token::Null => "null".to_owned(),
                other => {
                    return Err(self.error(
                        &span,
                        format!("expected a key or `}}`, found {}", other.describe()),
                    ))
                }
            };
            if map.contains_key(&key) {
                return Err(self.error(&span, format!("duplicate key `{key}`")));
            }
            let (colon, colon_span) = self.next()?;
            if colon != Token::Colon {
                return Err(self.error(
                    &colon_span,
                    format!("expected `:` after key `{key}`, found {}", colon.describe()),
                ));
            }
            let value = self.value(depth)?;
            map.insert(key, value);

            let (sep, sep_span) = self.next()?;
            match sep {
                Token::Comma => continue,
                Token::RBrace => break,
                other => {
                    return Err(self.error(
                        &sep_span,
                        format!("expected `,` or `}}`, found {}", other.describe()),
                    ))
                }
            }
        }
        Ok(Value::Object(map))
    }

    fn array(&mut self, depth: usize, open: &Range<usize>) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(self.error(open, format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        let mut items = Vec::new();
        loop {
            if self.peek() == Some(&Token::RBracket) {
                self.pos += 1;
                break;
            }
            items.push(self.value(depth)?);
            let (sep, sep_span) = self.next()?;
            match sep {
                Token::Comma => continue,
                Token::RBracket => break,
                other => {
                    return Err(self.error(
                        &sep_span,
                        format!("expected `,` or `]`, found {}", other.describe()),
                    ))
                }
            }
        }
        Ok(Value::Array(items))
    }

    fn number(&self, literal: &str, span: &Range<usize>) -> Result<Value> {
        let digits = literal.strip_prefix('+').unwrap_or(literal);
        let is_integer = !digits.contains(['.', 'e', 'E']);
        if is_integer {
            if let Ok(i) = digits.parse::<i64>() {
                return Ok(Value::Number(i.into()));
            }
            if let Ok(u) = digits.parse::<u64>() {
                return Ok(Value::Number(u.into()));
            }
        }
        digits
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.error(span, format!("number `{literal}` is out of range")))
    }
}

fn syntax_at(source: &str, offset: usize, message: String) -> ConfigError {
    let (line, column) = line_column(source, offset);
    ConfigError::Syntax {
        line,
        column,
        message,
    }
}

/// 1-based line and column (in characters) of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_relaxed_object() {
        let value = parse_str(
            "{\n  // comment\n  seed: 42,\n  'name': \"x\",\n  list: [1, 2.5, -3,],\n  flag: true,\n}",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({"seed": 42, "name": "x", "list": [1, 2.5, -3], "flag": true})
        );
    }

    #[test]
    fn preserves_key_order() {
        let value = parse_str("{ b: 1, a: 2, c: 3 }").unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn integers_stay_integers() {
        let value = parse_str("[123456, 1.0, 1e2, 18446744073709551615]").unwrap();
        assert!(value[0].is_u64());
        assert!(value[1].is_f64());
        assert!(value[2].is_f64());
        assert_eq!(value[3].as_u64(), Some(u64::MAX));
    }

    #[test]
    fn reports_line_and_column() {
        let err = parse_str("{\n  seed: 1\n  target: {}\n}").unwrap_err();
        match err {
            ConfigError::Syntax { line, column, message } => {
                assert_eq!((line, column), (3, 3));
                assert!(message.contains("expected `,` or `}`"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = parse_str("{ seed: 1, seed: 2 }").unwrap_err();
        assert!(err.to_string().contains("duplicate key `seed`"));
    }

    #[test]
    fn rejects_unterminated_and_trailing_input() {
        assert!(parse_str("{ seed: 1,").is_err());
        assert!(parse_str("{} {}").is_err());
        assert!(parse_str("{ seed: @ }").is_err());
        assert!(parse_str("").is_err());
    }

    #[test]
    fn block_comments_anywhere() {
        let value = parse_str(
            "/**/ {\n  /* seed\n   * value **/ seed: 7, /* a * b */\n  z: [1, /**/ 2],\n}",
        )
        .unwrap();
        assert_eq!(value, json!({"seed": 7, "z": [1, 2]}));
    }

    #[test]
    fn reports_unterminated_block_comment() {
        let err = parse_str("{\n  seed: 1, /* open\n}").unwrap_err();
        match err {
            ConfigError::Syntax { line, column, message } => {
                assert_eq!((line, column), (2, 12));
                assert_eq!(message, "unterminated block comment");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_overflowing_float() {
        assert!(parse_str("[1e999]").is_err());
    }

    #[test]
    fn rejects_excessive_nesting() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert!(parse_str(&deep).is_err());
        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_str(&ok).is_ok());
    }
}
