//! Tokens of the relaxed JSON dialect used by MARLEY configuration files.
//!
//! The dialect is JSON plus JavaScript conveniences: `//` and `/* */`
//! comments, bare identifier keys, single-quoted strings, a leading `+` on
//! numbers, and trailing commas. Comments and whitespace are skipped here.

use logos::{FilterResult, Lexer, Logos};

/// A lexical token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    /// `/* ... */`, consumed by [`skip_block_comment`] and never emitted.
    #[token("/*", skip_block_comment)]
    BlockComment,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `null`
    #[token("null")]
    Null,
    /// Quoted string with escapes resolved.
    #[regex(r#""([^"\\\n]|\\.)*""#, unquote)]
    #[regex(r"'([^'\\\n]|\\.)*'", unquote)]
    Str(String),
    /// Numeric literal, kept as written.
    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().to_owned())]
    Number(String),
    /// Bare identifier, only meaningful as an object key.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_owned())]
    Ident(String),
}

impl Token {
    /// Short description for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Token::BlockComment => "block comment".to_owned(),
            Token::LBrace => "`{`".to_owned(),
            Token::RBrace => "`}`".to_owned(),
            Token::LBracket => "`[`".to_owned(),
            Token::RBracket => "`]`".to_owned(),
            Token::Colon => "`:`".to_owned(),
            Token::Comma => "`,`".to_owned(),
            Token::True => "`true`".to_owned(),
            Token::False => "`false`".to_owned(),
            Token::Null => "`null`".to_owned(),
            Token::Str(s) => format!("string {s:?}"),
            Token::Number(n) => format!("number `{n}`"),
            Token::Ident(i) => format!("identifier `{i}`"),
        }
    }
}

/// Skips to the closing `*/`. An unterminated comment is an error.
fn skip_block_comment(lex: &mut Lexer<'_, Token>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

/// Strips the quotes and resolves escapes. `None` makes logos emit an error.
fn unquote(lex: &mut Lexer<'_, Token>) -> Option<String> {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let unit = hex_unit(&mut chars)?;
                if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: a `\uDC00`-`\uDFFF` escape must follow.
                    if chars.next()? != '\\' || chars.next()? != 'u' {
                        return None;
                    }
                    let low = hex_unit(&mut chars)?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return None;
                    }
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code)?);
                } else {
                    out.push(char::from_u32(unit)?);
                }
            }
            _ => return None,
        }
    }
    Some(out)
}

/// Reads the four hex digits of a `\u` escape.
fn hex_unit(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}
