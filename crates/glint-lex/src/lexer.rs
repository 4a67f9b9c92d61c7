//! Byte stream → token sequence, plus `load` directive resolution.

use glint_util::Span;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::resolver::SourceResolver;
use crate::token::{Token, TokenKind};

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'?'
}

/// `-` is included so kebab-case built-in and fixture names (`array-get`,
/// `compound-procedure`) lex as a single symbol, per the language's
/// identifier grammar.
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'?' || b == b'-'
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match text {
        "for" => KwFor,
        "while" => KwWhile,
        "if" => KwIf,
        "else" => KwElse,
        "return" => KwReturn,
        "lambda" => KwLambda,
        "load" => KwLoad,
        "define-type" => KwDefineType,
        "new" => KwNew,
        _ => return None,
    })
}

/// Operators ordered longest-first so a fixed-length probe finds the
/// longest match directly; the table is closed under prefix (every
/// operator's prefixes are themselves valid operators), which is what
/// makes a simple length-descending probe equivalent to the back-off
/// "extend, then undo one character" algorithm the language describes.
const OPERATORS_LEN3: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::ShlEq),
    (">>=", TokenKind::ShrEq),
];

const OPERATORS_LEN2: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("++", TokenKind::Inc),
    ("--", TokenKind::Dec),
    ("<<", TokenKind::Shl),
    (">>", TokenKind::Shr),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    ("&=", TokenKind::AmpEq),
    ("|=", TokenKind::PipeEq),
    ("^=", TokenKind::CaretEq),
];

const OPERATORS_LEN1: &[(&str, TokenKind)] = &[
    (".", TokenKind::Dot),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    (";", TokenKind::Semicolon),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    ("=", TokenKind::Assign),
    ("!", TokenKind::Bang),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("&", TokenKind::Amp),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
];

fn match_operator(text: &str) -> Option<TokenKind> {
    let table: &[(&str, TokenKind)] = match text.len() {
        3 => OPERATORS_LEN3,
        2 => OPERATORS_LEN2,
        1 => OPERATORS_LEN1,
        _ => return None,
    };
    table.iter().find(|(s, _)| *s == text).map(|(_, k)| *k)
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let start = self.cursor.position();

            if self.cursor.is_at_end() {
                tokens.push(Token::eof(Span::new(start as u32, start as u32)));
                break;
            }

            let b = self.cursor.current();
            let token = if b.is_ascii_digit() {
                self.lex_number(start)?
            } else if is_ident_start(b) {
                self.lex_symbol(start)
            } else if b == b'"' {
                self.lex_string(start)?
            } else {
                self.lex_operator(start)?
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while matches!(
            self.cursor.current(),
            b' ' | b'\t' | b'\n' | b'\r' | 0x0c | 0x0b
        ) {
            self.cursor.advance();
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.cursor.position() as u32)
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, LexError> {
        let mut dots = 0u32;
        while !self.cursor.is_at_end()
            && (self.cursor.current().is_ascii_digit() || self.cursor.current() == b'.')
        {
            if self.cursor.current() == b'.' {
                dots += 1;
            }
            self.cursor.advance();
        }

        if is_ident_start(self.cursor.current()) {
            return Err(LexError::SymbolStartsWithDigit);
        }
        if dots > 1 {
            return Err(LexError::ExtraDecimalPoint);
        }

        let text = self.cursor.slice_from(start);
        if text.ends_with('.') {
            return Err(LexError::DigitExpectedAfterDot);
        }

        let kind = if dots == 1 {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        Ok(Token::new(kind, text, self.span_from(start)))
    }

    fn lex_symbol(&mut self, start: usize) -> Token {
        while !self.cursor.is_at_end() && is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        let span = self.span_from(start);
        match keyword_kind(text) {
            Some(kind) => Token::new(kind, "", span),
            None => Token::new(TokenKind::Symbol, text, span),
        }
    }

    fn lex_string(&mut self, start: usize) -> Result<Token, LexError> {
        self.cursor.advance(); // opening quote
        let mut literal = String::new();

        loop {
            if self.cursor.is_at_end() {
                return Err(LexError::UnterminatedString);
            }
            let b = self.cursor.current();
            if b == b'"' {
                break;
            }
            if b == b'\\' {
                // The backslash itself is dropped; whatever follows (even
                // `"` or `\`) is copied through literally, uninterpreted.
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    return Err(LexError::UnterminatedString);
                }
            }
            // Copy one UTF-8 scalar's worth of bytes through verbatim, so
            // non-ASCII text inside literals survives untouched.
            match self.cursor.remaining().chars().next() {
                Some(ch) => {
                    let len = ch.len_utf8();
                    literal.push(ch);
                    self.cursor.advance_n(len);
                }
                None => return Err(LexError::UnterminatedString),
            }
        }

        self.cursor.advance(); // closing quote
        Ok(Token::new(TokenKind::Str, literal, self.span_from(start)))
    }

    fn lex_operator(&mut self, start: usize) -> Result<Token, LexError> {
        for len in [3usize, 2, 1] {
            if let Some(text) = self.cursor.peek_str(len) {
                if let Some(kind) = match_operator(text) {
                    self.cursor.advance_n(len);
                    return Ok(Token::new(kind, "", self.span_from(start)));
                }
            }
        }
        Err(LexError::UnknownByte {
            byte: self.cursor.current(),
        })
    }
}

/// Tokenizes a single buffer, with no `load` resolution.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Tokenizes `source` and recursively resolves `load` directives via
/// `resolver`. `entry_key` seeds the cycle-detection stack with the
/// canonical identity of `source` itself, if the caller has one (the CLI
/// passes the canonicalized path of the file being run; the REPL and the
/// test suite pass `None` since their sources have no on-disk identity).
pub fn lex_program(
    source: &str,
    entry_key: Option<&str>,
    resolver: &dyn SourceResolver,
) -> Result<Vec<Token>, LexError> {
    let tokens = tokenize(source)?;
    let mut stack: Vec<String> = entry_key.map(|k| vec![k.to_string()]).unwrap_or_default();
    resolve_loads(tokens, resolver, &mut stack)
}

fn resolve_loads(
    tokens: Vec<Token>,
    resolver: &dyn SourceResolver,
    stack: &mut Vec<String>,
) -> Result<Vec<Token>, LexError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].kind != TokenKind::KwLoad {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        }

        let path_tok = tokens.get(i + 1).ok_or(LexError::LoadMissingPath)?;
        if path_tok.kind != TokenKind::Str {
            return Err(LexError::LoadMissingPath);
        }
        let semi_tok = tokens.get(i + 2).ok_or(LexError::LoadMissingSemicolon)?;
        if semi_tok.kind != TokenKind::Semicolon {
            return Err(LexError::LoadMissingSemicolon);
        }

        let path = path_tok.text.to_string();
        let (key, contents) = resolver.resolve(&path)?;

        if stack.contains(&key) {
            return Err(LexError::LoadCycle { path });
        }

        stack.push(key);
        let inner_tokens = tokenize(&contents)?;
        let mut inner_resolved = resolve_loads(inner_tokens, resolver, stack)?;
        stack.pop();

        if matches!(inner_resolved.last(), Some(t) if t.kind == TokenKind::Eof) {
            inner_resolved.pop();
        }
        out.extend(inner_resolved);
        i += 3;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn round_trips_literal_text() {
        let tokens = tokenize("42 3.5 \"hi\" foo").unwrap();
        assert_eq!(tokens[0].text.as_ref(), "42");
        assert_eq!(tokens[1].text.as_ref(), "3.5");
        assert_eq!(tokens[2].text.as_ref(), "hi");
        assert_eq!(tokens[3].text.as_ref(), "foo");
        // operators/keywords/EOF carry no meaningful text.
        let semi = tokenize(";").unwrap();
        assert_eq!(semi[0].text.as_ref(), "");
    }

    #[test]
    fn longest_match_three_pluses() {
        assert_eq!(
            kinds("+++"),
            vec![TokenKind::Inc, TokenKind::Plus, TokenKind::Eof]
        );
    }

    #[test]
    fn longest_match_four_pluses() {
        assert_eq!(
            kinds("++++"),
            vec![TokenKind::Inc, TokenKind::Inc, TokenKind::Eof]
        );
    }

    #[test]
    fn shift_assign_is_three_chars() {
        assert_eq!(kinds("<<="), vec![TokenKind::ShlEq, TokenKind::Eof]);
    }

    #[test]
    fn kebab_case_identifier_is_one_symbol() {
        let tokens = tokenize("array-get").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Symbol);
        assert_eq!(tokens[0].text.as_ref(), "array-get");
    }

    #[test]
    fn keyword_define_type_has_no_text() {
        let tokens = tokenize("define-type").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::KwDefineType);
        assert_eq!(tokens[0].text.as_ref(), "");
    }

    #[test]
    fn float_literal_requires_digit_after_dot() {
        assert_eq!(tokenize("1."), Err(LexError::DigitExpectedAfterDot));
    }

    #[test]
    fn extra_dot_is_an_error() {
        assert_eq!(tokenize("1.2.3"), Err(LexError::ExtraDecimalPoint));
    }

    #[test]
    fn digit_then_letter_is_an_error() {
        assert_eq!(tokenize("1abc"), Err(LexError::SymbolStartsWithDigit));
    }

    #[test]
    fn string_escapes_pass_escaped_char_through_raw() {
        let tokens = tokenize(r#""a\"b\\c""#).unwrap();
        assert_eq!(tokens[0].text.as_ref(), "a\"b\\c");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert_eq!(tokenize("\"abc"), Err(LexError::UnterminatedString));
    }

    #[test]
    fn unknown_byte_is_an_error() {
        assert_eq!(tokenize("@"), Err(LexError::UnknownByte { byte: b'@' }));
    }

    struct MapResolver(RefCell<HashMap<&'static str, &'static str>>);

    impl SourceResolver for MapResolver {
        fn resolve(&self, path: &str) -> Result<(String, String), LexError> {
            self.0
                .borrow()
                .get(path)
                .map(|s| (path.to_string(), s.to_string()))
                .ok_or_else(|| LexError::LoadFileNotFound {
                    path: path.to_string(),
                })
        }
    }

    #[test]
    fn load_splices_tokens_in_place() {
        let mut files = HashMap::new();
        files.insert("helper.glint", "7");
        let resolver = MapResolver(RefCell::new(files));

        let tokens = lex_program(
            "1; load \"helper.glint\"; 2;",
            None,
            &resolver,
        )
        .unwrap();

        let texts: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Integer)
            .map(|t| t.text.as_ref())
            .collect();
        assert_eq!(texts, vec!["1", "7", "2"]);
    }

    #[test]
    fn cyclic_load_is_rejected() {
        let mut files = HashMap::new();
        files.insert("a.glint", "load \"a.glint\";");
        let resolver = MapResolver(RefCell::new(files));

        let err = lex_program("load \"a.glint\";", Some("a.glint"), &resolver).unwrap_err();
        assert_eq!(
            err,
            LexError::LoadCycle {
                path: "a.glint".to_string()
            }
        );
    }
}
