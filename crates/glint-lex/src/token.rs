//! Token kinds and the `Token` type the lexer produces.

use glint_util::Span;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Dot,
    Comma,
    Colon,
    Semicolon,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Assign,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Inc,
    Dec,
    Shl,
    Shr,
    Amp,
    Pipe,
    Caret,
    AndAnd,
    OrOr,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    ShlEq,
    ShrEq,
    AmpEq,
    PipeEq,
    CaretEq,

    KwFor,
    KwWhile,
    KwIf,
    KwElse,
    KwReturn,
    KwLambda,
    KwLoad,
    KwDefineType,
    KwNew,

    Integer,
    Float,
    Str,
    Symbol,

    Eof,
}

impl TokenKind {
    /// The fixed operator/keyword/punctuation text for kinds that don't
    /// carry lexeme-dependent text. Literal-bearing kinds return `None`.
    pub fn fixed_text(self) -> Option<&'static str> {
        use TokenKind::*;
        Some(match self {
            Dot => ".",
            Comma => ",",
            Colon => ":",
            Semicolon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Assign => "=",
            Bang => "!",
            EqEq => "==",
            NotEq => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Inc => "++",
            Dec => "--",
            Shl => "<<",
            Shr => ">>",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            AndAnd => "&&",
            OrOr => "||",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            PlusEq => "+=",
            MinusEq => "-=",
            StarEq => "*=",
            SlashEq => "/=",
            ShlEq => "<<=",
            ShrEq => ">>=",
            AmpEq => "&=",
            PipeEq => "|=",
            CaretEq => "^=",
            KwFor => "for",
            KwWhile => "while",
            KwIf => "if",
            KwElse => "else",
            KwReturn => "return",
            KwLambda => "lambda",
            KwLoad => "load",
            KwDefineType => "define-type",
            KwNew => "new",
            Eof => "<eof>",
            Integer | Float | Str | Symbol => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed_text() {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "{self:?}"),
        }
    }
}

/// A single lexical token.
///
/// `text` carries the source-derived lexeme for [`TokenKind::Integer`],
/// [`TokenKind::Float`], [`TokenKind::Str`] and [`TokenKind::Symbol`]; it
/// is the empty string for every other kind, whose text is implied by the
/// kind itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Rc<str>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<Rc<str>>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }
}
