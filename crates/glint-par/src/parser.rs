//! Recursive-descent parser with an explicit precedence climb.
//!
//! The language's own grammar sketch only shows two precedence tiers
//! (additive, multiplicative); the full ladder below — assignment,
//! comparison, bitwise/logical infix, shift, additive, multiplicative,
//! unary, postfix — follows the precedence table instead, each tier a
//! small left-associative loop over the next-tighter tier (assignment is
//! the one right-associative exception, implemented as a recursive call
//! into itself rather than a loop).

use std::rc::Rc;

use glint_ast::{BinOp, Node, NodeRef, UnOp};
use glint_lex::{Token, TokenKind};
use glint_util::Symbol;

use crate::error::ParseError;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type PResult<T> = Result<T, ParseError>;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_program(&mut self) -> PResult<Vec<NodeRef>> {
        let mut items = Vec::new();
        while !self.at(TokenKind::Eof) {
            items.push(self.parse_statement()?);
        }
        Ok(items)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &'static str) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::Expected {
                what,
                found: self.current().kind,
                span: self.current().span,
            })
        }
    }

    fn expect_symbol(&mut self, what: &'static str) -> PResult<Symbol> {
        let tok = self.expect(TokenKind::Symbol, what)?;
        Ok(Symbol::intern(&tok.text))
    }

    // ---- statements --------------------------------------------------

    fn parse_statement(&mut self) -> PResult<NodeRef> {
        match self.current().kind {
            TokenKind::KwLambda => self.parse_lambda(),
            TokenKind::KwDefineType => {
                let decl = self.parse_type_definition()?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                Ok(decl)
            }
            TokenKind::LBrace => self.parse_block(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwFor => self.parse_for(),
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                Ok(expr)
            }
        }
    }

    fn parse_lambda(&mut self) -> PResult<NodeRef> {
        self.advance(); // `lambda`
        let name = self.expect_symbol("lambda name")?;
        self.expect(TokenKind::LParen, "`(`")?;
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Rc::new(Node::Lambda { name, params, body }))
    }

    /// Parameter lists may be empty: `lambda f() { ... }`.
    fn parse_params(&mut self) -> PResult<Vec<Symbol>> {
        if self.match_kind(TokenKind::RParen) {
            return Ok(vec![]);
        }
        let mut params = Vec::new();
        loop {
            params.push(self.expect_symbol("parameter name")?);
            if self.match_kind(TokenKind::Comma) {
                if self.at(TokenKind::RParen) {
                    return Err(ParseError::TrailingComma {
                        span: self.current().span,
                    });
                }
                continue;
            }
            self.expect(TokenKind::RParen, "`)`")?;
            break;
        }
        Ok(params)
    }

    fn parse_type_definition(&mut self) -> PResult<NodeRef> {
        self.advance(); // `define-type`
        let name = self.expect_symbol("type name")?;
        self.expect(TokenKind::LParen, "`(`")?;
        let fields = self.parse_fields()?;
        Ok(Rc::new(Node::TypeDefinition { name, fields }))
    }

    /// Field lists require at least one field; `define-type T()` is not a
    /// valid declaration.
    fn parse_fields(&mut self) -> PResult<Vec<Symbol>> {
        let mut fields = Vec::new();
        loop {
            fields.push(self.expect_symbol("type field name")?);
            if self.match_kind(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen, "`)`")?;
            break;
        }
        Ok(fields)
    }

    fn parse_block(&mut self) -> PResult<NodeRef> {
        self.expect(TokenKind::LBrace, "`{`")?;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::Eof) {
                return Err(ParseError::Expected {
                    what: "`}`",
                    found: TokenKind::Eof,
                    span: self.current().span,
                });
            }
            stmts.push(self.parse_statement()?);
        }
        self.advance(); // `}`
        Ok(Node::block(stmts))
    }

    fn parse_if(&mut self) -> PResult<NodeRef> {
        self.advance(); // `if`
        self.expect(TokenKind::LParen, "`(`")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "`)`")?;
        let then_block = self.parse_block()?;
        let else_block = if self.match_kind(TokenKind::KwElse) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Rc::new(Node::If {
            cond,
            then_block,
            else_block,
        }))
    }

    fn parse_while(&mut self) -> PResult<NodeRef> {
        self.advance(); // `while`
        self.expect(TokenKind::LParen, "`(`")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "`)`")?;
        let body = self.parse_block()?;
        Ok(Rc::new(Node::While { cond, body }))
    }

    fn parse_for(&mut self) -> PResult<NodeRef> {
        self.advance(); // `for`
        self.expect(TokenKind::LParen, "`(`")?;

        let init = if self.match_kind(TokenKind::Semicolon) {
            None
        } else {
            let e = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "`;`")?;
            Some(e)
        };
        let cond = if self.match_kind(TokenKind::Semicolon) {
            None
        } else {
            let e = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "`;`")?;
            Some(e)
        };
        let step = if self.match_kind(TokenKind::RParen) {
            None
        } else {
            let e = self.parse_expr()?;
            self.expect(TokenKind::RParen, "`)`")?;
            Some(e)
        };

        let body = self.parse_block()?;
        Ok(Rc::new(Node::For {
            init,
            cond,
            step,
            body,
        }))
    }

    // ---- expressions, tightest-to-loosest read bottom-up -------------

    fn parse_expr(&mut self) -> PResult<NodeRef> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> PResult<NodeRef> {
        let lhs = self.parse_comparison()?;
        let op = match self.current().kind {
            TokenKind::Assign => BinOp::Assign,
            TokenKind::PlusEq => BinOp::AddAssign,
            TokenKind::MinusEq => BinOp::SubAssign,
            TokenKind::StarEq => BinOp::MulAssign,
            TokenKind::SlashEq => BinOp::DivAssign,
            TokenKind::ShlEq => BinOp::ShlAssign,
            TokenKind::ShrEq => BinOp::ShrAssign,
            TokenKind::AmpEq => BinOp::AndAssign,
            TokenKind::PipeEq => BinOp::OrAssign,
            TokenKind::CaretEq => BinOp::XorAssign,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.parse_assignment()?; // right-associative
        Ok(Rc::new(Node::Binary { op, lhs, rhs }))
    }

    fn parse_comparison(&mut self) -> PResult<NodeRef> {
        let mut lhs = self.parse_bitlogic()?;
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Ge => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_bitlogic()?;
            lhs = Rc::new(Node::Binary { op, lhs, rhs });
        }
        Ok(lhs)
    }

    fn parse_bitlogic(&mut self) -> PResult<NodeRef> {
        let mut lhs = self.parse_shift()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Amp => BinOp::BitAnd,
                TokenKind::Pipe => BinOp::BitOr,
                TokenKind::Caret => BinOp::BitXor,
                TokenKind::AndAnd => BinOp::And,
                TokenKind::OrOr => BinOp::Or,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_shift()?;
            lhs = Rc::new(Node::Binary { op, lhs, rhs });
        }
        Ok(lhs)
    }

    fn parse_shift(&mut self) -> PResult<NodeRef> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Shl => BinOp::Shl,
                TokenKind::Shr => BinOp::Shr,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = Rc::new(Node::Binary { op, lhs, rhs });
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> PResult<NodeRef> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Rc::new(Node::Binary { op, lhs, rhs });
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> PResult<NodeRef> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Rc::new(Node::Binary { op, lhs, rhs });
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<NodeRef> {
        let op = match self.current().kind {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Bang => UnOp::Not,
            TokenKind::Inc => UnOp::Inc,
            TokenKind::Dec => UnOp::Dec,
            _ => return self.parse_postfix_primary(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Rc::new(Node::Unary { op, operand }))
    }

    fn parse_postfix_primary(&mut self) -> PResult<NodeRef> {
        match self.current().kind {
            TokenKind::Integer => self.parse_integer(),
            TokenKind::Float => self.parse_float(),
            TokenKind::Str => {
                let tok = self.advance();
                Ok(Node::string(tok.text.to_string()))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(expr)
            }
            TokenKind::LBracket => self.parse_array(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwFor => self.parse_for(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::KwNew => self.parse_type_instance(),
            TokenKind::Symbol => self.parse_symbol_use(),
            found => Err(ParseError::Unexpected {
                found,
                span: self.current().span,
            }),
        }
    }

    fn parse_integer(&mut self) -> PResult<NodeRef> {
        let tok = self.advance();
        tok.text
            .parse::<i32>()
            .map(Node::integer)
            .map_err(|_| ParseError::InvalidInteger {
                text: tok.text.to_string(),
                span: tok.span,
            })
    }

    fn parse_float(&mut self) -> PResult<NodeRef> {
        let tok = self.advance();
        tok.text
            .parse::<f64>()
            .map(Node::float)
            .map_err(|_| ParseError::InvalidFloat {
                text: tok.text.to_string(),
                span: tok.span,
            })
    }

    /// Array literals require at least one element; `[]` has no parse.
    fn parse_array(&mut self) -> PResult<NodeRef> {
        self.advance(); // `[`
        let mut elements = Vec::new();
        loop {
            elements.push(self.parse_expr()?);
            if self.match_kind(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RBracket, "`]`")?;
            break;
        }
        Ok(Node::array(elements))
    }

    fn parse_type_instance(&mut self) -> PResult<NodeRef> {
        self.advance(); // `new`
        let type_name = self.expect_symbol("type name")?;
        let args = self.parse_args()?;
        Ok(Rc::new(Node::TypeInstance { type_name, args }))
    }

    /// Argument lists may be empty: `f()`.
    fn parse_args(&mut self) -> PResult<Vec<NodeRef>> {
        self.expect(TokenKind::LParen, "`(`")?;
        if self.match_kind(TokenKind::RParen) {
            return Ok(vec![]);
        }
        let mut args = Vec::new();
        loop {
            args.push(self.parse_expr()?);
            if self.match_kind(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen, "`)`")?;
            break;
        }
        Ok(args)
    }

    fn parse_symbol_use(&mut self) -> PResult<NodeRef> {
        let tok = self.advance();
        let name = Symbol::intern(&tok.text);
        match self.current().kind {
            TokenKind::LParen => {
                let args = self.parse_args()?;
                Ok(Rc::new(Node::Call { name, args }))
            }
            TokenKind::LBracket => {
                self.advance();
                let index = self.parse_expr()?;
                self.expect(TokenKind::RBracket, "`]`")?;
                Ok(Rc::new(Node::ArrayIndex { name, index }))
            }
            TokenKind::Dot => {
                self.advance();
                let field = self.expect_symbol("field name")?;
                Ok(Rc::new(Node::FieldAccess { instance: name, field }))
            }
            _ => Ok(Node::symbol(name)),
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> PResult<Vec<NodeRef>> {
    Parser::new(tokens).parse_program()
}
