//! The syntax-directed driver.
//!
//! This module contains the main Parser struct. The parser never builds a
//! tree: it recognises the grammar by recursive descent and calls into the
//! [`Compiler`] at fixed points of every rule, which is where all semantic
//! checks happen and all quadruples are emitted.
//!
//! Statements are dispatched through a lookup table keyed by the token that
//! starts them; declarations, expressions and UI elements each have their
//! own submodule.

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    compiler::compiler::{Compiler, Program},
    errors::errors::{Error, ErrorImpl, SemanticResult},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    decl::parse_page,
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Receives the grammar actions
    compiler: Compiler,
    /// Set while compiling the body of `render`, the only place UI elements
    /// may appear
    pub(super) in_render: bool,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse, ending with `EOF`
    /// * `file` - Reference-counted string containing the source file name
    /// * `compiler` - The context grammar actions are sent to
    pub fn new(tokens: Vec<Token>, file: Rc<String>, compiler: Compiler) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            compiler,
            in_render: false,
        }
    }

    /// Returns the current token without advancing. Past the end this is
    /// the final `EOF` token.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token `offset` places ahead of the current one.
    pub fn peek(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek(offset).kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();

        if token.kind != expected_kind {
            return Err(error.unwrap_or_else(|| {
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                }
                .at(token.span.start.clone())
            }));
        }

        Ok(self.advance())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an `UnexpectedTokenDetailed` error for the current token.
    pub fn unexpected(&self, message: &str) -> Error {
        let token = self.current_token();
        ErrorImpl::UnexpectedTokenDetailed {
            token: token.value.clone(),
            message: message.to_string(),
        }
        .at(token.span.start.clone())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the last consumed token, which is the one a
    /// grammar action refers to.
    pub fn get_position(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(token) => token.span.start.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }

    /// Runs a grammar action, attaching the current position to its error.
    pub fn semantic<T>(
        &mut self,
        action: impl FnOnce(&mut Compiler) -> SemanticResult<T>,
    ) -> Result<T, Error> {
        let position = self.get_position();
        action(&mut self.compiler).map_err(|error| error.at(position))
    }

    /// Direct access for grammar actions that cannot fail.
    pub fn compiler_mut(&mut self) -> &mut Compiler {
        &mut self.compiler
    }

    fn finish(self) -> Result<Program, Error> {
        let position = self.get_position();
        self.compiler.program_end().map_err(|error| error.at(position))
    }
}

/// Parses a stream of tokens, compiling it as it goes.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables and parses one `page`.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse, as produced by the lexer: the
///   last one must be `EOF`
/// * `file` - Reference-counted string containing the source file name
/// * `compiler` - A fresh compilation context
///
/// # Returns
///
/// The compiled [`Program`], or the first error found.
pub fn parse(tokens: Vec<Token>, file: Rc<String>, compiler: Compiler) -> Result<Program, Error> {
    match tokens.last() {
        Some(token) if token.kind == TokenKind::EOF => {}
        last => {
            return Err(ErrorImpl::UnexpectedTokenDetailed {
                token: last.map(|token| token.value.clone()).unwrap_or_default(),
                message: String::from("the token stream must end with EOF"),
            }
            .at(last.map_or(Position(0, Rc::clone(&file)), |token| {
                token.span.start.clone()
            })));
        }
    }

    let mut parser = Parser::new(tokens, file, compiler);
    create_token_lookups(&mut parser);

    let name = parse_page(&mut parser)?;
    parser.expect(TokenKind::EOF)?;
    debug!(page = %name, "parsed page");

    parser.finish()
}
