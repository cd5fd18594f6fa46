use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{parser::Parser, render::parse_element_stmt, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<(), Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Local declarations
    parser.stmt(TokenKind::Int, parse_var_decl_stmt);
    parser.stmt(TokenKind::Float, parse_var_decl_stmt);
    parser.stmt(TokenKind::StringType, parse_var_decl_stmt);
    parser.stmt(TokenKind::Bool, parse_var_decl_stmt);

    // Assignments and calls
    parser.stmt(TokenKind::Identifier, parse_identifier_stmt);

    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Print, parse_print_stmt);

    parser.stmt(TokenKind::Element, parse_element_stmt);
}

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
