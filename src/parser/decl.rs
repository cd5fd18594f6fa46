//! Page structure and declarations.
//!
//! A page is `page Name;` followed by global declarations, functions and
//! finally `void render() { ... }`.

use tracing::debug;

use crate::{
    errors::errors::Error,
    lexer::tokens::TokenKind,
    symbols::directory::VariableDecl,
    type_checker::types::{Operator, Type},
};

use super::{
    expr::parse_expr,
    parser::Parser,
    stmt::parse_block,
    types::{is_type_keyword, parse_dimension, parse_literal, parse_return_type, parse_type},
};

/// Parses a whole page and returns its name.
pub fn parse_page(parser: &mut Parser) -> Result<String, Error> {
    parser.expect(TokenKind::Page)?;
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Semicolon)?;

    // `int f(` starts a function, anything else typed is a global
    while is_type_keyword(parser.current_token_kind())
        && parser.peek_kind(2) != TokenKind::OpenParen
    {
        parse_var_decl(parser, true)?;
        parser.semantic(|compiler| compiler.end_statement())?;
    }

    parser.compiler_mut().program_start();

    while !(parser.current_token_kind() == TokenKind::Void
        && parser.peek_kind(1) == TokenKind::Render)
    {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `void render()`"));
        }
        parse_function(parser)?;
    }

    parse_render(parser)?;
    Ok(name)
}

/// Parses `type a, b[2], m[2][3] = ...;`.
///
/// Globals may only be initialised with literals; locals take any
/// expression. Each name is declared before its initialiser is compiled.
pub fn parse_var_decl(parser: &mut Parser, global: bool) -> Result<(), Error> {
    let ty = parse_type(parser)?;

    loop {
        let name = parser
            .expect_error(
                TokenKind::Identifier,
                Some(parser.unexpected("expected identifier during variable declaration")),
            )?
            .value;

        let mut dimensions = vec![];
        while parser.current_token_kind() == TokenKind::OpenBracket {
            if dimensions.len() == 2 {
                return Err(parser.unexpected("variables have at most two dimensions"));
            }
            dimensions.push(parse_dimension(parser)?);
        }

        let declaration = if dimensions.is_empty() {
            VariableDecl::scalar(&name, ty)
        } else {
            VariableDecl::subscripted(&name, ty, dimensions)
        };
        parser.semantic(|compiler| compiler.declare_variables(&[declaration]))?;

        if parser.current_token_kind() == TokenKind::Assignment {
            parser.semantic(|compiler| compiler.push_operand(&name))?;
            parse_assigned_value(parser, &name, global)?;
        }

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

/// Parses `= value` once the destination is on the operand stack. The value
/// is either a single expression or an array literal `[e0, e1, ...]`.
pub fn parse_assigned_value(
    parser: &mut Parser,
    name: &str,
    literals_only: bool,
) -> Result<(), Error> {
    parser.expect(TokenKind::Assignment)?;
    parser.compiler_mut().push_operator(Operator::Assign);

    if parser.current_token_kind() != TokenKind::OpenBracket {
        parse_value(parser, literals_only)?;
        return parser.semantic(|compiler| compiler.apply_assignment());
    }

    parser.advance();
    let mut count = 0;
    loop {
        parse_value(parser, literals_only)?;
        count += 1;

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }
    parser.expect(TokenKind::CloseBracket)?;

    parser.semantic(|compiler| compiler.apply_array_assignment(name, count))
}

fn parse_value(parser: &mut Parser, literals_only: bool) -> Result<(), Error> {
    if !literals_only {
        return parse_expr(parser);
    }

    let (text, ty) = parse_literal(parser)?;
    parser.semantic(|compiler| compiler.push_literal(&text, ty))
}

fn parse_params(parser: &mut Parser) -> Result<Vec<(Type, String)>, Error> {
    let mut params = vec![];
    if parser.current_token_kind() == TokenKind::CloseParen {
        return Ok(params);
    }

    loop {
        let ty = parse_type(parser)?;
        let name = parser.expect(TokenKind::Identifier)?.value;
        params.push((ty, name));

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    Ok(params)
}

/// Parses `<type|void> name(params) { ... }`.
fn parse_function(parser: &mut Parser) -> Result<(), Error> {
    let return_type = parse_return_type(parser)?;
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.semantic(|compiler| compiler.register_function(&name, return_type))?;

    parser.expect(TokenKind::OpenParen)?;
    let params = parse_params(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.semantic(|compiler| compiler.declare_params(&params))?;

    parse_block(parser)?;
    parser.semantic(|compiler| compiler.close_function())?;

    debug!(function = %name, params = params.len(), "parsed function");
    Ok(())
}

/// Parses `void render() { ... }`. Its body is closed by the end of the
/// program, not here.
fn parse_render(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Void)?;
    parser.expect(TokenKind::Render)?;
    parser.expect(TokenKind::OpenParen)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.semantic(|compiler| compiler.register_render())?;

    parser.in_render = true;
    parse_block(parser)
}
