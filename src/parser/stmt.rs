use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{
    decl::{parse_assigned_value, parse_var_decl},
    expr::{parse_call_expr, parse_expr, parse_variable_expr},
    parser::Parser,
    types::parse_number,
};

/// Parses one statement through the lookup table. Every statement must
/// leave the evaluation stacks empty.
pub fn parse_stmt(parser: &mut Parser) -> Result<(), Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser)?,
        None => return Err(parser.unexpected("expected a statement")),
    }

    parser.semantic(|compiler| compiler.end_statement())
}

/// Parses `{ statements }`.
pub fn parse_block(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::OpenCurly)?;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `}`"));
        }
        parse_stmt(parser)?;
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(())
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<(), Error> {
    parse_var_decl(parser, false)
}

/// Either a call whose result is discarded or an assignment.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Result<(), Error> {
    if parser.peek_kind(1) == TokenKind::OpenParen {
        parse_call_expr(parser, false)?;
    } else {
        let name = parser.current_token().value.clone();
        parse_variable_expr(parser)?;
        parse_assigned_value(parser, &name, false)?;
    }

    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

fn parse_condition(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::OpenParen)?;
    parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.semantic(|compiler| compiler.begin_condition())
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::If)?;
    parse_condition(parser)?;
    parse_block(parser)?;

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parser.semantic(|compiler| compiler.begin_else())?;
        parse_block(parser)?;
    }

    parser.semantic(|compiler| compiler.end_condition())
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::While)?;
    parser.compiler_mut().begin_while();
    parse_condition(parser)?;
    parse_block(parser)?;

    parser.semantic(|compiler| compiler.end_while())
}

/// Parses `for (i = start to bound step n) { ... }`. The step is an
/// optional numeric literal.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::OpenParen)?;

    let control = parser.expect(TokenKind::Identifier)?.value;
    parser.semantic(|compiler| compiler.begin_for(&control))?;
    parser.expect(TokenKind::Assignment)?;
    parse_expr(parser)?;
    parser.semantic(|compiler| compiler.for_initialized())?;

    parser.expect(TokenKind::To)?;
    parse_expr(parser)?;

    let step = if parser.current_token_kind() == TokenKind::Step {
        parser.advance();
        Some(parse_number(parser)?)
    } else {
        None
    };
    parser.semantic(|compiler| {
        compiler.for_bound(step.as_ref().map(|(text, ty)| (text.as_str(), *ty)))
    })?;
    parser.expect(TokenKind::CloseParen)?;

    parse_block(parser)?;
    parser.semantic(|compiler| compiler.end_for())
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Return)?;

    let has_value = parser.current_token_kind() != TokenKind::Semicolon;
    if has_value {
        parse_expr(parser)?;
    }
    parser.semantic(|compiler| compiler.handle_return(has_value))?;

    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}

/// Parses `print(e, ...);`, printing each value in order.
pub fn parse_print_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Print)?;
    parser.expect(TokenKind::OpenParen)?;

    loop {
        parse_expr(parser)?;
        parser.semantic(|compiler| compiler.handle_print())?;

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(())
}
