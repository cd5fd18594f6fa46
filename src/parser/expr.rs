//! Expressions, one function per precedence level.
//!
//! The additive and multiplicative levels are right recursive and apply the
//! pending operator of their own level as soon as an operand is complete,
//! which keeps them left associative. The comparison, equality and logical
//! levels take at most one operator each.

use crate::{
    errors::errors::Error, lexer::tokens::TokenKind, type_checker::types::Operator,
};

use super::{
    parser::Parser,
    types::{parse_literal, starts_literal},
};

const ADDITIVE: [Operator; 2] = [Operator::Plus, Operator::Minus];
const MULTIPLICATIVE: [Operator; 2] = [Operator::Star, Operator::Slash];

fn binary_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Or => Some(Operator::Or),
        TokenKind::And => Some(Operator::And),
        TokenKind::Equals => Some(Operator::Equals),
        TokenKind::NotEquals => Some(Operator::NotEquals),
        TokenKind::Less => Some(Operator::Less),
        TokenKind::Greater => Some(Operator::Greater),
        TokenKind::LessEquals => Some(Operator::LessEquals),
        TokenKind::GreaterEquals => Some(Operator::GreaterEquals),
        TokenKind::Plus => Some(Operator::Plus),
        TokenKind::Dash => Some(Operator::Minus),
        TokenKind::Star => Some(Operator::Star),
        TokenKind::Slash => Some(Operator::Slash),
        _ => None,
    }
}

/// Parses `operand (op operand)?` for one single-operator level.
fn parse_single_level(
    parser: &mut Parser,
    operators: &[Operator],
    operand: fn(&mut Parser) -> Result<(), Error>,
) -> Result<(), Error> {
    operand(parser)?;

    match binary_operator(parser.current_token_kind()) {
        Some(operator) if operators.contains(&operator) => {
            parser.advance();
            parser.compiler_mut().push_operator(operator);
            operand(parser)?;
            parser.semantic(|compiler| compiler.apply_operation())
        }
        _ => Ok(()),
    }
}

/// Parses `operand (op level)?` for one chaining level.
fn parse_chained_level(
    parser: &mut Parser,
    operators: &[Operator],
    operand: fn(&mut Parser) -> Result<(), Error>,
    level: fn(&mut Parser) -> Result<(), Error>,
) -> Result<(), Error> {
    operand(parser)?;
    parser.semantic(|compiler| compiler.maybe_apply_pending_operation(operators))?;

    match binary_operator(parser.current_token_kind()) {
        Some(operator) if operators.contains(&operator) => {
            parser.advance();
            parser.compiler_mut().push_operator(operator);
            level(parser)
        }
        _ => Ok(()),
    }
}

pub fn parse_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_single_level(parser, &[Operator::Or], parse_and_expr)
}

fn parse_and_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_single_level(parser, &[Operator::And], parse_equality_expr)
}

fn parse_equality_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_single_level(
        parser,
        &[Operator::Equals, Operator::NotEquals],
        parse_comparison_expr,
    )
}

fn parse_comparison_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_single_level(
        parser,
        &[
            Operator::Less,
            Operator::Greater,
            Operator::LessEquals,
            Operator::GreaterEquals,
        ],
        parse_additive_expr,
    )
}

fn parse_additive_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_chained_level(
        parser,
        &ADDITIVE,
        parse_multiplicative_expr,
        parse_additive_expr,
    )
}

fn parse_multiplicative_expr(parser: &mut Parser) -> Result<(), Error> {
    parse_chained_level(parser, &MULTIPLICATIVE, parse_atom_expr, parse_multiplicative_expr)
}

fn parse_atom_expr(parser: &mut Parser) -> Result<(), Error> {
    if starts_literal(parser) {
        let (text, ty) = parse_literal(parser)?;
        return parser.semantic(|compiler| compiler.push_literal(&text, ty));
    }

    match parser.current_token_kind() {
        TokenKind::OpenParen => parse_grouping_expr(parser),
        TokenKind::Identifier if parser.peek_kind(1) == TokenKind::OpenParen => {
            parse_call_expr(parser, true)
        }
        TokenKind::Identifier => parse_variable_expr(parser),
        _ => Err(parser.unexpected("expected an expression")),
    }
}

fn parse_grouping_expr(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::OpenParen)?;
    parser.compiler_mut().push_fake_floor();
    parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.semantic(|compiler| compiler.pop_fake_floor())
}

/// Parses `name(args)`. `as_value` is set when the result is used inside an
/// expression.
pub fn parse_call_expr(parser: &mut Parser, as_value: bool) -> Result<(), Error> {
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.semantic(|compiler| compiler.begin_call(&name))?;
    parser.expect(TokenKind::OpenParen)?;

    let mut supplied = 0;
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parse_expr(parser)?;
            parser.semantic(|compiler| compiler.bind_param(&name, supplied))?;
            supplied += 1;

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.semantic(|compiler| compiler.end_call(&name, supplied, as_value))
}

/// Parses a variable reference, with its indices if it has any.
pub fn parse_variable_expr(parser: &mut Parser) -> Result<(), Error> {
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.semantic(|compiler| compiler.push_operand(&name))?;

    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(());
    }

    parser.semantic(|compiler| compiler.begin_indexing(&name))?;
    let mut seen = 0;
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        parser.compiler_mut().push_fake_floor();
        parse_expr(parser)?;
        parser.expect(TokenKind::CloseBracket)?;
        parser.semantic(|compiler| compiler.pop_fake_floor())?;

        seen += 1;
        parser.semantic(|compiler| compiler.compute_offset(&name, seen))?;
    }

    parser.semantic(|compiler| compiler.end_indexing(&name, seen))
}
