//! Types, literals and declared dimensions.

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    type_checker::types::{ReturnType, Type},
};

use super::parser::Parser;

pub fn is_type_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Int | TokenKind::Float | TokenKind::StringType | TokenKind::Bool
    )
}

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    if !is_type_keyword(parser.current_token_kind()) {
        return Err(parser.unexpected("expected a type"));
    }

    let token = parser.advance();
    Type::from_keyword(&token.value).ok_or_else(|| {
        ErrorImpl::UnexpectedToken {
            token: token.value.clone(),
        }
        .at(token.span.start.clone())
    })
}

pub fn parse_return_type(parser: &mut Parser) -> Result<ReturnType, Error> {
    if parser.current_token_kind() == TokenKind::Void {
        parser.advance();
        return Ok(ReturnType::Void);
    }

    Ok(ReturnType::Value(parse_type(parser)?))
}

pub fn starts_literal(parser: &Parser) -> bool {
    match parser.current_token_kind() {
        TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False => true,
        TokenKind::Dash => parser.peek_kind(1) == TokenKind::Number,
        _ => false,
    }
}

/// Parses a numeric literal with an optional leading `-`.
pub fn parse_number(parser: &mut Parser) -> Result<(String, Type), Error> {
    let negative = if parser.current_token_kind() == TokenKind::Dash {
        parser.advance();
        true
    } else {
        false
    };

    let token = parser.expect(TokenKind::Number)?;
    let ty = if token.value.contains('.') {
        Type::Float
    } else {
        Type::Int
    };

    let text = if negative {
        format!("-{}", token.value)
    } else {
        token.value
    };

    let valid = match ty {
        Type::Int => text.parse::<i64>().is_ok(),
        _ => text.parse::<f64>().is_ok(),
    };
    if !valid {
        return Err(ErrorImpl::NumberParseError { token: text }.at(token.span.start));
    }

    Ok((text, ty))
}

/// Parses a literal and returns its text and type.
pub fn parse_literal(parser: &mut Parser) -> Result<(String, Type), Error> {
    match parser.current_token_kind() {
        TokenKind::Number | TokenKind::Dash => parse_number(parser),
        TokenKind::String => Ok((parser.advance().value, Type::String)),
        TokenKind::True | TokenKind::False => Ok((parser.advance().value, Type::Bool)),
        _ => Err(parser.unexpected("expected a literal")),
    }
}

/// Parses one `[size]` of a declaration.
pub fn parse_dimension(parser: &mut Parser) -> Result<usize, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let token = parser.expect(TokenKind::Number)?;

    let size = token.value.parse::<usize>().map_err(|_| {
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
        }
        .at(token.span.start.clone())
    })?;
    if size == 0 {
        return Err(ErrorImpl::UnexpectedTokenDetailed {
            token: token.value,
            message: String::from("dimensions must be at least 1"),
        }
        .at(token.span.start));
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(size)
}
