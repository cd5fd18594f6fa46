//! UI elements inside `render`.
//!
//! ```text
//! heading(size: 1, text: title);
//! container(justify: "center") { ... }
//! ```

use crate::{
    compiler::render::{UiAttribute, UiElement},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser, stmt::parse_block};

pub fn parse_element_stmt(parser: &mut Parser) -> Result<(), Error> {
    if !parser.in_render {
        return Err(parser.unexpected("UI elements are only allowed inside render"));
    }

    let token = parser.advance();
    let element = UiElement::from_keyword(&token.value).ok_or_else(|| {
        ErrorImpl::UnexpectedToken {
            token: token.value.clone(),
        }
        .at(token.span.start.clone())
    })?;

    parser.compiler_mut().open_element(element);
    parser.expect(TokenKind::OpenParen)?;

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parse_attribute(parser, element)?;

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    if element.has_body() {
        parse_block(parser)?;
    } else {
        parser.expect(TokenKind::Semicolon)?;
    }

    parser.compiler_mut().close_element(element);
    Ok(())
}

/// Parses `name: value` and binds it to `element`.
fn parse_attribute(parser: &mut Parser, element: UiElement) -> Result<(), Error> {
    let attribute = match parser.current_token_kind() {
        TokenKind::Attribute => UiAttribute::from_keyword(&parser.current_token().value),
        _ => None,
    }
    .ok_or_else(|| parser.unexpected("expected an attribute"))?;

    if !element.accepts(attribute) {
        return Err(parser.unexpected(&format!(
            "`{}` does not take a `{}` attribute",
            element, attribute
        )));
    }

    parser.advance();
    parser.expect(TokenKind::Colon)?;
    parse_expr(parser)?;

    parser.semantic(|compiler| compiler.bind_attribute(attribute))
}
