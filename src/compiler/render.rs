//! UI elements of the `render` block.
//!
//! Elements open, receive attributes and close. Attribute values are plain
//! expressions evaluated through the same operand stack as everything else.

use std::fmt::Display;

use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    type_checker::types::Type,
};

use super::{
    compiler::Compiler,
    quadruple::{Opcode, Operand, Quadruple},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiElement {
    Container,
    Heading,
    Paragraph,
    Table,
    Image,
    Card,
    Layout,
}

impl UiElement {
    pub fn from_keyword(keyword: &str) -> Option<UiElement> {
        match keyword {
            "container" => Some(UiElement::Container),
            "heading" => Some(UiElement::Heading),
            "paragraph" => Some(UiElement::Paragraph),
            "table" => Some(UiElement::Table),
            "image" => Some(UiElement::Image),
            "card" => Some(UiElement::Card),
            "layout" => Some(UiElement::Layout),
            _ => None,
        }
    }

    /// Elements followed by a nested render block.
    pub fn has_body(self) -> bool {
        matches!(self, UiElement::Container | UiElement::Card | UiElement::Layout)
    }

    pub fn accepts(self, attribute: UiAttribute) -> bool {
        use UiAttribute::*;

        let allowed: &[UiAttribute] = match self {
            UiElement::Container => &[Justify, Background, Width, Position],
            UiElement::Heading => &[Size, Text],
            UiElement::Paragraph => &[Text],
            UiElement::Table => &[Header, Data],
            UiElement::Image => &[Source, Data],
            UiElement::Card => &[Header, Footer],
            UiElement::Layout => &[Padding, Grid, Gap],
        };

        allowed.contains(&attribute)
    }
}

impl Display for UiElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UiElement::Container => "container",
            UiElement::Heading => "heading",
            UiElement::Paragraph => "paragraph",
            UiElement::Table => "table",
            UiElement::Image => "image",
            UiElement::Card => "card",
            UiElement::Layout => "layout",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAttribute {
    Justify,
    Background,
    Width,
    Position,
    Text,
    Size,
    Header,
    Data,
    Source,
    Footer,
    Padding,
    Grid,
    Gap,
}

impl UiAttribute {
    pub fn from_keyword(keyword: &str) -> Option<UiAttribute> {
        match keyword {
            "justify" => Some(UiAttribute::Justify),
            "background" => Some(UiAttribute::Background),
            "width" => Some(UiAttribute::Width),
            "position" => Some(UiAttribute::Position),
            "text" => Some(UiAttribute::Text),
            "size" => Some(UiAttribute::Size),
            "header" => Some(UiAttribute::Header),
            "data" => Some(UiAttribute::Data),
            "source" => Some(UiAttribute::Source),
            "footer" => Some(UiAttribute::Footer),
            "padding" => Some(UiAttribute::Padding),
            "grid" => Some(UiAttribute::Grid),
            "gap" => Some(UiAttribute::Gap),
            _ => None,
        }
    }

    /// `None` accepts a value of any type.
    pub fn expected_type(self) -> Option<Type> {
        match self {
            UiAttribute::Width
            | UiAttribute::Size
            | UiAttribute::Padding
            | UiAttribute::Grid
            | UiAttribute::Gap => Some(Type::Int),
            UiAttribute::Justify
            | UiAttribute::Background
            | UiAttribute::Position
            | UiAttribute::Text
            | UiAttribute::Header
            | UiAttribute::Source
            | UiAttribute::Footer => Some(Type::String),
            UiAttribute::Data => None,
        }
    }
}

impl Display for UiAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UiAttribute::Justify => "justify",
            UiAttribute::Background => "background",
            UiAttribute::Width => "width",
            UiAttribute::Position => "position",
            UiAttribute::Text => "text",
            UiAttribute::Size => "size",
            UiAttribute::Header => "header",
            UiAttribute::Data => "data",
            UiAttribute::Source => "source",
            UiAttribute::Footer => "footer",
            UiAttribute::Padding => "padding",
            UiAttribute::Grid => "grid",
            UiAttribute::Gap => "gap",
        };
        write!(f, "{}", name)
    }
}

impl Compiler {
    pub fn open_element(&mut self, element: UiElement) {
        self.emit(Quadruple::unary(Opcode::Open, Operand::Element(element)));
    }

    /// Pops the evaluated attribute value and binds it to the open element.
    /// `data` also takes whole arrays and matrices, by base address.
    pub fn bind_attribute(&mut self, attribute: UiAttribute) -> SemanticResult<()> {
        let value = match attribute {
            UiAttribute::Data => self.pop_operand()?,
            _ => self.pop_value()?,
        };

        if let Some(expected) = attribute.expected_type() {
            if value.ty != expected {
                return Err(ErrorImpl::ExpectedType {
                    expected,
                    received: value.ty,
                });
            }
        }

        self.emit(Quadruple::new(
            Opcode::Attr,
            Some(value.operand),
            None,
            Some(Operand::Attribute(attribute)),
        ));
        Ok(())
    }

    pub fn close_element(&mut self, element: UiElement) {
        self.emit(Quadruple::unary(Opcode::Close, Operand::Element(element)));
    }
}
