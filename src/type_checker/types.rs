//! Primitive types and operators of the language.

use std::fmt::Display;

/// The four value types. `void` only exists as a return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    String,
    Bool,
}

impl Type {
    pub const ALL: [Type; 4] = [Type::Int, Type::Float, Type::String, Type::Bool];

    pub fn index(self) -> usize {
        match self {
            Type::Int => 0,
            Type::Float => 1,
            Type::String => 2,
            Type::Bool => 3,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn from_keyword(keyword: &str) -> Option<Type> {
        match keyword {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "string" => Some(Type::String),
            "bool" => Some(Type::Bool),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Value(Type),
}

impl Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReturnType::Void => write!(f, "void"),
            ReturnType::Value(ty) => write!(f, "{}", ty),
        }
    }
}

/// Shape of a subscripted variable. Scalars carry no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Array,
    Matrix,
}

impl Kind {
    pub fn rank(self) -> usize {
        match self {
            Kind::Array => 1,
            Kind::Matrix => 2,
        }
    }

    pub fn from_rank(rank: usize) -> Option<Kind> {
        match rank {
            1 => Some(Kind::Array),
            2 => Some(Kind::Matrix),
            _ => None,
        }
    }
}

/// Binary operators plus the assignment pseudo-operator, which the
/// semantic cube treats like any other operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
    Assign,
}

impl Operator {
    pub const ALL: [Operator; 13] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Star,
        Operator::Slash,
        Operator::Less,
        Operator::Greater,
        Operator::LessEquals,
        Operator::GreaterEquals,
        Operator::Equals,
        Operator::NotEquals,
        Operator::And,
        Operator::Or,
        Operator::Assign,
    ];

    pub fn index(self) -> usize {
        match self {
            Operator::Plus => 0,
            Operator::Minus => 1,
            Operator::Star => 2,
            Operator::Slash => 3,
            Operator::Less => 4,
            Operator::Greater => 5,
            Operator::LessEquals => 6,
            Operator::GreaterEquals => 7,
            Operator::Equals => 8,
            Operator::NotEquals => 9,
            Operator::And => 10,
            Operator::Or => 11,
            Operator::Assign => 12,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessEquals => "<=",
            Operator::GreaterEquals => ">=",
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Assign => "=",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
