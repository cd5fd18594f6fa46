//! Quadruples and the instruction list.
//!
//! The instruction list is append-only. The only mutation allowed after an
//! instruction is emitted is resolving a [`Operand::Pending`] jump target,
//! exactly once, through [`InstructionList::backpatch`].

use std::fmt::Display;

use tracing::debug;

use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    type_checker::types::Operator,
};

use super::render::{UiAttribute, UiElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Operator(Operator),
    Goto,
    GotoF,
    Era,
    Param,
    Gosub,
    Return,
    EndFunc,
    Verify,
    Print,
    Open,
    Attr,
    Close,
    End,
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Opcode::Operator(operator) => write!(f, "{}", operator),
            Opcode::Goto => write!(f, "goto"),
            Opcode::GotoF => write!(f, "gotoF"),
            Opcode::Era => write!(f, "era"),
            Opcode::Param => write!(f, "param"),
            Opcode::Gosub => write!(f, "gosub"),
            Opcode::Return => write!(f, "return"),
            Opcode::EndFunc => write!(f, "endfunc"),
            Opcode::Verify => write!(f, "ver"),
            Opcode::Print => write!(f, "print"),
            Opcode::Open => write!(f, "open"),
            Opcode::Attr => write!(f, "attr"),
            Opcode::Close => write!(f, "close"),
            Opcode::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A variable, temporary or constant slot.
    Address(u32),
    /// A temporary holding the address of an array element.
    Pointer(u32),
    /// A value known at compile time (bounds, sizes, base addresses).
    Immediate(i64),
    Jump(usize),
    /// Jump target not known yet.
    Pending,
    Function(String),
    Param(usize),
    Element(UiElement),
    Attribute(UiAttribute),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Address(address) => write!(f, "{}", address),
            Operand::Pointer(address) => write!(f, "({})", address),
            Operand::Immediate(value) => write!(f, "#{}", value),
            Operand::Jump(index) => write!(f, "@{}", index),
            Operand::Pending => write!(f, "_"),
            Operand::Function(name) => write!(f, "{}", name),
            Operand::Param(position) => write!(f, "param{}", position),
            Operand::Element(element) => write!(f, "{}", element),
            Operand::Attribute(attribute) => write!(f, "{}", attribute),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quadruple {
    pub op: Opcode,
    pub left: Option<Operand>,
    pub right: Option<Operand>,
    pub result: Option<Operand>,
}

impl Quadruple {
    pub fn new(
        op: Opcode,
        left: Option<Operand>,
        right: Option<Operand>,
        result: Option<Operand>,
    ) -> Self {
        Quadruple {
            op,
            left,
            right,
            result,
        }
    }

    pub fn binary(operator: Operator, left: Operand, right: Operand, result: Operand) -> Self {
        Quadruple::new(
            Opcode::Operator(operator),
            Some(left),
            Some(right),
            Some(result),
        )
    }

    pub fn assign(source: Operand, destination: Operand) -> Self {
        Quadruple::new(
            Opcode::Operator(Operator::Assign),
            Some(source),
            None,
            Some(destination),
        )
    }

    pub fn jump(op: Opcode, condition: Option<Operand>, target: Operand) -> Self {
        Quadruple::new(op, condition, None, Some(target))
    }

    pub fn unary(op: Opcode, operand: Operand) -> Self {
        Quadruple::new(op, Some(operand), None, None)
    }

    pub fn bare(op: Opcode) -> Self {
        Quadruple::new(op, None, None, None)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.result, Some(Operand::Pending))
    }
}

impl Display for Quadruple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = |operand: &Option<Operand>| match operand {
            Some(operand) => operand.to_string(),
            None => String::from("-"),
        };

        write!(
            f,
            "{} {} {} {}",
            self.op,
            field(&self.left),
            field(&self.right),
            field(&self.result)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstructionList {
    quadruples: Vec<Quadruple>,
}

impl InstructionList {
    pub fn new() -> Self {
        InstructionList::default()
    }

    /// Appends a quadruple and returns its index.
    pub fn emit(&mut self, quadruple: Quadruple) -> usize {
        let index = self.quadruples.len();
        debug!(index, quadruple = %quadruple, "added instruction");
        self.quadruples.push(quadruple);
        index
    }

    /// Resolves the pending jump at `index` to `target`.
    pub fn backpatch(&mut self, index: usize, target: usize) -> SemanticResult<()> {
        match self.quadruples.get_mut(index) {
            Some(quadruple) if quadruple.is_pending() => {
                quadruple.result = Some(Operand::Jump(target));
                debug!(index, target, "filled pending jump");
                Ok(())
            }
            _ => Err(ErrorImpl::InvalidBackpatch { index }),
        }
    }

    pub fn len(&self) -> usize {
        self.quadruples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quadruples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Quadruple> {
        self.quadruples.get(index)
    }

    pub fn as_slice(&self) -> &[Quadruple] {
        &self.quadruples
    }

    pub fn pending_count(&self) -> usize {
        self.quadruples.iter().filter(|quadruple| quadruple.is_pending()).count()
    }

    pub fn into_vec(self) -> Vec<Quadruple> {
        self.quadruples
    }
}
