//! Array and matrix addressing.
//!
//! Elements are stored row-major from the variable's base address. An access
//! `m[i][j]` on a `[rows][cols]` matrix checks each index against its bound
//! and computes `base + i * cols + j` into a temporary, which is then used as
//! a [`Operand::Pointer`] wherever the element is read or written.

use tracing::debug;

use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    symbols::directory::VariableEntry,
    type_checker::{
        semantic_cube::combine,
        types::{Operator, Type},
    },
};

use super::{
    compiler::{Compiler, OperandItem, OperatorItem},
    quadruple::{Opcode, Operand, Quadruple},
};

/// State of one subscripted access while its indices are compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessFrame {
    pub name: String,
    pub variable: VariableEntry,
    /// Linear offset accumulated so far.
    pub offset: Option<Operand>,
}

impl Compiler {
    /// Starts indexing `name`, which must be on top of the operand stack as
    /// a whole array or matrix.
    pub fn begin_indexing(&mut self, name: &str) -> SemanticResult<()> {
        let item = self.pop_operand()?;
        let variable = self.directory.resolve_variable(self.current, name)?.clone();

        if item.whole.as_deref() != Some(name) {
            return Err(ErrorImpl::DimensionMismatch {
                variable: name.to_string(),
                expected: variable.rank(),
                received: 1,
            });
        }

        self.access_frames.push(AccessFrame {
            name: name.to_string(),
            variable,
            offset: None,
        });
        Ok(())
    }

    fn access_frame(&self, name: &str) -> SemanticResult<&AccessFrame> {
        match self.access_frames.last() {
            Some(frame) if frame.name == name => Ok(frame),
            Some(frame) => Err(ErrorImpl::MalformedExpression {
                expected: name.to_string(),
                found: frame.name.clone(),
            }),
            None => Err(ErrorImpl::StackUnderflow {
                stack: String::from("access"),
            }),
        }
    }

    /// Fails once `seen`, the number of indices supplied so far, goes past
    /// the rank of `name`.
    pub fn verify_dimension_match(&self, name: &str, seen: usize) -> SemanticResult<()> {
        let frame = self.access_frame(name)?;
        let rank = frame.variable.rank();

        if seen > rank {
            return Err(ErrorImpl::DimensionMismatch {
                variable: name.to_string(),
                expected: rank,
                received: seen,
            });
        }
        Ok(())
    }

    /// Folds the index just evaluated, the `seen`-th one, into the offset.
    pub fn compute_offset(&mut self, name: &str, seen: usize) -> SemanticResult<()> {
        self.verify_dimension_match(name, seen)?;
        let index = self.pop_value()?;

        if index.ty != Type::Int {
            return Err(ErrorImpl::ExpectedType {
                expected: Type::Int,
                received: index.ty,
            });
        }

        let frame = self.access_frame(name)?;
        let dimensions = frame.variable.dimensions.clone();
        let offset = frame.offset.clone();
        let size = seen
            .checked_sub(1)
            .and_then(|position| dimensions.get(position))
            .ok_or(ErrorImpl::MalformedExpression {
                expected: String::from("index position"),
                found: seen.to_string(),
            })?;
        let bound = *size as i64 - 1;

        self.emit(Quadruple::new(
            Opcode::Verify,
            Some(index.operand.clone()),
            Some(Operand::Immediate(0)),
            Some(Operand::Immediate(bound)),
        ));

        let offset = match (offset, dimensions.get(seen)) {
            // First index of a matrix: scale by the row length.
            (None, Some(columns)) => {
                let scaled = self.new_temporary()?;
                self.emit(Quadruple::binary(
                    Operator::Star,
                    index.operand,
                    Operand::Immediate(*columns as i64),
                    Operand::Address(scaled),
                ));
                Operand::Address(scaled)
            }
            (None, None) => index.operand,
            (Some(offset), _) => {
                let sum = self.new_temporary()?;
                self.emit(Quadruple::binary(
                    Operator::Plus,
                    offset,
                    index.operand,
                    Operand::Address(sum),
                ));
                Operand::Address(sum)
            }
        };

        if let Some(frame) = self.access_frames.last_mut() {
            frame.offset = Some(offset);
        }
        Ok(())
    }

    /// Finishes the access after `seen` indices and pushes a pointer to the
    /// element.
    pub fn end_indexing(&mut self, name: &str, seen: usize) -> SemanticResult<()> {
        self.access_frame(name)?;
        let frame = self.access_frames.pop().ok_or(ErrorImpl::StackUnderflow {
            stack: String::from("access"),
        })?;
        let rank = frame.variable.rank();

        let offset = match frame.offset {
            Some(offset) if seen == rank => offset,
            _ => {
                return Err(ErrorImpl::DimensionMismatch {
                    variable: name.to_string(),
                    expected: rank,
                    received: seen,
                })
            }
        };

        let pointer = self.new_temporary()?;
        self.emit(Quadruple::binary(
            Operator::Plus,
            offset,
            Operand::Immediate(frame.variable.address as i64),
            Operand::Address(pointer),
        ));
        debug!(variable = name, pointer, "resolved element address");

        self.push_item(OperandItem::value(
            Operand::Pointer(pointer),
            frame.variable.ty,
        ));
        Ok(())
    }

    /// Completes `name = [e0, …, en]`. The whole array sits under `=` on
    /// the stacks, followed by the `count` evaluated elements. Only arrays
    /// can be assigned this way, one element per declared slot.
    pub fn apply_array_assignment(&mut self, name: &str, count: usize) -> SemanticResult<()> {
        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            elements.push(self.pop_value()?);
        }
        elements.reverse();

        self.pop_operator(Some(OperatorItem::Operator(Operator::Assign)))?;
        let destination = self.pop_operand()?;
        let variable = self.directory.resolve_variable(self.current, name)?.clone();

        if destination.whole.as_deref() != Some(name) || variable.rank() != 1 {
            return Err(ErrorImpl::DimensionMismatch {
                variable: name.to_string(),
                expected: variable.rank(),
                received: 1,
            });
        }
        if count != variable.size() {
            return Err(ErrorImpl::ElementCountMismatch {
                variable: name.to_string(),
                expected: variable.size(),
                received: count,
            });
        }

        for (offset, element) in elements.into_iter().enumerate() {
            combine(Operator::Assign, variable.ty, element.ty)?;
            self.emit(Quadruple::assign(
                element.operand,
                Operand::Address(variable.address + offset as u32),
            ));
        }
        Ok(())
    }
}
