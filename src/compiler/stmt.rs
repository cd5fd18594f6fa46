//! Control flow, `return` and `print`.
//!
//! Conditionals and loops leave the index of every forward jump on the jump
//! stack and resolve it once the target is known. The stack's order follows
//! the nesting of the constructs, so the innermost one is always resolved
//! first.

use tracing::debug;

use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    type_checker::{
        semantic_cube::combine,
        types::{Operator, ReturnType, Type},
    },
};

use super::{
    compiler::{Compiler, JumpItem, OperandItem},
    quadruple::{Opcode, Operand, Quadruple},
};

/// State of one open `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForFrame {
    pub control: OperandItem,
    /// Constant slot holding the step, filled in by `for_bound`.
    pub step: Option<u32>,
}

impl Compiler {
    /// Pops the evaluated condition and emits the jump taken when it is false.
    pub fn begin_condition(&mut self) -> SemanticResult<()> {
        let condition = self.pop_value()?;
        combine(Operator::Assign, Type::Bool, condition.ty)?;

        let index = self.emit(Quadruple::jump(
            Opcode::GotoF,
            Some(condition.operand),
            Operand::Pending,
        ));
        self.push_jump(JumpItem::Pending(index));
        Ok(())
    }

    pub fn begin_else(&mut self) -> SemanticResult<()> {
        let false_jump = self.pop_pending_jump()?;

        let index = self.emit(Quadruple::jump(Opcode::Goto, None, Operand::Pending));
        self.push_jump(JumpItem::Pending(index));
        self.backpatch_here(false_jump)
    }

    pub fn end_condition(&mut self) -> SemanticResult<()> {
        let index = self.pop_pending_jump()?;
        self.backpatch_here(index)
    }

    /// Records where the loop condition starts being evaluated.
    pub fn begin_while(&mut self) {
        let start = self.next_index();
        self.push_jump(JumpItem::LoopStart(start));
    }

    pub fn end_while(&mut self) -> SemanticResult<()> {
        let false_jump = self.pop_pending_jump()?;
        let start = match self.pop_jump()? {
            JumpItem::LoopStart(start) => start,
            JumpItem::Pending(index) => {
                return Err(ErrorImpl::MalformedExpression {
                    expected: String::from("loop start"),
                    found: format!("pending jump {}", index),
                })
            }
        };

        self.emit(Quadruple::jump(Opcode::Goto, None, Operand::Jump(start)));
        self.backpatch_here(false_jump)
    }

    /// Opens `for (control = start to bound step n)`. The control variable
    /// must be a numeric scalar. Leaves it on the operand stack under `=` so
    /// the start expression can be evaluated and assigned.
    pub fn begin_for(&mut self, control: &str) -> SemanticResult<()> {
        self.push_operand(control)?;
        let item = self.pop_value()?;

        if !item.ty.is_numeric() {
            return Err(ErrorImpl::ExpectedType {
                expected: Type::Int,
                received: item.ty,
            });
        }

        self.for_frames.push(ForFrame {
            control: item.clone(),
            step: None,
        });
        self.push_item(item);
        self.push_operator(Operator::Assign);
        Ok(())
    }

    /// Assigns the evaluated start value to the control variable.
    pub fn for_initialized(&mut self) -> SemanticResult<()> {
        self.apply_assignment()
    }

    /// Closes the loop header once the bound has been evaluated.
    ///
    /// The bound is copied into a temporary so it is evaluated once. The
    /// loop runs while `control <= bound` for a positive step and while
    /// `control >= bound` for a negative one. `step` is the literal text and
    /// its type, `1` when absent.
    pub fn for_bound(&mut self, step: Option<(&str, Type)>) -> SemanticResult<()> {
        let (text, step_ty) = step.unwrap_or(("1", Type::Int));
        let value: f64 = text.parse().map_err(|_| ErrorImpl::NumberParseError {
            token: text.to_string(),
        })?;
        if value == 0.0 {
            return Err(ErrorImpl::InvalidStep);
        }

        let control = self
            .for_frames
            .last()
            .map(|frame| frame.control.clone())
            .ok_or(ErrorImpl::StackUnderflow {
                stack: String::from("for"),
            })?;
        let next_ty = combine(Operator::Plus, control.ty, step_ty)?;
        combine(Operator::Assign, control.ty, next_ty)?;

        let bound = self.pop_value()?;
        combine(Operator::LessEquals, control.ty, bound.ty)?;

        let snapshot = self.new_temporary()?;
        self.emit(Quadruple::assign(bound.operand, Operand::Address(snapshot)));

        self.begin_while();

        let comparison = if value > 0.0 {
            Operator::LessEquals
        } else {
            Operator::GreaterEquals
        };
        let keep_going = self.new_temporary()?;
        self.emit(Quadruple::binary(
            comparison,
            control.operand.clone(),
            Operand::Address(snapshot),
            Operand::Address(keep_going),
        ));
        self.push_item(OperandItem::value(Operand::Address(keep_going), Type::Bool));
        self.begin_condition()?;

        let step_address = self
            .literals
            .address_of(text, step_ty, self.allocator.as_mut())?;
        if let Some(frame) = self.for_frames.last_mut() {
            frame.step = Some(step_address);
        }
        debug!(control = %control.operand, step = text, "opened for loop");

        Ok(())
    }

    /// Emits `control = control + step` and jumps back to the comparison.
    pub fn end_for(&mut self) -> SemanticResult<()> {
        let frame = self.for_frames.pop().ok_or(ErrorImpl::StackUnderflow {
            stack: String::from("for"),
        })?;
        let step = frame.step.ok_or(ErrorImpl::MalformedExpression {
            expected: String::from("for loop bound"),
            found: String::from("end of loop"),
        })?;

        let next = self.new_temporary()?;
        self.emit(Quadruple::binary(
            Operator::Plus,
            frame.control.operand.clone(),
            Operand::Address(step),
            Operand::Address(next),
        ));
        self.emit(Quadruple::assign(Operand::Address(next), frame.control.operand));

        self.end_while()
    }

    /// Checks a `return` against the current function's signature. When
    /// `has_value` is set the value has already been evaluated.
    pub fn handle_return(&mut self, has_value: bool) -> SemanticResult<()> {
        let function = self.directory.get(self.current);
        let (name, return_type, slot) = (
            function.name.clone(),
            function.return_type,
            function.return_slot,
        );

        if self.current.is_global() {
            return Err(ErrorImpl::InvalidReturn { function: name });
        }

        match (return_type, has_value, slot) {
            (ReturnType::Void, false, _) => {
                self.emit(Quadruple::bare(Opcode::Return));
                Ok(())
            }
            (ReturnType::Value(ty), true, Some(slot)) => {
                let value = self.pop_value()?;
                combine(Operator::Assign, ty, value.ty)?;

                self.emit(Quadruple::new(
                    Opcode::Return,
                    Some(value.operand),
                    None,
                    Some(Operand::Address(slot)),
                ));
                Ok(())
            }
            _ => Err(ErrorImpl::InvalidReturn { function: name }),
        }
    }

    /// Pops one evaluated value and prints it.
    pub fn handle_print(&mut self) -> SemanticResult<()> {
        let value = self.pop_value()?;
        self.emit(Quadruple::unary(Opcode::Print, value.operand));
        Ok(())
    }
}
