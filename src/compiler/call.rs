use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    type_checker::{
        semantic_cube::combine,
        types::{Operator, ReturnType},
    },
};

use super::{
    compiler::{Compiler, OperandItem},
    quadruple::{Opcode, Operand, Quadruple},
};

impl Compiler {
    /// Starts a call to `name`: reserves its activation record and puts a
    /// floor under the arguments.
    pub fn begin_call(&mut self, name: &str) -> SemanticResult<()> {
        self.directory.resolve_function(name)?;

        self.emit(Quadruple::unary(Opcode::Era, Operand::Function(name.to_string())));
        self.push_fake_floor();
        Ok(())
    }

    /// Binds the evaluated argument at `position` (zero based) to the
    /// matching parameter of `name`.
    pub fn bind_param(&mut self, name: &str, position: usize) -> SemanticResult<()> {
        let (_, function) = self.directory.resolve_function(name)?;
        let declared = function.params.len();
        let param = function.params.get(position).copied();

        let argument = self.pop_value()?;
        let param = param.ok_or(ErrorImpl::ArityMismatch {
            function: name.to_string(),
            expected: declared,
            received: position + 1,
        })?;
        combine(Operator::Assign, param, argument.ty)?;

        self.emit(Quadruple::new(
            Opcode::Param,
            Some(argument.operand),
            None,
            Some(Operand::Param(position)),
        ));
        Ok(())
    }

    /// Finishes a call to `name` after `supplied` arguments were bound.
    ///
    /// When `as_value` is set the call is part of an expression and its
    /// result is copied from the return slot into a fresh temporary, which
    /// is pushed. Otherwise any result is discarded.
    pub fn end_call(&mut self, name: &str, supplied: usize, as_value: bool) -> SemanticResult<()> {
        let (_, function) = self.directory.resolve_function(name)?;
        let (declared, start, return_type, slot) = (
            function.params.len(),
            function.start,
            function.return_type,
            function.return_slot,
        );

        if supplied != declared {
            return Err(ErrorImpl::ArityMismatch {
                function: name.to_string(),
                expected: declared,
                received: supplied,
            });
        }

        self.pop_fake_floor()?;
        self.emit(Quadruple::new(
            Opcode::Gosub,
            Some(Operand::Function(name.to_string())),
            None,
            Some(Operand::Jump(start)),
        ));

        if !as_value {
            return Ok(());
        }

        match (return_type, slot) {
            (ReturnType::Value(ty), Some(slot)) => {
                let temporary = self.new_temporary()?;
                self.emit(Quadruple::assign(
                    Operand::Address(slot),
                    Operand::Address(temporary),
                ));
                self.push_item(OperandItem::value(Operand::Address(temporary), ty));
                Ok(())
            }
            _ => Err(ErrorImpl::VoidValue {
                function: name.to_string(),
            }),
        }
    }
}
