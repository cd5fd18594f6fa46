use tracing::trace;

use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    type_checker::{
        semantic_cube::combine,
        types::{Operator, Type},
    },
};

use super::{
    compiler::{Compiler, OperandItem, OperatorItem},
    quadruple::{Operand, Quadruple},
};

impl Compiler {
    /// Pushes the variable `name`, resolved in the current function and
    /// then `global`.
    ///
    /// Arrays and matrices are pushed whole; they only become values once
    /// indexed.
    pub fn push_operand(&mut self, name: &str) -> SemanticResult<()> {
        let variable = self.directory.resolve_variable(self.current, name)?;

        let item = OperandItem {
            operand: Operand::Address(variable.address),
            ty: variable.ty,
            whole: variable.kind.map(|_| name.to_string()),
        };
        self.push_item(item);
        Ok(())
    }

    /// Pushes a constant, pooling it by `(text, ty)`.
    pub fn push_literal(&mut self, text: &str, ty: Type) -> SemanticResult<()> {
        let address = self
            .literals
            .address_of(text, ty, self.allocator.as_mut())?;
        self.push_item(OperandItem::value(Operand::Address(address), ty));
        Ok(())
    }

    pub fn push_operator(&mut self, operator: Operator) {
        trace!(%operator, "pushed operator");
        self.operator_stack.push(OperatorItem::Operator(operator));
    }

    pub fn push_fake_floor(&mut self) {
        trace!("pushed floor");
        self.operator_stack.push(OperatorItem::Floor);
    }

    pub fn pop_fake_floor(&mut self) -> SemanticResult<()> {
        self.pop_operator(Some(OperatorItem::Floor)).map(|_| ())
    }

    /// Applies the top operator if it is one of `operators`.
    ///
    /// A floor or any other operator on top leaves everything untouched.
    pub fn maybe_apply_pending_operation(&mut self, operators: &[Operator]) -> SemanticResult<()> {
        match self.operator_stack.last() {
            Some(OperatorItem::Operator(top)) if operators.contains(top) => self.apply_operation(),
            _ => Ok(()),
        }
    }

    /// Pops one operator and two operands, emits the operation into a new
    /// temporary and pushes the temporary.
    pub fn apply_operation(&mut self) -> SemanticResult<()> {
        let operator = match self.pop_operator(None)? {
            item @ (OperatorItem::Operator(Operator::Assign) | OperatorItem::Floor) => {
                return Err(ErrorImpl::MalformedExpression {
                    expected: String::from("binary operator"),
                    found: item.to_string(),
                });
            }
            OperatorItem::Operator(operator) => operator,
        };

        let right = self.pop_value()?;
        let left = self.pop_value()?;
        let ty = combine(operator, left.ty, right.ty)?;

        let temporary = self.new_temporary()?;
        self.emit(Quadruple::binary(
            operator,
            left.operand,
            right.operand,
            Operand::Address(temporary),
        ));
        self.push_item(OperandItem::value(Operand::Address(temporary), ty));

        Ok(())
    }

    /// Completes `destination = source`. The destination was pushed before
    /// the `=` operator, the source after it. Nothing is pushed back.
    pub fn apply_assignment(&mut self) -> SemanticResult<()> {
        self.pop_operator(Some(OperatorItem::Operator(Operator::Assign)))?;

        let source = self.pop_value()?;
        let destination = self.pop_value()?;
        combine(Operator::Assign, destination.ty, source.ty)?;

        self.emit(Quadruple::assign(source.operand, destination.operand));
        Ok(())
    }
}
