//! Main compiler module.
//!
//! This module contains the `Compiler` structure: the single mutable context
//! of one compilation unit. It owns the function directory, the literal pool,
//! the address allocator, the instruction list and the three evaluation
//! stacks (operands, operators, jumps). A fresh `Compiler` is built for every
//! unit and consumed by [`Compiler::program_end`], which yields the
//! [`Program`] handed to later stages.
//!
//! The grammar driver calls into it in recognition order; expression,
//! statement, call, addressing and render operations live in the sibling
//! modules as further `impl Compiler` blocks.

use tracing::trace;

use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    symbols::{
        directory::{FunctionDirectory, FunctionEntry, FunctionId, VariableDecl, GLOBAL_NAME},
        literals::LiteralTable,
        memory::{AddressAllocator, MemoryLayout, MemoryMapper},
    },
    type_checker::types::{Operator, ReturnType, Type},
};

use super::{
    array::AccessFrame,
    quadruple::{InstructionList, Opcode, Operand, Quadruple},
    stmt::ForFrame,
};

/// A pending value: where it lives and what it is.
#[derive(Debug, Clone, PartialEq)]
pub struct OperandItem {
    pub operand: Operand,
    pub ty: Type,
    /// Name of the array/matrix when the item is a whole subscripted
    /// variable rather than a scalar value.
    pub whole: Option<String>,
}

impl OperandItem {
    pub fn value(operand: Operand, ty: Type) -> Self {
        OperandItem {
            operand,
            ty,
            whole: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorItem {
    Operator(Operator),
    /// Marks the start of a parenthesised sub-expression.
    Floor,
}

impl std::fmt::Display for OperatorItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorItem::Operator(operator) => write!(f, "{}", operator),
            OperatorItem::Floor => write!(f, "("),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpItem {
    /// Index of an instruction whose target is still `Pending`.
    Pending(usize),
    /// Index a loop jumps back to.
    LoopStart(usize),
}

/// The output of a compilation unit.
#[derive(Debug, Clone)]
pub struct Program {
    pub functions: Vec<FunctionEntry>,
    pub literals: LiteralTable,
    pub quadruples: Vec<Quadruple>,
}

impl Program {
    pub fn function(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.iter().find(|function| function.name == name)
    }
}

pub const RENDER_NAME: &str = "render";

/// Compilation context of one unit.
pub struct Compiler {
    /// Functions and their variables
    pub(super) directory: FunctionDirectory,
    /// Deduplicated constants
    pub(super) literals: LiteralTable,
    /// Source of variable, temporary and constant addresses
    pub(super) allocator: Box<dyn AddressAllocator>,
    /// Emitted quadruples
    pub(super) quadruples: InstructionList,
    pub(super) operand_stack: Vec<OperandItem>,
    pub(super) operator_stack: Vec<OperatorItem>,
    pub(super) jump_stack: Vec<JumpItem>,
    /// Open `for` loops, innermost last
    pub(super) for_frames: Vec<ForFrame>,
    /// Open subscript accesses, innermost last
    pub(super) access_frames: Vec<AccessFrame>,
    /// Function whose body is being compiled
    pub(super) current: FunctionId,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(Box::new(MemoryMapper::default()))
    }
}

impl Compiler {
    /// Creates a new compilation context.
    ///
    /// # Arguments
    ///
    /// * `allocator` - The address allocator this unit draws addresses from
    ///
    /// # Returns
    ///
    /// A context whose current function is `global`.
    pub fn new(allocator: Box<dyn AddressAllocator>) -> Self {
        Compiler {
            directory: FunctionDirectory::new(),
            literals: LiteralTable::new(),
            allocator,
            quadruples: InstructionList::new(),
            operand_stack: vec![],
            operator_stack: vec![],
            jump_stack: vec![],
            for_frames: vec![],
            access_frames: vec![],
            current: FunctionId::GLOBAL,
        }
    }

    /// Creates a context backed by a [`MemoryMapper`] over `layout`.
    pub fn with_layout(layout: MemoryLayout) -> Self {
        Compiler::new(Box::new(MemoryMapper::new(layout)))
    }

    pub fn current_function(&self) -> FunctionId {
        self.current
    }

    pub fn directory(&self) -> &FunctionDirectory {
        &self.directory
    }

    pub fn literals(&self) -> &LiteralTable {
        &self.literals
    }

    pub fn quadruples(&self) -> &[Quadruple] {
        self.quadruples.as_slice()
    }

    pub fn operand_stack(&self) -> &[OperandItem] {
        &self.operand_stack
    }

    pub fn operator_stack(&self) -> &[OperatorItem] {
        &self.operator_stack
    }

    pub fn jump_stack(&self) -> &[JumpItem] {
        &self.jump_stack
    }

    pub(super) fn emit(&mut self, quadruple: Quadruple) -> usize {
        self.quadruples.emit(quadruple)
    }

    /// Index the next emitted instruction will get.
    pub(super) fn next_index(&self) -> usize {
        self.quadruples.len()
    }

    pub(super) fn backpatch_here(&mut self, index: usize) -> SemanticResult<()> {
        let target = self.next_index();
        self.quadruples.backpatch(index, target)
    }

    pub(super) fn new_temporary(&mut self) -> SemanticResult<u32> {
        let address = self.allocator.next_temporary_address()?;
        self.directory.record_temporary(self.current);
        Ok(address)
    }

    pub(super) fn push_item(&mut self, item: OperandItem) {
        trace!(operand = %item.operand, ty = %item.ty, "pushed operand");
        self.operand_stack.push(item);
    }

    pub(super) fn pop_operand(&mut self) -> SemanticResult<OperandItem> {
        let item = self.operand_stack.pop().ok_or(ErrorImpl::StackUnderflow {
            stack: String::from("operand"),
        })?;
        trace!(operand = %item.operand, ty = %item.ty, "popped operand");
        Ok(item)
    }

    /// Pops an operand that must be a scalar value.
    pub(super) fn pop_value(&mut self) -> SemanticResult<OperandItem> {
        let item = self.pop_operand()?;

        match &item.whole {
            Some(name) => {
                let expected = self.directory.resolve_variable(self.current, name)?.rank();
                Err(ErrorImpl::DimensionMismatch {
                    variable: name.clone(),
                    expected,
                    received: 0,
                })
            }
            None => Ok(item),
        }
    }

    /// Pops the top operator, checking it against `expected` when given.
    pub(super) fn pop_operator(
        &mut self,
        expected: Option<OperatorItem>,
    ) -> SemanticResult<OperatorItem> {
        let top = *self.operator_stack.last().ok_or(ErrorImpl::StackUnderflow {
            stack: String::from("operator"),
        })?;

        if let Some(expected) = expected {
            if top != expected {
                return Err(ErrorImpl::MalformedExpression {
                    expected: expected.to_string(),
                    found: top.to_string(),
                });
            }
        }

        self.operator_stack.pop();
        trace!(operator = %top, "popped operator");
        Ok(top)
    }

    pub(super) fn push_jump(&mut self, item: JumpItem) {
        self.jump_stack.push(item);
    }

    pub(super) fn pop_jump(&mut self) -> SemanticResult<JumpItem> {
        self.jump_stack.pop().ok_or(ErrorImpl::StackUnderflow {
            stack: String::from("jump"),
        })
    }

    pub(super) fn pop_pending_jump(&mut self) -> SemanticResult<usize> {
        match self.pop_jump()? {
            JumpItem::Pending(index) => Ok(index),
            JumpItem::LoopStart(index) => Err(ErrorImpl::MalformedExpression {
                expected: String::from("pending jump"),
                found: format!("loop start {}", index),
            }),
        }
    }

    /// Checks the operand and operator stacks are empty. Called by the
    /// driver after every complete statement.
    pub fn end_statement(&self) -> SemanticResult<()> {
        if self.operand_stack.is_empty()
            && self.operator_stack.is_empty()
            && self.access_frames.is_empty()
        {
            Ok(())
        } else {
            Err(ErrorImpl::UnbalancedStacks {
                operands: self.operand_stack.len(),
                operators: self.operator_stack.len(),
            })
        }
    }

    /// Declares variables in the current function.
    pub fn declare_variables(&mut self, declarations: &[VariableDecl]) -> SemanticResult<()> {
        self.directory
            .declare_variables(self.current, declarations, self.allocator.as_mut())
            .map(|_| ())
    }

    /// Registers a function and makes it the current one. Its body starts
    /// at the next emitted instruction.
    pub fn register_function(
        &mut self,
        name: &str,
        return_type: ReturnType,
    ) -> SemanticResult<FunctionId> {
        let start = self.next_index();
        let id = self
            .directory
            .register_function(name, return_type, start, self.allocator.as_mut())?;
        self.current = id;
        Ok(id)
    }

    pub fn declare_params(&mut self, params: &[(Type, String)]) -> SemanticResult<()> {
        self.directory
            .declare_params(self.current, params, self.allocator.as_mut())
    }

    /// Ends the body of the current function and returns to `global`.
    pub fn close_function(&mut self) -> SemanticResult<()> {
        if self.current.is_global() {
            return Err(ErrorImpl::MalformedExpression {
                expected: String::from("open function"),
                found: String::from(GLOBAL_NAME),
            });
        }

        self.emit(Quadruple::bare(Opcode::EndFunc));
        self.directory.close_function(self.current);
        self.current = FunctionId::GLOBAL;
        Ok(())
    }

    /// Marks the end of global declarations: emits the jump over every
    /// function body to `render`.
    pub fn program_start(&mut self) {
        let index = self.emit(Quadruple::jump(Opcode::Goto, None, Operand::Pending));
        self.push_jump(JumpItem::Pending(index));
    }

    /// Registers `render` and points the program-start jump at it.
    pub fn register_render(&mut self) -> SemanticResult<FunctionId> {
        let start_jump = self.pop_pending_jump()?;
        let id = self.register_function(RENDER_NAME, ReturnType::Void)?;
        self.backpatch_here(start_jump)?;
        Ok(id)
    }

    /// Finishes the unit and hands back its output.
    ///
    /// # Returns
    ///
    /// The function table, the literal pool and the instruction list, or
    /// `UnresolvedJump` if any jump was never backpatched.
    pub fn program_end(mut self) -> SemanticResult<Program> {
        self.end_statement()?;
        self.emit(Quadruple::bare(Opcode::End));

        if !self.current.is_global() {
            self.directory.close_function(self.current);
            self.current = FunctionId::GLOBAL;
        }

        let count = self.quadruples.pending_count().max(self.jump_stack.len());
        if count > 0 || !self.for_frames.is_empty() {
            return Err(ErrorImpl::UnresolvedJump { count });
        }

        Ok(Program {
            functions: self.directory.into_functions(),
            literals: self.literals,
            quadruples: self.quadruples.into_vec(),
        })
    }
}
