//! Function and variable directory.
//!
//! Two levels: a function table with one entry per declared function (plus
//! the implicit `global` entry), and for each function a flat variable table.
//! There is no block scoping. A name resolves against the function it is
//! used in first and then against `global`, never anything else.
//!
//! Every call takes the [`FunctionId`] it operates on explicitly; the
//! directory itself has no notion of a "current" function.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    errors::errors::{ErrorImpl, SemanticResult},
    type_checker::types::{Kind, ReturnType, Type},
};

use super::memory::{AddressAllocator, Segment};

pub const GLOBAL_NAME: &str = "global";

/// Handle to a function entry. Stable for the lifetime of the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(usize);

impl FunctionId {
    pub const GLOBAL: FunctionId = FunctionId(0);

    pub fn is_global(self) -> bool {
        self == FunctionId::GLOBAL
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableEntry {
    pub ty: Type,
    pub kind: Option<Kind>,
    /// First address of the variable. Arrays and matrices own
    /// `size()` consecutive addresses starting here.
    pub address: u32,
    pub dimensions: Vec<usize>,
}

impl VariableEntry {
    pub fn rank(&self) -> usize {
        self.kind.map(Kind::rank).unwrap_or(0)
    }

    pub fn size(&self) -> usize {
        self.dimensions.iter().product::<usize>().max(1)
    }
}

pub type VariableTable = HashMap<String, VariableEntry>;

/// One variable in a declaration list.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub ty: Type,
    pub dimensions: Vec<usize>,
}

impl VariableDecl {
    pub fn scalar(name: &str, ty: Type) -> Self {
        VariableDecl {
            name: name.to_string(),
            ty,
            dimensions: vec![],
        }
    }

    pub fn subscripted(name: &str, ty: Type, dimensions: Vec<usize>) -> Self {
        VariableDecl {
            name: name.to_string(),
            ty,
            dimensions,
        }
    }
}

/// Resources an activation record of the function needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSize {
    pub locals: u32,
    pub temporaries: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    pub name: String,
    pub return_type: ReturnType,
    pub params: Vec<Type>,
    /// Local address each parameter is read from in the body, in order.
    /// `param` instructions at call sites refer to these by position.
    pub param_addresses: Vec<u32>,
    /// Present while the body is being compiled, detached once it is closed.
    pub variables: Option<VariableTable>,
    /// Index of the first instruction of the body.
    pub start: usize,
    pub frame: FrameSize,
    /// Global address receiving the return value of non-void functions.
    pub return_slot: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct FunctionDirectory {
    functions: Vec<FunctionEntry>,
    lookup: HashMap<String, FunctionId>,
}

impl Default for FunctionDirectory {
    fn default() -> Self {
        FunctionDirectory::new()
    }
}

impl FunctionDirectory {
    pub fn new() -> Self {
        let global = FunctionEntry {
            name: GLOBAL_NAME.to_string(),
            return_type: ReturnType::Void,
            params: vec![],
            param_addresses: vec![],
            variables: None,
            start: 0,
            frame: FrameSize::default(),
            return_slot: None,
        };

        let mut lookup = HashMap::new();
        lookup.insert(GLOBAL_NAME.to_string(), FunctionId::GLOBAL);

        FunctionDirectory {
            functions: vec![global],
            lookup,
        }
    }

    pub fn get(&self, id: FunctionId) -> &FunctionEntry {
        &self.functions[id.0]
    }

    fn get_mut(&mut self, id: FunctionId) -> &mut FunctionEntry {
        &mut self.functions[id.0]
    }

    pub fn functions(&self) -> &[FunctionEntry] {
        &self.functions
    }

    pub fn into_functions(self) -> Vec<FunctionEntry> {
        self.functions
    }

    /// Registers a function whose body starts at instruction `start`.
    ///
    /// Non-void functions also get a global address that holds their return
    /// value. It is not a variable and cannot be named in the source.
    pub fn register_function(
        &mut self,
        name: &str,
        return_type: ReturnType,
        start: usize,
        allocator: &mut dyn AddressAllocator,
    ) -> SemanticResult<FunctionId> {
        if self.lookup.contains_key(name) {
            return Err(ErrorImpl::DuplicateSymbol {
                symbol: name.to_string(),
            });
        }

        let return_slot = match return_type {
            ReturnType::Void => None,
            ReturnType::Value(_) => Some(allocator.next_variable_address(Segment::Global, 1)?),
        };

        let id = FunctionId(self.functions.len());
        self.functions.push(FunctionEntry {
            name: name.to_string(),
            return_type,
            params: vec![],
            param_addresses: vec![],
            variables: None,
            start,
            frame: FrameSize::default(),
            return_slot,
        });
        self.lookup.insert(name.to_string(), id);
        debug!(function = name, %return_type, start, "added function");

        Ok(id)
    }

    pub fn close_function(&mut self, id: FunctionId) {
        let entry = self.get_mut(id);
        entry.variables = None;
        debug!(function = %entry.name, frame = ?entry.frame, "closed function");
    }

    pub fn declare_params(
        &mut self,
        id: FunctionId,
        params: &[(Type, String)],
        allocator: &mut dyn AddressAllocator,
    ) -> SemanticResult<()> {
        if id.is_global() {
            return Err(ErrorImpl::InvalidParamContext);
        }

        let declarations: Vec<VariableDecl> = params
            .iter()
            .map(|(ty, name)| VariableDecl::scalar(name, *ty))
            .collect();
        let addresses = self.declare_variables(id, &declarations, allocator)?;

        let entry = self.get_mut(id);
        entry.params = params.iter().map(|(ty, _)| *ty).collect();
        entry.param_addresses = addresses;
        debug!(function = %entry.name, params = ?entry.params, addresses = ?entry.param_addresses, "added params");

        Ok(())
    }

    /// Declares variables in `id`'s own table, in order. Returns their base
    /// addresses.
    pub fn declare_variables(
        &mut self,
        id: FunctionId,
        declarations: &[VariableDecl],
        allocator: &mut dyn AddressAllocator,
    ) -> SemanticResult<Vec<u32>> {
        let segment = if id.is_global() {
            Segment::Global
        } else {
            Segment::Local
        };

        let mut addresses = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let entry = self.get_mut(id);
            let variables = entry.variables.get_or_insert_with(HashMap::new);

            if variables.contains_key(&declaration.name) {
                return Err(ErrorImpl::DuplicateSymbol {
                    symbol: declaration.name.clone(),
                });
            }

            let variable = VariableEntry {
                ty: declaration.ty,
                kind: Kind::from_rank(declaration.dimensions.len()),
                address: 0,
                dimensions: declaration.dimensions.clone(),
            };
            let size = variable.size() as u32;
            let address = allocator.next_variable_address(segment, size)?;
            let variable = VariableEntry { address, ..variable };

            debug!(variable = %declaration.name, function = %entry.name, ?variable, "added variable");
            variables.insert(declaration.name.clone(), variable);
            if !id.is_global() {
                entry.frame.locals += size;
            }
            addresses.push(address);
        }

        Ok(addresses)
    }

    /// Finds `name` in `id`'s table, falling back to `global`.
    pub fn resolve_variable(&self, id: FunctionId, name: &str) -> SemanticResult<&VariableEntry> {
        let local = self.get(id).variables.as_ref().and_then(|table| table.get(name));
        let global = || {
            self.get(FunctionId::GLOBAL)
                .variables
                .as_ref()
                .and_then(|table| table.get(name))
        };

        local.or_else(global).ok_or(ErrorImpl::UnknownSymbol {
            symbol: name.to_string(),
        })
    }

    pub fn resolve_function(&self, name: &str) -> SemanticResult<(FunctionId, &FunctionEntry)> {
        self.lookup
            .get(name)
            .map(|id| (*id, self.get(*id)))
            .ok_or(ErrorImpl::UnknownSymbol {
                symbol: name.to_string(),
            })
    }

    /// Counts one temporary against `id`'s activation record.
    pub fn record_temporary(&mut self, id: FunctionId) {
        self.get_mut(id).frame.temporaries += 1;
    }
}
