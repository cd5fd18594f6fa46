use std::collections::HashMap;

use tracing::debug;

use crate::{errors::errors::SemanticResult, type_checker::types::Type};

use super::memory::AddressAllocator;

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralEntry {
    pub text: String,
    pub ty: Type,
    pub address: u32,
}

/// Constant pool. Each distinct `(text, type)` pair owns one address for the
/// whole compilation unit.
#[derive(Debug, Clone, Default)]
pub struct LiteralTable {
    entries: Vec<LiteralEntry>,
    lookup: HashMap<(String, Type), usize>,
}

impl LiteralTable {
    pub fn new() -> Self {
        LiteralTable::default()
    }

    pub fn address_of(
        &mut self,
        text: &str,
        ty: Type,
        allocator: &mut dyn AddressAllocator,
    ) -> SemanticResult<u32> {
        if let Some(index) = self.lookup.get(&(text.to_string(), ty)) {
            return Ok(self.entries[*index].address);
        }

        let address = allocator.next_literal_address()?;
        self.lookup.insert((text.to_string(), ty), self.entries.len());
        self.entries.push(LiteralEntry {
            text: text.to_string(),
            ty,
            address,
        });
        debug!(literal = text, %ty, address, "added literal");

        Ok(address)
    }

    pub fn entries(&self) -> &[LiteralEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
