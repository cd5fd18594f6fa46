//! Virtual address allocation.
//!
//! The compiler never decides where a value lives; it asks an
//! [`AddressAllocator`] for the next free address of a segment. The bundled
//! [`MemoryMapper`] hands them out from fixed, non-overlapping ranges
//! described by a [`MemoryLayout`].

use std::{fmt::Display, ops::Range};

use tracing::trace;

use crate::errors::errors::{ErrorImpl, SemanticResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Global,
    Local,
    Temporary,
    Constant,
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Global => write!(f, "global"),
            Segment::Local => write!(f, "local"),
            Segment::Temporary => write!(f, "temporary"),
            Segment::Constant => write!(f, "constant"),
        }
    }
}

/// Address ranges of each segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLayout {
    pub global: Range<u32>,
    pub local: Range<u32>,
    pub temporary: Range<u32>,
    pub constant: Range<u32>,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        MemoryLayout {
            global: 1000..3000,
            local: 3000..5000,
            temporary: 5000..8000,
            constant: 8000..10000,
        }
    }
}

impl MemoryLayout {
    pub fn range(&self, segment: Segment) -> &Range<u32> {
        match segment {
            Segment::Global => &self.global,
            Segment::Local => &self.local,
            Segment::Temporary => &self.temporary,
            Segment::Constant => &self.constant,
        }
    }
}

/// Source of never-reused addresses, one counter per segment.
pub trait AddressAllocator {
    /// Reserves `size` consecutive addresses for a variable and returns the first.
    fn next_variable_address(&mut self, segment: Segment, size: u32) -> SemanticResult<u32>;
    fn next_temporary_address(&mut self) -> SemanticResult<u32>;
    fn next_literal_address(&mut self) -> SemanticResult<u32>;
}

#[derive(Debug, Clone)]
pub struct MemoryMapper {
    layout: MemoryLayout,
    next_global: u32,
    next_local: u32,
    next_temporary: u32,
    next_constant: u32,
}

impl MemoryMapper {
    pub fn new(layout: MemoryLayout) -> Self {
        MemoryMapper {
            next_global: layout.global.start,
            next_local: layout.local.start,
            next_temporary: layout.temporary.start,
            next_constant: layout.constant.start,
            layout,
        }
    }

    fn reserve(&mut self, segment: Segment, size: u32) -> SemanticResult<u32> {
        let end = self.layout.range(segment).end;
        let counter = match segment {
            Segment::Global => &mut self.next_global,
            Segment::Local => &mut self.next_local,
            Segment::Temporary => &mut self.next_temporary,
            Segment::Constant => &mut self.next_constant,
        };

        let address = *counter;
        match address.checked_add(size) {
            Some(next) if next <= end => {
                *counter = next;
                trace!(%segment, address, size, "reserved addresses");
                Ok(address)
            }
            _ => Err(ErrorImpl::SegmentOverflow {
                segment: segment.to_string(),
            }),
        }
    }
}

impl Default for MemoryMapper {
    fn default() -> Self {
        MemoryMapper::new(MemoryLayout::default())
    }
}

impl AddressAllocator for MemoryMapper {
    fn next_variable_address(&mut self, segment: Segment, size: u32) -> SemanticResult<u32> {
        self.reserve(segment, size)
    }

    fn next_temporary_address(&mut self) -> SemanticResult<u32> {
        self.reserve(Segment::Temporary, 1)
    }

    fn next_literal_address(&mut self) -> SemanticResult<u32> {
        self.reserve(Segment::Constant, 1)
    }
}
