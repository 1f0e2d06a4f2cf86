//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SignalId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DirectorId(pub u32);

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "signal#{}", self.0)
    }
}

impl std::fmt::Display for DirectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "director#{}", self.0)
    }
}

/// Monotonic allocator for DirectorId. IDs are never reused within a scheduler.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_director: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_director(&mut self) -> DirectorId {
        let id = DirectorId(self.next_director);
        self.next_director = self.next_director.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_director(), DirectorId(0));
        assert_eq!(alloc.alloc_director(), DirectorId(1));
        assert_eq!(DirectorId(1).to_string(), "director#1");
    }
}
