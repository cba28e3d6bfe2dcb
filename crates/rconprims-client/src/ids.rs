use std::collections::HashSet;

/// Hands out request ids, always the smallest one not currently in use.
///
/// Ids are reserved by [`generate`](Self::generate) and become reusable
/// after [`release`](Self::release). Keeping them small makes wire dumps easy
/// to read.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    outstanding: HashSet<u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return the smallest free id.
    pub fn generate(&mut self) -> u32 {
        let mut id = 0;
        while self.outstanding.contains(&id) {
            id += 1;
        }
        self.outstanding.insert(id);
        id
    }

    /// Return `id` to the pool. Releasing a free id is a no-op.
    pub fn release(&mut self, id: u32) {
        self.outstanding.remove(&id);
    }

    pub fn is_outstanding(&self, id: u32) -> bool {
        self.outstanding.contains(&id)
    }

    /// Number of ids currently reserved.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}
