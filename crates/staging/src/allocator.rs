//! Synthetic node id allocation
//!
//! One allocator is created per load and passed by `&mut` through every
//! staging stage, so ids stay unique across node kinds without any stage
//! having to know how many ids the previous one consumed.

/// First id handed out by a fresh allocator
pub const FIRST_NODE_ID: i64 = 1;

/// Monotonic counter for synthetic node ids
#[derive(Debug)]
pub struct NodeIdAllocator {
    first: i64,
    next: i64,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self::starting_at(FIRST_NODE_ID)
    }

    pub fn starting_at(first: i64) -> Self {
        Self { first, next: first }
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return
    pub fn peek(&self) -> i64 {
        self.next
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> i64 {
        self.next - self.first
    }
}

impl Default for NodeIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
