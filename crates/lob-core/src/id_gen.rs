//! Order id generation.
//!
//! The book asks an [`IdGenerator`] for a fresh token every time an order
//! is accepted. Production code uses random UUIDs; tests swap in
//! [`SequentialIdGenerator`] to get predictable ids.

use uuid::Uuid;

use crate::order::OrderId;

/// Source of fresh, unique order ids.
///
/// Ids must not repeat while an earlier order with the same id is still
/// resting. `OrderBook::submit` answers a repeat with
/// `BookError::DuplicateOrderId` and leaves the book untouched.
pub trait IdGenerator {
    fn next_id(&mut self) -> OrderId;
}

/// Random (v4) UUID ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> OrderId {
        OrderId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic ids: `<prefix>1`, `<prefix>2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIdGenerator {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        SequentialIdGenerator::new("ord-")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> OrderId {
        let id = OrderId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> OrderId,
{
    fn next_id(&mut self) -> OrderId {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIdGenerator::new("x");
        assert_eq!(ids.next_id().as_str(), "x1");
        assert_eq!(ids.next_id().as_str(), "x2");
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut ids = UuidGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn closures_are_generators() {
        let mut n = 0;
        let mut ids = move || {
            n += 10;
            OrderId::new(n.to_string())
        };
        assert_eq!(IdGenerator::next_id(&mut ids).as_str(), "10");
        assert_eq!(IdGenerator::next_id(&mut ids).as_str(), "20");
    }
}
