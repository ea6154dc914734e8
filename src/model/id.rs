use uuid::Uuid;

/// Supplier of unique entity identifiers.
///
/// Injected into the store so the runtime-random source can be swapped for a
/// deterministic one in tests. Implementations must yield strings that never
/// collide within one store's lifetime.
pub trait IdGen {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUID ids (the production default)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGen for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic sequential ids (`"t1"`, `"t2"`, ...) for tests
#[derive(Debug, Default)]
pub struct SeqIds {
    next: u64,
}

impl IdGen for SeqIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("t{}", self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_ids_are_sequential() {
        let mut ids = SeqIds::default();
        assert_eq!(ids.next_id(), "t1");
        assert_eq!(ids.next_id(), "t2");
        assert_eq!(ids.next_id(), "t3");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }
}
