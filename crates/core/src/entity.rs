//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Implemented by every record the store keeps in an ordered collection so
/// lookups by id can be written once.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Position of the entity with `id` inside `records`, if present.
pub fn position_of<E: Entity>(records: &[E], id: E::Id) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row(u64);

    impl Entity for Row {
        type Id = u64;

        fn id(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn position_of_finds_first_match_in_order() {
        let rows = vec![Row(3), Row(7), Row(9)];
        assert_eq!(position_of(&rows, 7), Some(1));
        assert_eq!(position_of(&rows, 4), None);
    }
}
