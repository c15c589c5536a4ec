use fridgechef_core::IngredientId;

/// Maximum number of ingredients that can be picked for a recipe search.
pub const MAX_SELECTION: usize = 3;

/// User-facing message for a toggle rejected at capacity.
pub const CAPACITY_WARNING: &str = "You can select up to 3 ingredients.";

/// What a toggle did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// The set was full; nothing changed. A warning, not an error.
    AtCapacity,
}

/// Bounded set of selected ingredient ids (0..=3 members, no duplicates).
///
/// Only [`Selection::toggle`] adds members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<IngredientId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: IngredientId) -> SelectionChange {
        if let Some(pos) = self.ids.iter().position(|x| *x == id) {
            self.ids.remove(pos);
            return SelectionChange::Removed;
        }
        if self.is_full() {
            return SelectionChange::AtCapacity;
        }
        self.ids.push(id);
        SelectionChange::Added
    }

    pub fn contains(&self, id: IngredientId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_SELECTION
    }

    pub fn ids(&self) -> &[IngredientId] {
        &self.ids
    }

    /// Drop members that no longer satisfy `keep` (e.g. deleted ingredients).
    pub fn retain(&mut self, mut keep: impl FnMut(IngredientId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(n: i64) -> IngredientId {
        IngredientId::new(n)
    }

    fn sorted(sel: &Selection) -> Vec<i64> {
        let mut v: Vec<i64> = sel.ids().iter().map(|i| i.get()).collect();
        v.sort();
        v
    }

    #[test]
    fn full_selection_rejects_new_member_and_allows_removal() {
        let mut sel = Selection::new();
        for n in 1..=3 {
            assert_eq!(sel.toggle(id(n)), SelectionChange::Added);
        }

        let before = sel.clone();
        assert_eq!(sel.toggle(id(4)), SelectionChange::AtCapacity);
        assert_eq!(sel, before);
        assert_eq!(sorted(&sel), vec![1, 2, 3]);

        assert_eq!(sel.toggle(id(2)), SelectionChange::Removed);
        assert_eq!(sorted(&sel), vec![1, 3]);
    }

    #[test]
    fn toggling_twice_is_a_no_op() {
        let mut sel = Selection::new();
        sel.toggle(id(9));
        sel.toggle(id(9));
        assert!(sel.is_empty());
    }

    #[test]
    fn retain_prunes_members() {
        let mut sel = Selection::new();
        sel.toggle(id(1));
        sel.toggle(id(2));
        sel.retain(|i| i != id(1));
        assert_eq!(sorted(&sel), vec![2]);
    }

    proptest! {
        /// Property: no toggle sequence grows the set past the bound, and a
        /// rejected toggle leaves it unchanged.
        #[test]
        fn selection_stays_bounded(ops in prop::collection::vec(0i64..8, 0..64)) {
            let mut sel = Selection::new();
            for n in ops {
                let before = sel.clone();
                let change = sel.toggle(id(n));
                prop_assert!(sel.len() <= MAX_SELECTION);
                if change == SelectionChange::AtCapacity {
                    prop_assert_eq!(&sel, &before);
                }
                let mut dedup = sorted(&sel);
                dedup.dedup();
                prop_assert_eq!(dedup.len(), sel.len());
            }
        }
    }
}
