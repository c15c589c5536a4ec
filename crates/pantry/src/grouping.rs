//! Category grouping.

use std::collections::BTreeMap;

use fridgechef_policy::CategoryIndex;

use crate::ingredient::Ingredient;

/// One bucket of the grouped collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub label: &'a str,
    pub items: Vec<&'a Ingredient>,
}

/// Partition `items` by category.
///
/// Every item lands in exactly one bucket; items keep their relative order
/// inside a bucket. Buckets come in category-table order with `Other` last,
/// and empty categories are omitted.
pub fn group_by_category<'a>(items: &'a [Ingredient], index: &'a CategoryIndex) -> Vec<CategoryGroup<'a>> {
    let mut buckets: BTreeMap<usize, CategoryGroup<'a>> = BTreeMap::new();
    for item in items {
        let label = index.category_of(&item.name);
        buckets
            .entry(index.rank(label))
            .or_insert_with(|| CategoryGroup {
                label,
                items: Vec::new(),
            })
            .items
            .push(item);
    }
    buckets.into_values().collect()
}
