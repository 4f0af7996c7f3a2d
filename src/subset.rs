/// Sparse subsets and filtering
///
/// `ItemsSubset` addresses an explicit list of positions in another view, used
/// when only some items of a source qualify. `filter_items` builds one, unless the
/// original view or the empty sentinel already says the same thing.

use crate::container::ItemContainer;
use crate::error::{check_index, check_range, ViewError};
use crate::items::{ItemView, Items};
use std::fmt;
use std::rc::Rc;

/// A view over selected positions of a base view.
///
/// Positions need not be sorted or contiguous. The view never claims to be
/// contiguous or a subslice.
pub struct ItemsSubset<'a, T> {
    base: Rc<Items<'a, T>>,
    /// subset[view_pos] = base position
    subset: Rc<[usize]>,
    start: usize,
    end: usize,
}

impl<'a, T: 'a> ItemsSubset<'a, T> {
    /// Creates a subset, validating every position against the base.
    pub fn new(base: Items<'a, T>, positions: Vec<usize>) -> Result<Self, ViewError> {
        let len = base.len();
        for &pos in &positions {
            check_index(pos, len)?;
        }
        Ok(Self::from_checked(base, positions))
    }

    /// Creates a subset from positions already known to be in range.
    pub(crate) fn from_checked(base: Items<'a, T>, positions: Vec<usize>) -> Self {
        let end = positions.len();
        ItemsSubset {
            base: Rc::new(base),
            subset: Rc::from(positions),
            start: 0,
            end,
        }
    }

    pub fn base(&self) -> &Items<'a, T> {
        &self.base
    }

    /// Base positions of the items in this view, in view order
    pub fn positions(&self) -> &[usize] {
        &self.subset[self.start..self.end]
    }

    fn base_index(&self, index: usize) -> Result<usize, ViewError> {
        check_index(index, self.len())?;
        Ok(self.subset[self.start + index])
    }
}

impl<'a, T> Clone for ItemsSubset<'a, T> {
    fn clone(&self) -> Self {
        ItemsSubset {
            base: Rc::clone(&self.base),
            subset: Rc::clone(&self.subset),
            start: self.start,
            end: self.end,
        }
    }
}

impl<'a, T> fmt::Debug for ItemsSubset<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemsSubset")
            .field("len", &(self.end - self.start))
            .field("base", &self.base)
            .finish()
    }
}

impl<'a, T: 'a> ItemView<'a, T> for ItemsSubset<'a, T> {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn get(&self, index: usize) -> Result<&'a T, ViewError> {
        let pos = self.base_index(index)?;
        self.base.get(pos)
    }

    fn try_slice(&self, start: usize, end: usize) -> Result<Items<'a, T>, ViewError> {
        check_range(start, end, self.len())?;
        Ok(Items::Subset(ItemsSubset {
            base: Rc::clone(&self.base),
            subset: Rc::clone(&self.subset),
            start: self.start + start,
            end: self.start + end,
        }))
    }

    fn contiguous(&self) -> bool {
        false
    }

    fn subslice(&self) -> bool {
        false
    }

    /// Assumes a subset of a single-container base stays within that container.
    fn container(&self) -> Option<ItemContainer> {
        if self.len() == 1 {
            return Some(self.container_at(0));
        }
        self.base.container()
    }

    fn try_container_at(&self, index: usize) -> Result<ItemContainer, ViewError> {
        let pos = self.base_index(index)?;
        self.base.try_container_at(pos)
    }
}

/// Keeps the items of `items` for which `pred` holds.
///
/// - every item matches: `items` itself is returned, with whatever flags it had
/// - nothing matches: `Items::Empty`
/// - otherwise: a subset view over `items`
pub fn filter_items<'a, T, F>(items: Items<'a, T>, mut pred: F) -> Items<'a, T>
where
    T: 'a,
    F: FnMut(&T) -> bool,
{
    let mut subset = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if pred(item) {
            subset.push(i);
        }
    }

    if subset.len() == items.len() {
        log::trace!("filter kept all {} {} items", items.len(), items.kind());
        return items;
    }
    if subset.is_empty() {
        log::trace!("filter dropped all {} {} items", items.len(), items.kind());
        return Items::Empty;
    }

    log::trace!("filter kept {} of {} {} items", subset.len(), items.len(), items.kind());
    Items::Subset(ItemsSubset::from_checked(items, subset))
}
