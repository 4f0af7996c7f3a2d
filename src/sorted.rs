/// Sort views
///
/// A `SortedItems` presents a base view in an order of the caller's choosing by
/// permuting positions, never items. The permutation starts as the identity, can
/// be re-sorted in place any number of times, and can be rebuilt for a new base
/// without reallocating.
///
/// Slices share the permutation. Re-sorting a view whose permutation is shared
/// with an earlier slice copies it first, so slices never change underneath
/// their users.

use crate::config::{SortStability, ViewConfig};
use crate::container::ItemContainer;
use crate::error::{check_index, check_range, fail, index_buffer, ViewError};
use crate::items::{ItemView, Items};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

pub struct SortedItems<'a, T> {
    base: Rc<Items<'a, T>>,
    /// order[view_pos] = base position
    order: Rc<Vec<usize>>,
    start: usize,
    end: usize,
}

impl<'a, T: 'a> SortedItems<'a, T> {
    /// Wraps `items` in identity order.
    pub fn new(items: Items<'a, T>) -> Result<Self, ViewError> {
        let n = items.len();
        let mut order = index_buffer(n)?;
        order.extend(0..n);
        Ok(SortedItems {
            base: Rc::new(items),
            order: Rc::new(order),
            start: 0,
            end: n,
        })
    }

    /// Replaces the base and resets to identity order.
    ///
    /// The permutation buffer is reused when no slice shares it. On allocation
    /// failure the view is left unchanged.
    pub fn reset(&mut self, items: Items<'a, T>) -> Result<(), ViewError> {
        let n = items.len();
        match Rc::get_mut(&mut self.order) {
            Some(order) => {
                let additional = n.saturating_sub(order.len());
                order.try_reserve_exact(additional)?;
                log::trace!("reusing permutation buffer (capacity {}) for {} items", order.capacity(), n);
                order.clear();
                order.extend(0..n);
            }
            None => {
                let mut order = index_buffer(n)?;
                order.extend(0..n);
                self.order = Rc::new(order);
            }
        }
        self.base = Rc::new(items);
        self.start = 0;
        self.end = n;
        Ok(())
    }

    pub fn base(&self) -> &Items<'a, T> {
        &self.base
    }

    /// The permutation: base positions in sorted order
    pub fn order(&self) -> &[usize] {
        &self.order[self.start..self.end]
    }

    /// Base position of the item at sorted position `index`.
    ///
    /// Panics if `index >= len()`.
    pub fn map(&self, index: usize) -> usize {
        match self.try_map(index) {
            Ok(pos) => pos,
            Err(err) => fail(err),
        }
    }

    pub fn try_map(&self, index: usize) -> Result<usize, ViewError> {
        check_index(index, self.len())?;
        Ok(self.order[self.start + index])
    }

    /// Stable sort by comparing items.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let base = &self.base;
        let order = &mut Rc::make_mut(&mut self.order)[self.start..self.end];
        order.sort_by(|&a, &b| cmp(base.at_ptr(a), base.at_ptr(b)));
    }

    /// Unstable sort by comparing items.
    pub fn sort_unstable_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let base = &self.base;
        let order = &mut Rc::make_mut(&mut self.order)[self.start..self.end];
        order.sort_unstable_by(|&a, &b| cmp(base.at_ptr(a), base.at_ptr(b)));
    }

    pub fn sort_with<F>(&mut self, stability: SortStability, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match stability {
            SortStability::Stable => self.sort_by(cmp),
            SortStability::Unstable => self.sort_unstable_by(cmp),
        }
    }

    pub fn sort_configured<F>(&mut self, config: &ViewConfig, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sort_with(config.sort_stability, cmp)
    }

    /// Stable sort by comparing base positions.
    ///
    /// Lets callers order by data kept outside the items, such as per-row
    /// metadata indexed by original position.
    pub fn sort_index_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&usize, &usize) -> Ordering,
    {
        Rc::make_mut(&mut self.order)[self.start..self.end].sort_by(cmp);
    }
}

impl<'a, T> Clone for SortedItems<'a, T> {
    fn clone(&self) -> Self {
        SortedItems {
            base: Rc::clone(&self.base),
            order: Rc::clone(&self.order),
            start: self.start,
            end: self.end,
        }
    }
}

impl<'a, T> fmt::Debug for SortedItems<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedItems")
            .field("len", &(self.end - self.start))
            .field("window", &(self.start..self.end))
            .field("base", &self.base)
            .finish()
    }
}

impl<'a, T: 'a> ItemView<'a, T> for SortedItems<'a, T> {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn get(&self, index: usize) -> Result<&'a T, ViewError> {
        let pos = self.try_map(index)?;
        self.base.get(pos)
    }

    fn try_slice(&self, start: usize, end: usize) -> Result<Items<'a, T>, ViewError> {
        check_range(start, end, self.len())?;
        Ok(Items::Sorted(SortedItems {
            base: Rc::clone(&self.base),
            order: Rc::clone(&self.order),
            start: self.start + start,
            end: self.start + end,
        }))
    }

    // Sorting breaks positional contiguity.
    fn contiguous(&self) -> bool {
        false
    }

    fn subslice(&self) -> bool {
        false
    }

    fn container(&self) -> Option<ItemContainer> {
        if self.len() == 1 {
            return Some(self.container_at(0));
        }
        self.base.container()
    }

    fn try_container_at(&self, index: usize) -> Result<ItemContainer, ViewError> {
        let pos = self.try_map(index)?;
        self.base.try_container_at(pos)
    }
}
