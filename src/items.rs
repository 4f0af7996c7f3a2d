/// ItemView - the shared contract of every view
///
/// A view is a read-only, indexable window over items that live in caller-owned
/// storage. `'a` is the lifetime of that storage: references handed out by a view
/// outlive the view itself, so render code can drop the view and keep the `&'a T`.
///
/// The set of view kinds is closed. `Items` holds one of them and dispatches by
/// exhaustive match; composed views (merges, subsets, sorts) store their sources
/// as `Items` as well.

use crate::container::ItemContainer;
use crate::error::{fail, ViewError};
use crate::merge::MergedItems;
use crate::simple::{NoItems, SimpleItems};
use crate::sorted::SortedItems;
use crate::subset::ItemsSubset;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Random access over a sequence of items.
pub trait ItemView<'a, T: 'a> {
    /// Number of addressable positions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reference to the item at `index`, or `IndexOutOfRange`
    fn get(&self, index: usize) -> Result<&'a T, ViewError>;

    /// Reference to the item at `index` in its backing storage.
    ///
    /// Panics if `index >= len()`.
    fn at_ptr(&self, index: usize) -> &'a T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => fail(err),
        }
    }

    /// The item at `index`, by value.
    ///
    /// Panics if `index >= len()`.
    fn at(&self, index: usize) -> T
    where
        T: Clone,
    {
        self.at_ptr(index).clone()
    }

    /// A view over `[start, end)` sharing this view's storage and bookkeeping
    fn try_slice(&self, start: usize, end: usize) -> Result<Items<'a, T>, ViewError>;

    /// Like `try_slice`, but panics on invalid bounds.
    fn slice(&self, start: usize, end: usize) -> Items<'a, T> {
        match self.try_slice(start, end) {
            Ok(items) => items,
            Err(err) => fail(err),
        }
    }

    /// True iff there are no gaps between the items.
    fn contiguous(&self) -> bool;

    /// True iff the items are literally a subslice of one track's items.
    fn subslice(&self) -> bool;

    /// The container shared by all items, or `None` if there is no single one.
    fn container(&self) -> Option<ItemContainer>;

    fn try_container_at(&self, index: usize) -> Result<ItemContainer, ViewError>;

    /// The container governing the item at `index`.
    ///
    /// Panics if `index >= len()`.
    fn container_at(&self, index: usize) -> ItemContainer {
        match self.try_container_at(index) {
            Ok(container) => container,
            Err(err) => fail(err),
        }
    }

    fn iter(&self) -> Iter<'_, 'a, T, Self> {
        Iter::new(self)
    }

    /// Index of the first position for which `pred` is false, assuming the view
    /// is partitioned by `pred` (all true positions before all false ones).
    ///
    /// Used to locate the visible window of a time-sorted view before slicing.
    fn partition_point<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
        Self: Sized,
    {
        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self.at_ptr(mid)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

/// One view of any kind.
///
/// Cloning an `Items` clones bookkeeping only (slices, `Rc` handles and window
/// bounds), never items.
pub enum Items<'a, T> {
    /// The canonical zero-item view
    Empty,
    Simple(SimpleItems<'a, T>),
    Merged(MergedItems<'a, T>),
    Subset(ItemsSubset<'a, T>),
    Sorted(SortedItems<'a, T>),
}

impl<'a, T> Items<'a, T> {
    /// A base view over a whole slice, owned by `container`.
    pub fn from_slice(items: &'a [T], container: ItemContainer) -> Self {
        Items::Simple(SimpleItems::new(items, container))
    }

    /// Returns true if this is the empty sentinel (not merely a view of length zero).
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Items::Empty)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Items::Empty => "empty",
            Items::Simple(_) => "simple",
            Items::Merged(_) => "merged",
            Items::Subset(_) => "subset",
            Items::Sorted(_) => "sorted",
        }
    }
}

impl<'a, T> Clone for Items<'a, T> {
    fn clone(&self) -> Self {
        match self {
            Items::Empty => Items::Empty,
            Items::Simple(v) => Items::Simple(*v),
            Items::Merged(v) => Items::Merged(v.clone()),
            Items::Subset(v) => Items::Subset(v.clone()),
            Items::Sorted(v) => Items::Sorted(v.clone()),
        }
    }
}

impl<'a, T> Default for Items<'a, T> {
    fn default() -> Self {
        Items::Empty
    }
}

impl<'a, T> fmt::Debug for Items<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Items::Empty => f.write_str("Empty"),
            Items::Simple(v) => f.debug_tuple("Simple").field(v).finish(),
            Items::Merged(v) => f.debug_tuple("Merged").field(v).finish(),
            Items::Subset(v) => f.debug_tuple("Subset").field(v).finish(),
            Items::Sorted(v) => f.debug_tuple("Sorted").field(v).finish(),
        }
    }
}

impl<'a, T: 'a> ItemView<'a, T> for Items<'a, T> {
    fn len(&self) -> usize {
        match self {
            Items::Empty => ItemView::<'a, T>::len(&NoItems),
            Items::Simple(v) => v.len(),
            Items::Merged(v) => v.len(),
            Items::Subset(v) => v.len(),
            Items::Sorted(v) => v.len(),
        }
    }

    fn get(&self, index: usize) -> Result<&'a T, ViewError> {
        match self {
            Items::Empty => ItemView::<'a, T>::get(&NoItems, index),
            Items::Simple(v) => v.get(index),
            Items::Merged(v) => v.get(index),
            Items::Subset(v) => v.get(index),
            Items::Sorted(v) => v.get(index),
        }
    }

    fn try_slice(&self, start: usize, end: usize) -> Result<Items<'a, T>, ViewError> {
        match self {
            Items::Empty => ItemView::<'a, T>::try_slice(&NoItems, start, end),
            Items::Simple(v) => v.try_slice(start, end),
            Items::Merged(v) => v.try_slice(start, end),
            Items::Subset(v) => v.try_slice(start, end),
            Items::Sorted(v) => v.try_slice(start, end),
        }
    }

    fn contiguous(&self) -> bool {
        match self {
            Items::Empty => ItemView::<'a, T>::contiguous(&NoItems),
            Items::Simple(v) => v.contiguous(),
            Items::Merged(v) => v.contiguous(),
            Items::Subset(v) => v.contiguous(),
            Items::Sorted(v) => v.contiguous(),
        }
    }

    fn subslice(&self) -> bool {
        match self {
            Items::Empty => ItemView::<'a, T>::subslice(&NoItems),
            Items::Simple(v) => v.subslice(),
            Items::Merged(v) => v.subslice(),
            Items::Subset(v) => v.subslice(),
            Items::Sorted(v) => v.subslice(),
        }
    }

    fn container(&self) -> Option<ItemContainer> {
        match self {
            Items::Empty => ItemView::<'a, T>::container(&NoItems),
            Items::Simple(v) => v.container(),
            Items::Merged(v) => v.container(),
            Items::Subset(v) => v.container(),
            Items::Sorted(v) => v.container(),
        }
    }

    fn try_container_at(&self, index: usize) -> Result<ItemContainer, ViewError> {
        match self {
            Items::Empty => ItemView::<'a, T>::try_container_at(&NoItems, index),
            Items::Simple(v) => v.try_container_at(index),
            Items::Merged(v) => v.try_container_at(index),
            Items::Subset(v) => v.try_container_at(index),
            Items::Sorted(v) => v.try_container_at(index),
        }
    }
}

impl<'a, T> From<NoItems> for Items<'a, T> {
    fn from(_: NoItems) -> Self {
        Items::Empty
    }
}

impl<'a, T> From<SimpleItems<'a, T>> for Items<'a, T> {
    fn from(items: SimpleItems<'a, T>) -> Self {
        Items::Simple(items)
    }
}

impl<'a, T> From<MergedItems<'a, T>> for Items<'a, T> {
    fn from(items: MergedItems<'a, T>) -> Self {
        Items::Merged(items)
    }
}

impl<'a, T> From<ItemsSubset<'a, T>> for Items<'a, T> {
    fn from(items: ItemsSubset<'a, T>) -> Self {
        Items::Subset(items)
    }
}

impl<'a, T> From<SortedItems<'a, T>> for Items<'a, T> {
    fn from(items: SortedItems<'a, T>) -> Self {
        Items::Sorted(items)
    }
}

/// Iterator over the items of a view, in logical order.
pub struct Iter<'v, 'a, T, V: ?Sized> {
    view: &'v V,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a T>,
}

impl<'v, 'a, T: 'a, V: ItemView<'a, T> + ?Sized> Iter<'v, 'a, T, V> {
    pub fn new(view: &'v V) -> Self {
        Iter {
            view,
            front: 0,
            back: view.len(),
            _marker: PhantomData,
        }
    }
}

impl<'v, 'a, T: 'a, V: ItemView<'a, T> + ?Sized> Iterator for Iter<'v, 'a, T, V> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.view.at_ptr(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'v, 'a, T: 'a, V: ItemView<'a, T> + ?Sized> DoubleEndedIterator for Iter<'v, 'a, T, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view.at_ptr(self.back))
    }
}

impl<'v, 'a, T: 'a, V: ItemView<'a, T> + ?Sized> ExactSizeIterator for Iter<'v, 'a, T, V> {}

impl<'v, 'a, T: 'a, V: ItemView<'a, T> + ?Sized> FusedIterator for Iter<'v, 'a, T, V> {}

impl<'v, 'a, T: 'a> IntoIterator for &'v Items<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'v, 'a, T, Items<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{TimelineId, TrackId};

    fn container() -> ItemContainer {
        ItemContainer::new(TimelineId(1), TrackId(0))
    }

    #[test]
    fn test_items_dispatch_simple() {
        let data = [10, 20, 30];
        let items = Items::from_slice(&data, container());

        assert_eq!(items.kind(), "simple");
        assert_eq!(items.len(), 3);
        assert_eq!(items.at(1), 20);
        assert_eq!(*items.at_ptr(2), 30);
        assert!(items.contiguous());
        assert!(items.subslice());
        assert_eq!(items.container(), Some(container()));
        assert_eq!(items.container_at(0), container());
    }

    #[test]
    fn test_items_at_ptr_points_into_storage() {
        let data = vec![1u64, 2, 3];
        let items = Items::from_slice(&data, container());
        assert!(std::ptr::eq(items.at_ptr(1), &data[1]));
    }

    #[test]
    fn test_items_default_is_sentinel() {
        let items: Items<'_, u32> = Items::default();
        assert!(items.is_sentinel());
        assert_eq!(items.len(), 0);
        assert_eq!(items.container(), None);
    }

    #[test]
    fn test_get_out_of_range() {
        let data = [1, 2];
        let items = Items::from_slice(&data, container());
        assert_eq!(items.get(2), Err(ViewError::IndexOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    #[should_panic(expected = "index 5 out of range [0, 2)")]
    fn test_at_out_of_range_panics() {
        let data = [1, 2];
        let items = Items::from_slice(&data, container());
        items.at(5);
    }

    #[test]
    #[should_panic(expected = "out of range for view of length 2")]
    fn test_slice_invalid_bounds_panics() {
        let data = [1, 2];
        let items = Items::from_slice(&data, container());
        items.slice(1, 3);
    }

    #[test]
    fn test_iter_forward_and_back() {
        let data = [1, 2, 3, 4];
        let items = Items::from_slice(&data, container());

        let forward: Vec<i32> = items.iter().copied().collect();
        assert_eq!(forward, vec![1, 2, 3, 4]);

        let backward: Vec<i32> = items.iter().rev().copied().collect();
        assert_eq!(backward, vec![4, 3, 2, 1]);

        let mut it = items.iter();
        assert_eq!(it.len(), 4);
        it.next();
        it.next_back();
        assert_eq!(it.len(), 2);

        let mut total = 0;
        for v in &items {
            total += v;
        }
        assert_eq!(total, 10);
    }

    #[test]
    fn test_partition_point_finds_visible_window() {
        let data = [0u64, 5, 10, 15, 20, 25];
        let items = Items::from_slice(&data, container());

        let start = items.partition_point(|&ts| ts < 8);
        let end = items.partition_point(|&ts| ts <= 20);
        assert_eq!((start, end), (2, 5));

        let visible = items.slice(start, end);
        let seen: Vec<u64> = visible.iter().copied().collect();
        assert_eq!(seen, vec![10, 15, 20]);
    }

    #[test]
    fn test_debug_does_not_require_item_debug() {
        struct Opaque;
        let data = [Opaque, Opaque];
        let items = Items::from_slice(&data, container());
        let rendered = format!("{:?}", items);
        assert!(rendered.starts_with("Simple"));
        assert!(rendered.contains("len: 2"));
    }
}
