/// Base views
///
/// `SimpleItems` is a view directly over one contiguous slice of items, tagged
/// with the container that owns them. `NoItems` is the stateless view of zero items.

use crate::container::ItemContainer;
use crate::error::{check_index, check_range, ViewError};
use crate::items::{ItemView, Items};
use std::fmt;

/// A view over one borrowed slice.
///
/// - O(1) access and slicing
/// - `contiguous` and `subslice` are fixed at construction and survive slicing
pub struct SimpleItems<'a, T> {
    items: &'a [T],
    container: ItemContainer,
    contiguous: bool,
    subslice: bool,
}

impl<'a, T> SimpleItems<'a, T> {
    /// A view over `items`, owned by `container`, reporting itself contiguous and a subslice.
    pub fn new(items: &'a [T], container: ItemContainer) -> Self {
        SimpleItems {
            items,
            container,
            contiguous: true,
            subslice: true,
        }
    }

    pub fn with_contiguous(mut self, contiguous: bool) -> Self {
        self.contiguous = contiguous;
        self
    }

    pub fn with_subslice(mut self, subslice: bool) -> Self {
        self.subslice = subslice;
        self
    }

    /// The backing slice covered by this view
    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }
}

impl<'a, T> Clone for SimpleItems<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SimpleItems<'a, T> {}

impl<'a, T> fmt::Debug for SimpleItems<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleItems")
            .field("len", &self.items.len())
            .field("container", &self.container)
            .field("contiguous", &self.contiguous)
            .field("subslice", &self.subslice)
            .finish()
    }
}

impl<'a, T: 'a> ItemView<'a, T> for SimpleItems<'a, T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Result<&'a T, ViewError> {
        self.items.get(index).ok_or(ViewError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    fn try_slice(&self, start: usize, end: usize) -> Result<Items<'a, T>, ViewError> {
        check_range(start, end, self.items.len())?;
        Ok(Items::Simple(SimpleItems {
            items: &self.items[start..end],
            ..*self
        }))
    }

    fn contiguous(&self) -> bool {
        self.contiguous
    }

    fn subslice(&self) -> bool {
        self.subslice
    }

    fn container(&self) -> Option<ItemContainer> {
        Some(self.container)
    }

    fn try_container_at(&self, index: usize) -> Result<ItemContainer, ViewError> {
        check_index(index, self.items.len())?;
        Ok(self.container)
    }
}

/// The view of zero items.
///
/// Every position is out of range. It is vacuously contiguous and a subslice,
/// and has no container. `Items::Empty` is its place in the `Items` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoItems;

impl<'a, T: 'a> ItemView<'a, T> for NoItems {
    fn len(&self) -> usize {
        0
    }

    fn get(&self, index: usize) -> Result<&'a T, ViewError> {
        Err(ViewError::IndexOutOfRange { index, len: 0 })
    }

    /// Only `0..0` is valid; anything else means a caller expected items that aren't there.
    fn try_slice(&self, start: usize, end: usize) -> Result<Items<'a, T>, ViewError> {
        if start == 0 && end == 0 {
            Ok(Items::Empty)
        } else {
            Err(ViewError::InvalidRange { start, end, len: 0 })
        }
    }

    fn contiguous(&self) -> bool {
        true
    }

    fn subslice(&self) -> bool {
        true
    }

    fn container(&self) -> Option<ItemContainer> {
        None
    }

    fn try_container_at(&self, index: usize) -> Result<ItemContainer, ViewError> {
        Err(ViewError::IndexOutOfRange { index, len: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{TimelineId, TrackId};

    fn track(n: u32) -> ItemContainer {
        ItemContainer::new(TimelineId(n), TrackId(0))
    }

    #[test]
    fn test_simple_items_basic() {
        let data = ["a", "b", "c"];
        let items = SimpleItems::new(&data, track(1));

        assert_eq!(items.len(), 3);
        assert_eq!(items.at(0), "a");
        assert_eq!(items.at(2), "c");
        assert!(items.get(3).is_err());
        assert!(items.contiguous());
        assert!(items.subslice());
        assert_eq!(items.container(), Some(track(1)));
        assert_eq!(items.container_at(1), track(1));
    }

    #[test]
    fn test_simple_items_flags() {
        let data = [1, 2, 3];
        let items = SimpleItems::new(&data, track(1))
            .with_contiguous(false)
            .with_subslice(false);

        assert!(!items.contiguous());
        assert!(!items.subslice());

        // Flags survive slicing
        let sliced = items.slice(1, 3);
        assert!(!sliced.contiguous());
        assert!(!sliced.subslice());
        assert_eq!(sliced.container(), Some(track(1)));
    }

    #[test]
    fn test_simple_items_slice_shares_storage() {
        let data = vec![10, 20, 30, 40, 50];
        let items = SimpleItems::new(&data, track(2));

        let sliced = items.slice(1, 4);
        assert_eq!(sliced.len(), 3);
        assert_eq!(sliced.at(0), 20);
        assert_eq!(sliced.at(2), 40);
        assert!(std::ptr::eq(sliced.at_ptr(0), &data[1]));

        let nested = sliced.slice(1, 2);
        assert_eq!(nested.len(), 1);
        assert_eq!(nested.at(0), 30);
    }

    #[test]
    fn test_simple_items_empty_slice() {
        let data = [1, 2, 3];
        let items = SimpleItems::new(&data, track(1));
        let empty = items.slice(3, 3);
        assert_eq!(empty.len(), 0);
        assert!(!empty.is_sentinel());
        // A zero-length simple view still reports its container
        assert_eq!(empty.container(), Some(track(1)));
    }

    #[test]
    fn test_simple_items_container_at_out_of_range() {
        let data = [1];
        let items = SimpleItems::new(&data, track(1));
        assert_eq!(
            items.try_container_at(1),
            Err(ViewError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_no_items() {
        let none = NoItems;
        assert_eq!(ItemView::<u8>::len(&none), 0);
        assert!(ItemView::<u8>::get(&none, 0).is_err());
        assert!(ItemView::<u8>::contiguous(&none));
        assert!(ItemView::<u8>::subslice(&none));
        assert_eq!(ItemView::<u8>::container(&none), None);
        assert!(ItemView::<u8>::try_container_at(&none, 0).is_err());
        assert_eq!(none, NoItems);
    }

    #[test]
    fn test_no_items_slice() {
        let sliced = ItemView::<u8>::try_slice(&NoItems, 0, 0).unwrap();
        assert!(sliced.is_sentinel());

        let err = ItemView::<u8>::try_slice(&NoItems, 0, 1).unwrap_err();
        assert_eq!(err, ViewError::InvalidRange { start: 0, end: 1, len: 0 });
    }

    #[test]
    #[should_panic(expected = "index 0 out of range [0, 0)")]
    fn test_no_items_at_panics() {
        ItemView::<u8>::at_ptr(&NoItems, 0);
    }
}
