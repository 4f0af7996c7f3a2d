/// Track storage
///
/// A `Track` owns the items of one track, kept in the order the views expect
/// them, and mints base views over its storage.
/// - O(1) random access
/// - amortised O(1) append
/// - views borrow the storage, so the track cannot change while one is alive

use crate::container::ItemContainer;
use crate::error::{check_range, ViewError};
use crate::items::Items;
use crate::simple::SimpleItems;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Track<T> {
    data: Vec<T>,
    container: ItemContainer,
}

impl<T> Track<T> {
    pub fn new(container: ItemContainer) -> Self {
        Track {
            data: Vec::new(),
            container,
        }
    }

    pub fn with_capacity(container: ItemContainer, capacity: usize) -> Self {
        Track {
            data: Vec::with_capacity(capacity),
            container,
        }
    }

    /// Takes ownership of `data` as-is. The caller is responsible for its order.
    pub fn from_vec(container: ItemContainer, data: Vec<T>) -> Self {
        Track { data, container }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T, ViewError> {
        self.data.get(index).ok_or(ViewError::IndexOutOfRange {
            index,
            len: self.data.len(),
        })
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn container(&self) -> ItemContainer {
        self.container
    }

    pub fn push(&mut self, item: T) {
        self.data.push(item);
    }

    /// Appends `item` if it does not sort before the current last item.
    ///
    /// On `OutOfOrder` the track is unchanged and `index` is where the item
    /// would have landed.
    pub fn push_sorted<F>(&mut self, item: T, mut cmp: F) -> Result<(), ViewError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if let Some(last) = self.data.last() {
            if cmp(&item, last) == Ordering::Less {
                return Err(ViewError::OutOfOrder {
                    index: self.data.len(),
                });
            }
        }
        self.data.push(item);
        Ok(())
    }

    /// A view over every item in the track.
    pub fn items(&self) -> Items<'_, T> {
        Items::Simple(SimpleItems::new(&self.data, self.container))
    }

    /// A view over `start..end` of the track.
    pub fn items_in(&self, start: usize, end: usize) -> Result<Items<'_, T>, ViewError> {
        check_range(start, end, self.data.len())?;
        Ok(Items::Simple(SimpleItems::new(&self.data[start..end], self.container)))
    }
}

impl<T> Extend<T> for Track<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}
