/// Merge views
///
/// `MergedItems` presents several already-sorted views as one sorted sequence.
/// The merged order is materialized once, by a k-way merge, as a permutation of
/// absolute positions into the concatenation of the flattened bases. Slicing only
/// moves a window over that permutation.
///
/// # Flattening
///
/// Merge views never nest: merging a merge view splices in its bases instead of
/// wrapping it, so resolving a position costs one permutation lookup no matter how
/// often results are merged again. A sliced merge view contributes, for each of its
/// bases, the run of that base covered by the window. The k-way merge consumes every
/// base in order, so those runs are always contiguous.

use crate::container::ItemContainer;
use crate::error::{check_index, check_range, index_buffer, ViewError};
use crate::items::{ItemView, Items};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

pub struct MergedItems<'a, T> {
    /// Flattened sources; none of them is empty or a merge view
    bases: Rc<[Items<'a, T>]>,
    /// base_starts[i] = absolute position of the first item of bases[i]
    base_starts: Rc<[usize]>,
    total: usize,
    single_container: Option<ItemContainer>,
    /// indices[merged_pos] = absolute position
    indices: Rc<[usize]>,
    start: usize,
    end: usize,
}

/// Merges sorted views using a three-way comparison.
///
/// Every input must already be sorted by `cmp`. Equal items keep input order:
/// items of earlier views come first. Empty inputs are dropped; if fewer than two
/// remain, the survivor (or `Items::Empty`) is returned as is.
///
/// Fails only if the permutation cannot be allocated.
pub fn merge_items<'a, T, I, F>(views: I, mut cmp: F) -> Result<Items<'a, T>, ViewError>
where
    T: 'a,
    I: IntoIterator<Item = Items<'a, T>>,
    F: FnMut(&T, &T) -> Ordering,
{
    merge_items_by(views, |a, b| cmp(a, b) == Ordering::Less)
}

/// Merges sorted views using a strict less-than predicate.
pub fn merge_items_by<'a, T, I, F>(views: I, mut less: F) -> Result<Items<'a, T>, ViewError>
where
    T: 'a,
    I: IntoIterator<Item = Items<'a, T>>,
    F: FnMut(&T, &T) -> bool,
{
    let mut sources: Vec<Items<'a, T>> = views.into_iter().filter(|v| !v.is_empty()).collect();

    match sources.len() {
        0 => return Ok(Items::Empty),
        1 => return Ok(sources.pop().unwrap_or_default()),
        _ => {}
    }

    let mut single_container = None;
    for (i, source) in sources.iter().enumerate() {
        let container = source.container();
        if i == 0 {
            single_container = container;
        } else if container != single_container {
            single_container = None;
        }
    }

    let mut bases = Vec::with_capacity(sources.len());
    for source in &sources {
        match source {
            Items::Merged(merged) => merged.window_bases(&mut bases),
            other => bases.push(other.clone()),
        }
    }

    let merged = MergedItems::build(bases, single_container, &mut less)?;
    log::debug!(
        "merged {} sources into {} bases ({} items)",
        sources.len(),
        merged.bases.len(),
        merged.total
    );
    Ok(Items::Merged(merged))
}

/// Merges views sorted by `key`.
pub fn merge_items_by_key<'a, T, I, K, F>(views: I, mut key: F) -> Result<Items<'a, T>, ViewError>
where
    T: 'a,
    I: IntoIterator<Item = Items<'a, T>>,
    K: Ord,
    F: FnMut(&T) -> K,
{
    merge_items_by(views, |a, b| key(a) < key(b))
}

impl<'a, T: 'a> MergedItems<'a, T> {
    fn build<F>(
        bases: Vec<Items<'a, T>>,
        single_container: Option<ItemContainer>,
        less: &mut F,
    ) -> Result<Self, ViewError>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let lengths: Vec<usize> = bases.iter().map(|b| b.len()).collect();
        let mut base_starts = Vec::with_capacity(bases.len());
        let mut total = 0;
        for &len in &lengths {
            base_starts.push(total);
            total += len;
        }

        let mut indices = index_buffer(total)?;
        let mut cursors = vec![0usize; bases.len()];

        for _ in 0..total {
            let mut min: Option<(usize, &'a T)> = None;
            for (j, base) in bases.iter().enumerate() {
                if cursors[j] == lengths[j] {
                    continue;
                }
                let candidate = base.at_ptr(cursors[j]);
                match min {
                    // Only a strictly smaller item displaces the current minimum,
                    // so ties go to the earliest base.
                    Some((_, current)) if !less(candidate, current) => {}
                    _ => min = Some((j, candidate)),
                }
            }

            let (j, _) = match min {
                Some(found) => found,
                None => panic!(
                    "invariant violation: all {} bases exhausted after {} of {} items",
                    bases.len(),
                    indices.len(),
                    total
                ),
            };
            indices.push(base_starts[j] + cursors[j]);
            cursors[j] += 1;
        }

        Ok(MergedItems {
            bases: Rc::from(bases),
            base_starts: Rc::from(base_starts),
            total,
            single_container,
            indices: Rc::from(indices),
            start: 0,
            end: total,
        })
    }

    /// The flattened base list.
    pub fn bases(&self) -> &[Items<'a, T>] {
        &self.bases
    }

    /// Absolute positions, in merged order, of the items in the current window
    pub fn permutation(&self) -> &[usize] {
        &self.indices[self.start..self.end]
    }

    /// Maps an absolute position to (base, position within base).
    fn locate(&self, absolute: usize) -> (usize, usize) {
        let owners = self.base_starts.partition_point(|&start| start <= absolute);
        if owners == 0 || absolute >= self.total {
            panic!(
                "invariant violation: absolute position {} is not owned by any of {} bases ({} items)",
                absolute,
                self.bases.len(),
                self.total
            );
        }
        let base = owners - 1;
        (base, absolute - self.base_starts[base])
    }

    fn index(&self, index: usize) -> Result<(usize, usize), ViewError> {
        check_index(index, self.len())?;
        Ok(self.locate(self.indices[self.start + index]))
    }

    /// Pushes the bases this view's window draws from, each cut to the run it covers.
    fn window_bases(&self, out: &mut Vec<Items<'a, T>>) {
        if self.start == 0 && self.end == self.total {
            out.extend(self.bases.iter().cloned());
            return;
        }

        // runs[base] = (first, last + 1) local positions seen in the window
        let mut runs: Vec<Option<(usize, usize)>> = vec![None; self.bases.len()];
        for &absolute in &self.indices[self.start..self.end] {
            let (base, local) = self.locate(absolute);
            runs[base] = match runs[base] {
                Some((lo, hi)) => Some((lo.min(local), hi.max(local + 1))),
                None => Some((local, local + 1)),
            };
        }

        for (items, run) in self.bases.iter().zip(runs) {
            if let Some((lo, hi)) = run {
                out.push(items.slice(lo, hi));
            }
        }
    }
}

impl<'a, T> Clone for MergedItems<'a, T> {
    fn clone(&self) -> Self {
        MergedItems {
            bases: Rc::clone(&self.bases),
            base_starts: Rc::clone(&self.base_starts),
            total: self.total,
            single_container: self.single_container,
            indices: Rc::clone(&self.indices),
            start: self.start,
            end: self.end,
        }
    }
}

impl<'a, T> fmt::Debug for MergedItems<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedItems")
            .field("bases", &self.bases.len())
            .field("total", &self.total)
            .field("window", &(self.start..self.end))
            .field("single_container", &self.single_container)
            .finish()
    }
}

impl<'a, T: 'a> ItemView<'a, T> for MergedItems<'a, T> {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn get(&self, index: usize) -> Result<&'a T, ViewError> {
        let (base, local) = self.index(index)?;
        self.bases[base].get(local)
    }

    fn try_slice(&self, start: usize, end: usize) -> Result<Items<'a, T>, ViewError> {
        check_range(start, end, self.len())?;
        let mut sliced = self.clone();
        sliced.start = self.start + start;
        sliced.end = self.start + end;
        Ok(Items::Merged(sliced))
    }

    fn contiguous(&self) -> bool {
        match self.bases.len() {
            0 => true,
            1 => self.bases[0].contiguous(),
            _ => false,
        }
    }

    fn subslice(&self) -> bool {
        match self.bases.len() {
            0 => true,
            1 => self.bases[0].subslice(),
            _ => self.len() < 2,
        }
    }

    fn container(&self) -> Option<ItemContainer> {
        if let Some(container) = self.single_container.filter(|c| !c.is_none()) {
            return Some(container);
        }
        if self.len() == 1 {
            return Some(self.container_at(0));
        }
        None
    }

    fn try_container_at(&self, index: usize) -> Result<ItemContainer, ViewError> {
        let (base, local) = self.index(index)?;
        self.bases[base].try_container_at(local)
    }
}
