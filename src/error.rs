/// ItemView Errors
///
/// Every fallible operation in the crate reports a `ViewError`. Accessors that
/// mirror slice indexing (`at`, `at_ptr`, `slice`, `container_at`) panic with the
/// error's message instead of returning it, because an out-of-range position is
/// always a caller bug. Their `get`/`try_*` twins hand the same error back.

use std::collections::TryReserveError;

/// Errors produced by views, tracks and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("index {index} out of range [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("range {start}..{end} out of range for view of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("cannot allocate permutation: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("item at index {index} sorts before its predecessor")]
    OutOfOrder { index: usize },

    #[error("invalid view configuration: {0}")]
    Config(String),
}

impl ViewError {
    /// Returns true for both flavours of bounds violation.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ViewError::IndexOutOfRange { .. } | ViewError::InvalidRange { .. }
        )
    }
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<(), ViewError> {
    if index >= len {
        return Err(ViewError::IndexOutOfRange { index, len });
    }
    Ok(())
}

pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<(), ViewError> {
    if start > end || end > len {
        return Err(ViewError::InvalidRange { start, end, len });
    }
    Ok(())
}

/// Reserves exactly `n` slots in a fresh index buffer.
pub(crate) fn index_buffer(n: usize) -> Result<Vec<usize>, ViewError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(n)?;
    Ok(buf)
}

/// Panics with the message of a bounds violation.
#[cold]
#[track_caller]
pub(crate) fn fail(err: ViewError) -> ! {
    panic!("{}", err)
}
