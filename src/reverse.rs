use std::collections::VecDeque;
use std::marker::PhantomData;

use mem_dbg::*;
use serde::{Deserialize, Serialize};

use crate::Reducer;

/// Collects a sequence in reverse encounter order.
///
/// Each element is pushed at the front. When two partial results are merged,
/// the right one (later in the input) is placed before the left one, so the
/// output is the exact reverse of the input for any contiguous partitioning.
///
/// # Examples
///
/// ```
/// use foldkit::Reversed;
///
/// let mut left: Reversed<_> = (0..3).collect();
/// let right: Reversed<_> = (3..5).collect();
/// assert_eq!(left.clone().finish(), vec![2, 1, 0]);
///
/// left = left.merge(right);
/// assert_eq!(left.finish(), vec![4, 3, 2, 1, 0]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, MemSize, MemDbg)]
pub struct Reversed<T> {
    items: VecDeque<T>,
}

impl<T> Default for Reversed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Reversed<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    #[inline]
    pub fn accumulate(&mut self, item: T) {
        self.items.push_front(item);
    }

    /// Combines `self` with the partial result of the partition that follows it.
    #[must_use]
    pub fn merge(mut self, mut right: Self) -> Self {
        right.items.append(&mut self.items);
        right
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> Vec<T> {
        self.items.into()
    }
}

impl<T> Extend<T> for Reversed<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.accumulate(item);
        }
    }
}

impl<T> FromIterator<T> for Reversed<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut r = Self::new();
        r.extend(iter);
        r
    }
}

/// [`Reducer`] adapter for [`Reversed`].
pub struct ReverseReducer<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> ReverseReducer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ReverseReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Reducer<T> for ReverseReducer<T> {
    type State = Reversed<T>;
    type Output = Vec<T>;

    fn init(&self) -> Reversed<T> {
        Reversed::new()
    }

    fn accumulate(&self, state: &mut Reversed<T>, item: T) {
        state.accumulate(item);
    }

    fn merge(&self, left: Reversed<T>, right: Reversed<T>) -> Reversed<T> {
        left.merge(right)
    }

    fn finish(&self, state: Reversed<T>) -> Vec<T> {
        state.finish()
    }
}
