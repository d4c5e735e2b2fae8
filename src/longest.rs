use std::cmp::Ordering;
use std::marker::PhantomData;

use mem_dbg::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Measure, Reducer};

/// Reasons a serialized [`Longest`] is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidLongest {
    #[error("no maximum length but {0} items")]
    ItemsWithoutLength(usize),
    #[error("maximum length {0} but no items")]
    LengthWithoutItems(usize),
    #[error("item {index} has length {found}, expected {expected}")]
    LengthMismatch {
        index: usize,
        found: usize,
        expected: usize,
    },
}

/// Single-pass tracker of the longest elements of a sequence.
///
/// The tracker keeps the maximum length seen so far and every element of
/// that length, in the order they were accumulated. Shorter elements are
/// dropped as soon as they are seen, so memory is proportional to the number
/// of ties, not to the input.
///
/// Partial trackers built on disjoint parts of the input can be combined with
/// [`merge`](Longest::merge), which makes the tracker usable from any fold
/// driver, sequential or parallel. See [`LongestReducer`] for the
/// [`Reducer`] adapter.
///
/// # Invariant
///
/// Every element in the tracker has length exactly [`max_len`](Longest::max_len),
/// and no element accumulated so far is longer. The tracker is empty if and
/// only if `max_len()` is `None`.
///
/// # Ordering
///
/// A single tracker fed sequentially preserves input order. After a merge,
/// the elements of the left tracker come first, then those of the right one;
/// nothing stronger is promised across partitions.
///
/// # Examples
///
/// ```
/// use foldkit::Longest;
///
/// let mut longest = Longest::new();
/// for w in ["a", "bb", "cc", "d"] {
///     longest.accumulate(w);
/// }
/// assert_eq!(longest.max_len(), Some(2));
/// assert_eq!(longest.finish(), vec!["bb", "cc"]);
///
/// // Partial results combine.
/// let left: Longest<_> = ["alfa", "charlie"].into_iter().collect();
/// let right: Longest<_> = ["foxtrot", "golf"].into_iter().collect();
/// assert_eq!(left.merge(right).finish(), vec!["charlie", "foxtrot"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, MemSize, MemDbg)]
#[serde(
    try_from = "LongestRepr<T>",
    bound(deserialize = "T: Measure + Deserialize<'de>")
)]
pub struct Longest<T> {
    /// Length shared by every element in `items`; `None` before the first element.
    max_len: Option<usize>,
    /// Elements of length `max_len`, in accumulation order.
    items: Vec<T>,
}

/// Wire form of [`Longest`], checked before it becomes a tracker.
#[derive(Deserialize)]
struct LongestRepr<T> {
    max_len: Option<usize>,
    items: Vec<T>,
}

impl<T: Measure> TryFrom<LongestRepr<T>> for Longest<T> {
    type Error = InvalidLongest;

    fn try_from(repr: LongestRepr<T>) -> Result<Self, Self::Error> {
        let LongestRepr { max_len, items } = repr;
        match max_len {
            None if !items.is_empty() => {
                return Err(InvalidLongest::ItemsWithoutLength(items.len()));
            }
            None => {}
            Some(max) if items.is_empty() => {
                return Err(InvalidLongest::LengthWithoutItems(max));
            }
            Some(max) => {
                if let Some((index, found)) = items
                    .iter()
                    .map(Measure::measure)
                    .enumerate()
                    .find(|&(_, len)| len != max)
                {
                    return Err(InvalidLongest::LengthMismatch {
                        index,
                        found,
                        expected: max,
                    });
                }
            }
        }
        Ok(Self { max_len, items })
    }
}

impl<T> Default for Longest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Longest<T> {
    /// Creates an empty tracker.
    ///
    /// The empty tracker is the identity of [`merge`](Longest::merge).
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_len: None,
            items: Vec::new(),
        }
    }

    /// Returns the length of the tracked elements, or `None` if nothing has
    /// been accumulated yet.
    #[inline]
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Returns the number of tracked elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no element has been accumulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the tracked elements.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Combines two partial trackers.
    ///
    /// The tracker with the larger maximum wins and the other one is
    /// discarded. On a tie, `other`'s elements are appended after `self`'s.
    /// Both trackers are consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use foldkit::Longest;
    ///
    /// let a: Longest<_> = ["ab", "cd"].into_iter().collect();
    /// let b: Longest<_> = ["xyz"].into_iter().collect();
    /// assert_eq!(a.clone().merge(b.clone()).items(), &["xyz"]);
    /// assert_eq!(b.merge(a).items(), &["xyz"]);
    /// ```
    #[must_use]
    pub fn merge(mut self, mut other: Self) -> Self {
        // `None` sorts below every `Some`, so an empty tracker always loses.
        match self.max_len.cmp(&other.max_len) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => {
                self.items.append(&mut other.items);
                self
            }
        }
    }

    /// Consumes the tracker and returns the longest elements.
    #[must_use]
    pub fn finish(self) -> Vec<T> {
        self.items
    }
}

impl<T: Measure> Longest<T> {
    /// Feeds one element to the tracker.
    ///
    /// - longer than the current maximum: it replaces every tracked element;
    /// - as long as the current maximum: it is appended;
    /// - shorter: it is dropped.
    pub fn accumulate(&mut self, item: T) {
        let len = item.measure();
        let ord = match self.max_len {
            None => Ordering::Greater,
            Some(max) => len.cmp(&max),
        };

        match ord {
            Ordering::Less => {}
            Ordering::Equal => self.items.push(item),
            Ordering::Greater => {
                self.max_len = Some(len);
                self.items.clear();
                self.items.push(item);
            }
        }
    }
}

impl<T: Measure> Extend<T> for Longest<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.accumulate(item);
        }
    }
}

impl<T: Measure> FromIterator<T> for Longest<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut longest = Self::new();
        longest.extend(iter);
        longest
    }
}

/// [`Reducer`] adapter for [`Longest`].
///
/// # Examples
///
/// ```
/// use foldkit::fold::{Layout, Partitioned, Strategy};
/// use foldkit::LongestReducer;
///
/// let words = ["alfa", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel"];
/// let out = Partitioned::new(3, Layout::Interleaved)
///     .fold(&LongestReducer::new(), words)
///     .unwrap();
/// assert_eq!(out.len(), 2);
/// assert!(out.contains(&"charlie") && out.contains(&"foxtrot"));
/// ```
pub struct LongestReducer<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> LongestReducer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for LongestReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for LongestReducer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for LongestReducer<T> {}

impl<T: Measure + Send> Reducer<T> for LongestReducer<T> {
    type State = Longest<T>;
    type Output = Vec<T>;

    #[inline]
    fn init(&self) -> Longest<T> {
        Longest::new()
    }

    #[inline]
    fn accumulate(&self, state: &mut Longest<T>, item: T) {
        state.accumulate(item);
    }

    #[inline]
    fn merge(&self, left: Longest<T>, right: Longest<T>) -> Longest<T> {
        left.merge(right)
    }

    #[inline]
    fn finish(&self, state: Longest<T>) -> Vec<T> {
        state.finish()
    }
}
