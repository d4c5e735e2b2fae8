//! Majority detection, sequential and mergeable.
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use mem_dbg::*;
use serde::{Deserialize, Serialize};

use crate::Reducer;

/// Boyer-Moore vote state: a candidate and how many uncancelled copies of it
/// remain.
///
/// Feeding a sequence through [`accumulate`](MajorityVote::accumulate)
/// cancels pairs of distinct elements. If some value occurs strictly more
/// than half of the time it cannot be fully cancelled, so it is the surviving
/// candidate. The converse does not hold: a surviving candidate must still be
/// checked with [`verify_majority`].
///
/// Two states built on disjoint parts of the input can be merged: equal
/// candidates add up, different candidates cancel each other, and the
/// argument above still applies to the union.
///
/// # Examples
///
/// ```
/// use foldkit::algorithms::{MajorityVote, verify_majority};
///
/// let a = [13, 13, 24, 35, 24];
/// let b = [24, 35, 24, 24];
/// let left: MajorityVote<_> = a.iter().collect();
/// let right: MajorityVote<_> = b.iter().collect();
///
/// let candidate = left.merge(right).finish().unwrap();
/// let all: Vec<i32> = a.iter().chain(b.iter()).copied().collect();
/// assert_eq!(*candidate, 24);
/// assert!(verify_majority(&all, candidate));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, MemSize, MemDbg)]
pub struct MajorityVote<T> {
    candidate: Option<T>,
    count: usize,
}

impl<T> Default for MajorityVote<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MajorityVote<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            candidate: None,
            count: 0,
        }
    }

    /// Returns the current candidate, if any copy of it is still uncancelled.
    pub fn candidate(&self) -> Option<&T> {
        if self.count == 0 {
            None
        } else {
            self.candidate.as_ref()
        }
    }

    /// Number of uncancelled copies of the candidate.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Consumes the state and returns the candidate.
    #[must_use]
    pub fn finish(self) -> Option<T> {
        if self.count == 0 { None } else { self.candidate }
    }
}

impl<T: PartialEq> MajorityVote<T> {
    pub fn accumulate(&mut self, item: T) {
        if self.count == 0 {
            self.candidate = Some(item);
            self.count = 1;
        } else if self.candidate.as_ref() == Some(&item) {
            self.count += 1;
        } else {
            self.count -= 1;
            if self.count == 0 {
                self.candidate = None;
            }
        }
    }

    /// Combines two vote states computed on disjoint inputs.
    ///
    /// A fully cancelled state is equal to [`MajorityVote::new`], so it is
    /// the identity of this operation.
    #[must_use]
    pub fn merge(mut self, mut other: Self) -> Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            return other;
        }

        if self.candidate == other.candidate {
            self.count += other.count;
            self
        } else if self.count >= other.count {
            self.count -= other.count;
            if self.count == 0 {
                self.candidate = None;
            }
            self
        } else {
            other.count -= self.count;
            other
        }
    }
}

impl<T: PartialEq> Extend<T> for MajorityVote<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.accumulate(item);
        }
    }
}

impl<T: PartialEq> FromIterator<T> for MajorityVote<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vote = Self::new();
        vote.extend(iter);
        vote
    }
}

/// [`Reducer`] producing the majority *candidate* of a sequence.
///
/// The output is `None` when every element was cancelled. A `Some` output must
/// be confirmed with [`verify_majority`] on the full input.
pub struct MajorityReducer<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> MajorityReducer<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for MajorityReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq + Send> Reducer<T> for MajorityReducer<T> {
    type State = MajorityVote<T>;
    type Output = Option<T>;

    fn init(&self) -> MajorityVote<T> {
        MajorityVote::new()
    }

    fn accumulate(&self, state: &mut MajorityVote<T>, item: T) {
        state.accumulate(item);
    }

    fn merge(&self, left: MajorityVote<T>, right: MajorityVote<T>) -> MajorityVote<T> {
        left.merge(right)
    }

    fn finish(&self, state: MajorityVote<T>) -> Option<T> {
        state.finish()
    }
}

/// Returns `true` if `candidate` occurs more than `a.len() / 2` times in `a`.
pub fn verify_majority<T: PartialEq>(a: &[T], candidate: &T) -> bool {
    a.iter().filter(|&x| x == candidate).count() > a.len() / 2
}

/// Boyer-Moore majority vote to find the majority element in a slice, if it exists.
///
/// The **majority element** is the value that appears
/// more than ⌊n/2⌋ times, where `n` is the length of the slice.
///
/// Runs in O(n) time and O(1) additional space: one pass with
/// [`MajorityVote`] to find a candidate and one pass to verify it.
///
/// # Examples
/// ```
/// use foldkit::algorithms::majority;
///
/// let nums = [13, 13, 24, 35, 24, 24, 35, 24, 24];
/// assert_eq!(majority(&nums), Some(&24));
///
/// let nums = [13, 13, 24, 35, 24, 24, 35, 24];
/// assert_eq!(majority(&nums), None);
/// ```
pub fn majority<T: PartialEq>(a: &[T]) -> Option<&T> {
    let candidate = a.iter().collect::<MajorityVote<&T>>().finish()?;
    verify_majority(a, candidate).then_some(candidate)
}

/// Majority element by counting every distinct value.
///
/// Uses O(d) memory for `d` distinct values; meant as a reference for
/// [`majority`].
pub fn majority_by_counting<T: Eq + Hash>(a: &[T]) -> Option<&T> {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for x in a {
        *counts.entry(x).or_default() += 1;
    }
    counts
        .into_iter()
        .find(|&(_, c)| c > a.len() / 2)
        .map(|(x, _)| x)
}
