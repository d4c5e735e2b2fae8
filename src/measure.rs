//! The length capability consumed by [`Longest`](crate::Longest).
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// A value with a well-defined, non-negative length.
///
/// Reducers that compare elements by length take `T: Measure`, so an element
/// type without a length concept is rejected at compile time.
///
/// Strings are measured in `char`s (Unicode scalar values), not bytes.
/// This agrees with a UTF-16 code-unit count only inside the Basic
/// Multilingual Plane: a character such as `'😀'` measures 1 here but takes
/// two UTF-16 units.
///
/// # Examples
/// ```
/// use foldkit::Measure;
///
/// assert_eq!("charlie".measure(), 7);
/// assert_eq!("naïve".measure(), 5);
/// assert_eq!("😀".measure(), 1);
/// assert_eq!(vec![1, 2, 3].measure(), 3);
/// ```
pub trait Measure {
    /// Returns the length used to compare this value against others.
    fn measure(&self) -> usize;
}

impl Measure for str {
    #[inline]
    fn measure(&self) -> usize {
        self.chars().count()
    }
}

impl Measure for String {
    #[inline]
    fn measure(&self) -> usize {
        self.as_str().measure()
    }
}

impl<T> Measure for [T] {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Measure for [T; N] {
    #[inline]
    fn measure(&self) -> usize {
        N
    }
}

impl<T> Measure for Vec<T> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T> Measure for VecDeque<T> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T, S> Measure for HashSet<T, S> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Measure for HashMap<K, V, S> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<T> Measure for BTreeSet<T> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<K, V> Measure for BTreeMap<K, V> {
    #[inline]
    fn measure(&self) -> usize {
        self.len()
    }
}

impl<M: Measure + ?Sized> Measure for &M {
    #[inline]
    fn measure(&self) -> usize {
        (**self).measure()
    }
}

impl<M: Measure + ?Sized> Measure for Box<M> {
    #[inline]
    fn measure(&self) -> usize {
        (**self).measure()
    }
}
