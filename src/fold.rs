//! Fold drivers: the code that decides how input is split across
//! accumulators and in which order partial states are merged.
//!
//! Drivers are independent of the reducers they run. Every driver here only
//! merges a partition with its right neighbour, so the left-to-right grouping
//! of partial results is kept; exact element order across partitions is still
//! a property of the reducer, not of the driver.
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

use crate::Reducer;

/// Errors reported by the fold drivers.
#[derive(Debug, Error)]
pub enum FoldError {
    #[error("a partitioned fold needs at least one partition")]
    ZeroPartitions,
    #[error("minimum chunk length must be at least 1")]
    ZeroChunk,
    #[error("cannot build the fold thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A way of running a [`Reducer`] over a sequence.
pub trait Strategy {
    /// Reduces `items` with `reducer`.
    fn fold<R, I>(&self, reducer: &R, items: I) -> Result<R::Output, FoldError>
    where
        I: IntoIterator,
        I::Item: Send,
        R: Reducer<I::Item>;
}

/// One accumulator, items fed in input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequential;

impl Strategy for Sequential {
    fn fold<R, I>(&self, reducer: &R, items: I) -> Result<R::Output, FoldError>
    where
        I: IntoIterator,
        I::Item: Send,
        R: Reducer<I::Item>,
    {
        Ok(crate::reduce_seq(reducer, items))
    }
}

/// How [`Partitioned`] assigns items to partitions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Consecutive runs of roughly `n / partitions` items.
    #[default]
    Contiguous,
    /// Item `i` goes to partition `i % partitions`.
    Interleaved,
}

/// The order in which [`Partitioned`] merges partial states.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MergeOrder {
    /// `((p0 + p1) + p2) + ...`
    #[default]
    LeftToRight,
    /// `... + (p(k-2) + (p(k-1) + pk))`
    RightToLeft,
    /// Adjacent pairs, level by level, like a fork-join tree.
    Tree,
}

/// Deterministic fan-out/fan-in driver.
///
/// The input is split into `partitions` disjoint partitions according to a
/// [`Layout`]; each partition gets its own accumulator and the partial
/// states are merged in the configured [`MergeOrder`]. This mimics what a
/// parallel runtime does, without threads, so that every partitioning and
/// merge order can be exercised reproducibly.
///
/// # Examples
///
/// ```
/// use foldkit::fold::{Layout, MergeOrder, Partitioned, Strategy};
/// use foldkit::LongestReducer;
///
/// let driver = Partitioned::new(2, Layout::Contiguous).merge_order(MergeOrder::Tree);
/// let out = driver.fold(&LongestReducer::new(), ["a", "bb", "cc", "d"]).unwrap();
/// assert_eq!(out, vec!["bb", "cc"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioned {
    partitions: usize,
    layout: Layout,
    order: MergeOrder,
}

impl Partitioned {
    /// Creates a driver with `partitions` partitions, merged left to right.
    ///
    /// A zero partition count is reported by [`fold`](Strategy::fold).
    /// Partitions beyond the number of items would only hold the identity,
    /// so at most one partition per item is materialized.
    #[must_use]
    pub fn new(partitions: usize, layout: Layout) -> Self {
        Self {
            partitions,
            layout,
            order: MergeOrder::default(),
        }
    }

    /// Sets the merge order.
    #[must_use]
    pub fn merge_order(mut self, order: MergeOrder) -> Self {
        self.order = order;
        self
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn order(&self) -> MergeOrder {
        self.order
    }

    fn split<T>(&self, items: Vec<T>) -> Vec<Vec<T>> {
        let n = items.len();
        let p = self.partitions.min(n.max(1));
        let mut parts: Vec<Vec<T>> = (0..p).map(|_| Vec::with_capacity(n / p + 1)).collect();

        match self.layout {
            Layout::Contiguous => {
                let chunk = n.div_ceil(p).max(1);
                for (i, item) in items.into_iter().enumerate() {
                    parts[i / chunk].push(item);
                }
            }
            Layout::Interleaved => {
                for (i, item) in items.into_iter().enumerate() {
                    parts[i % p].push(item);
                }
            }
        }
        parts
    }
}

/// Merges `states` (in partition order) according to `order`.
fn merge_all<R, T>(reducer: &R, states: Vec<R::State>, order: MergeOrder) -> R::State
where
    R: Reducer<T> + ?Sized,
{
    match order {
        MergeOrder::LeftToRight => states
            .into_iter()
            .fold(reducer.init(), |acc, s| reducer.merge(acc, s)),
        MergeOrder::RightToLeft => states
            .into_iter()
            .rev()
            .fold(reducer.init(), |acc, s| reducer.merge(s, acc)),
        MergeOrder::Tree => {
            let mut level = states;
            while level.len() > 1 {
                trace!(width = level.len(), "tree merge level");
                let mut next = Vec::with_capacity(level.len().div_ceil(2));
                let mut it = level.into_iter();
                while let Some(left) = it.next() {
                    match it.next() {
                        Some(right) => next.push(reducer.merge(left, right)),
                        None => next.push(left),
                    }
                }
                level = next;
            }
            level.pop().unwrap_or_else(|| reducer.init())
        }
    }
}

impl Strategy for Partitioned {
    fn fold<R, I>(&self, reducer: &R, items: I) -> Result<R::Output, FoldError>
    where
        I: IntoIterator,
        I::Item: Send,
        R: Reducer<I::Item>,
    {
        if self.partitions == 0 {
            return Err(FoldError::ZeroPartitions);
        }

        let items: Vec<I::Item> = items.into_iter().collect();
        debug!(
            items = items.len(),
            partitions = self.partitions,
            layout = ?self.layout,
            order = ?self.order,
            "partitioned fold"
        );

        let states: Vec<R::State> = self
            .split(items)
            .into_iter()
            .map(|part| {
                let mut state = reducer.init();
                for item in part {
                    reducer.accumulate(&mut state, item);
                }
                state
            })
            .collect();

        let merged = merge_all::<R, I::Item>(reducer, states, self.order);
        Ok(reducer.finish(merged))
    }
}

/// Settings for the [`Parallel`] driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Worker threads; `0` lets rayon pick (one per logical CPU).
    pub threads: usize,
    /// Smallest run of items a worker accumulates on its own.
    pub min_chunk: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            min_chunk: 1,
        }
    }
}

impl ParallelConfig {
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub fn with_min_chunk(mut self, min_chunk: usize) -> Self {
        self.min_chunk = min_chunk;
        self
    }
}

/// Work-stealing driver backed by a dedicated rayon thread pool.
///
/// Rayon splits the input recursively; each split gets a state from
/// [`Reducer::init`], and sibling states are merged left before right, so the
/// grouping of partial results follows input order.
///
/// # Examples
///
/// ```
/// use foldkit::fold::{Parallel, ParallelConfig, Strategy};
/// use foldkit::LongestReducer;
///
/// let driver = Parallel::new(ParallelConfig::default().with_threads(4)).unwrap();
/// let mut out = driver
///     .fold(&LongestReducer::new(), ["alfa", "charlie", "echo", "foxtrot"])
///     .unwrap();
/// out.sort();
/// assert_eq!(out, vec!["charlie", "foxtrot"]);
/// ```
pub struct Parallel {
    pool: rayon::ThreadPool,
    min_chunk: usize,
}

impl Parallel {
    /// Builds the thread pool described by `config`.
    pub fn new(config: ParallelConfig) -> Result<Self, FoldError> {
        if config.min_chunk == 0 {
            return Err(FoldError::ZeroChunk);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("foldkit-{i}"))
            .build()?;
        debug!(
            threads = pool.current_num_threads(),
            min_chunk = config.min_chunk,
            "built fold thread pool"
        );

        Ok(Self {
            pool,
            min_chunk: config.min_chunk,
        })
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Strategy for Parallel {
    fn fold<R, I>(&self, reducer: &R, items: I) -> Result<R::Output, FoldError>
    where
        I: IntoIterator,
        I::Item: Send,
        R: Reducer<I::Item>,
    {
        let items: Vec<I::Item> = items.into_iter().collect();
        debug!(items = items.len(), threads = self.threads(), "parallel fold");

        let state = self.pool.install(|| {
            items
                .into_par_iter()
                .with_min_len(self.min_chunk)
                .fold(
                    || reducer.init(),
                    |mut state, item| {
                        reducer.accumulate(&mut state, item);
                        state
                    },
                )
                .reduce(|| reducer.init(), |left, right| reducer.merge(left, right))
        });

        Ok(reducer.finish(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LongestReducer, ReverseReducer};

    const NATO: [&str; 8] = [
        "alfa", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
    ];

    const ORDERS: [MergeOrder; 3] = [
        MergeOrder::LeftToRight,
        MergeOrder::RightToLeft,
        MergeOrder::Tree,
    ];

    fn sorted(mut v: Vec<&str>) -> Vec<&str> {
        v.sort_unstable();
        v
    }

    #[test]
    fn sequential_keeps_order() {
        let out = Sequential
            .fold(&LongestReducer::new(), ["a", "bb", "cc", "d"])
            .unwrap();
        assert_eq!(out, vec!["bb", "cc"]);
    }

    #[test]
    fn zero_partitions_is_an_error() {
        let res = Partitioned::new(0, Layout::Contiguous).fold(&LongestReducer::new(), NATO);
        assert!(matches!(res, Err(FoldError::ZeroPartitions)));
    }

    #[test]
    fn zero_chunk_is_an_error() {
        let res = Parallel::new(ParallelConfig::default().with_min_chunk(0));
        assert!(matches!(res, Err(FoldError::ZeroChunk)));
    }

    #[test]
    fn split_contiguous_and_interleaved() {
        let items: Vec<u32> = (0..7).collect();

        let parts = Partitioned::new(3, Layout::Contiguous).split(items.clone());
        assert_eq!(parts, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);

        let parts = Partitioned::new(3, Layout::Interleaved).split(items);
        assert_eq!(parts, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn more_partitions_than_items() {
        let parts = Partitioned::new(5, Layout::Contiguous).split(vec!['a', 'b']);
        assert_eq!(parts, vec![vec!['a'], vec!['b']]);

        let parts = Partitioned::new(5, Layout::Interleaved).split(Vec::<char>::new());
        assert_eq!(parts, vec![Vec::<char>::new()]);
    }

    #[test]
    fn huge_partition_counts_stay_cheap() {
        for layout in [Layout::Contiguous, Layout::Interleaved] {
            let driver = Partitioned::new(usize::MAX, layout);
            assert_eq!(driver.split(NATO.to_vec()).len(), NATO.len());
            let out = driver.fold(&LongestReducer::new(), NATO).unwrap();
            assert_eq!(sorted(out), vec!["charlie", "foxtrot"]);
            let empty: [&str; 0] = [];
            assert!(driver.fold(&LongestReducer::new(), empty).unwrap().is_empty());
        }
    }

    #[test]
    fn every_partitioning_finds_charlie_and_foxtrot() {
        for p in 1..=10 {
            for layout in [Layout::Contiguous, Layout::Interleaved] {
                for order in ORDERS {
                    let driver = Partitioned::new(p, layout).merge_order(order);
                    let out = driver.fold(&LongestReducer::new(), NATO).unwrap();
                    assert_eq!(
                        sorted(out),
                        vec!["charlie", "foxtrot"],
                        "partitions={p} layout={layout:?} order={order:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn contiguous_partitions_keep_sequential_order() {
        let words = ["ab", "c", "de", "fg", "h", "ij"];
        for p in 1..=6 {
            for order in ORDERS {
                let driver = Partitioned::new(p, Layout::Contiguous).merge_order(order);
                let out = driver.fold(&LongestReducer::new(), words).unwrap();
                assert_eq!(out, vec!["ab", "de", "fg", "ij"]);
            }
        }
    }

    #[test]
    fn empty_input_under_every_driver() {
        let empty: Vec<&str> = Vec::new();
        let r = LongestReducer::new();
        assert!(Sequential.fold(&r, empty.clone()).unwrap().is_empty());
        for order in ORDERS {
            let driver = Partitioned::new(4, Layout::Interleaved).merge_order(order);
            assert!(driver.fold(&r, empty.clone()).unwrap().is_empty());
        }
        let par = Parallel::new(ParallelConfig::default().with_threads(2)).unwrap();
        assert!(par.fold(&r, empty).unwrap().is_empty());
    }

    #[test]
    fn parallel_matches_sequential_as_a_multiset() {
        let words: Vec<String> = (0..5_000).map(|i| "x".repeat(i % 97)).collect();
        let par = Parallel::new(ParallelConfig::default().with_threads(4)).unwrap();
        let out = par.fold(&LongestReducer::new(), words.clone()).unwrap();
        let seq = Sequential.fold(&LongestReducer::new(), words).unwrap();
        assert_eq!(out.len(), seq.len());
        assert!(out.iter().all(|w| w.len() == 96));
    }

    #[test]
    fn parallel_nato() {
        let par = Parallel::new(ParallelConfig::default().with_threads(3)).unwrap();
        let out = par.fold(&LongestReducer::new(), NATO).unwrap();
        assert_eq!(sorted(out), vec!["charlie", "foxtrot"]);
    }

    #[test]
    fn reverse_is_exact_under_order_preserving_drivers() {
        let input: Vec<String> = (0..100).map(|i| i.to_string()).collect();
        let expected: Vec<String> = (0..100).rev().map(|i| i.to_string()).collect();
        let r = ReverseReducer::new();

        assert_eq!(Sequential.fold(&r, input.clone()).unwrap(), expected);
        for p in [1, 3, 7, 100, 150] {
            for order in ORDERS {
                let driver = Partitioned::new(p, Layout::Contiguous).merge_order(order);
                assert_eq!(driver.fold(&r, input.clone()).unwrap(), expected);
            }
        }
        let par = Parallel::new(ParallelConfig::default().with_threads(4)).unwrap();
        assert_eq!(par.fold(&r, input).unwrap(), expected);
    }
}
