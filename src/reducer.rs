//! The reducer abstraction: a fold whose partial results can be combined.

/// A fold split into four steps so that partial results computed on disjoint
/// partitions can be combined.
///
/// A fold driver (see [`crate::fold`]) creates one state per partition with
/// [`init`](Reducer::init), feeds every item of that partition to
/// [`accumulate`](Reducer::accumulate), combines the partial states pairwise
/// with [`merge`](Reducer::merge) and finally calls
/// [`finish`](Reducer::finish) on the survivor.
///
/// Implementations must make `merge` associative, and `init()` must be an
/// identity for it. Drivers only ever merge a left partition with the
/// partition immediately to its right, so commutativity is only needed up
/// to the ordering of the output.
pub trait Reducer<Item>: Send + Sync {
    /// Per-partition accumulator.
    type State: Send;
    /// Final result.
    type Output;

    /// Returns a fresh, empty state.
    fn init(&self) -> Self::State;

    /// Folds one item into `state`.
    fn accumulate(&self, state: &mut Self::State, item: Item);

    /// Combines the states of two adjacent partitions, `left` before `right`.
    fn merge(&self, left: Self::State, right: Self::State) -> Self::State;

    /// Turns the surviving state into the result.
    fn finish(&self, state: Self::State) -> Self::Output;
}

/// Runs `reducer` over `items` with a single accumulator.
///
/// # Examples
/// ```
/// use foldkit::{LongestReducer, reduce_seq};
///
/// let out = reduce_seq(&LongestReducer::new(), ["a", "bb", "cc", "d"]);
/// assert_eq!(out, vec!["bb", "cc"]);
/// ```
pub fn reduce_seq<R, I>(reducer: &R, items: I) -> R::Output
where
    I: IntoIterator,
    R: Reducer<I::Item> + ?Sized,
{
    let mut state = reducer.init();
    for item in items {
        reducer.accumulate(&mut state, item);
    }
    reducer.finish(state)
}
