//! Small collection transformations: flattening and inverting maps,
//! run splitting, grouping, partitioning and partial application.
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

/// Flattens a one-to-many map into `"value:key"` strings.
///
/// Output order follows the iteration order of `map`, then of each value
/// collection.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use foldkit::transform::denormalize;
///
/// let legs = BTreeMap::from([(4, vec!["ibex", "wombat"]), (750, vec!["millipede"])]);
/// assert_eq!(denormalize(&legs), vec!["ibex:4", "wombat:4", "millipede:750"]);
/// ```
pub fn denormalize<M, K, VS>(map: M) -> Vec<String>
where
    M: IntoIterator<Item = (K, VS)>,
    K: Display,
    VS: IntoIterator,
    VS::Item: Display,
{
    map.into_iter()
        .flat_map(|(key, values)| {
            values
                .into_iter()
                .map(move |value| format!("{value}:{key}"))
        })
        .collect()
}

/// Inverts a multimap: every member of a value set becomes a key whose set
/// holds the original keys it appeared under.
///
/// Single pass over the input; no intermediate collection is built.
///
/// # Examples
/// ```
/// use std::collections::{HashMap, HashSet};
/// use foldkit::transform::invert_multimap;
///
/// let input = HashMap::from([
///     ("p", HashSet::from([10, 20])),
///     ("q", HashSet::from([20, 30])),
/// ]);
/// let inverted = invert_multimap(input);
/// assert_eq!(inverted[&10], HashSet::from(["p"]));
/// assert_eq!(inverted[&20], HashSet::from(["p", "q"]));
/// assert_eq!(inverted[&30], HashSet::from(["q"]));
/// ```
pub fn invert_multimap<M, X, YS>(map: M) -> HashMap<YS::Item, HashSet<X>>
where
    M: IntoIterator<Item = (X, YS)>,
    X: Clone + Eq + Hash,
    YS: IntoIterator,
    YS::Item: Eq + Hash,
{
    map.into_iter()
        .flat_map(|(x, ys)| ys.into_iter().map(move |y| (y, x.clone())))
        .fold(HashMap::new(), |mut acc, (y, x)| {
            acc.entry(y).or_insert_with(HashSet::new).insert(x);
            acc
        })
}

/// Splits `s` into maximal runs of equal consecutive characters.
///
/// The runs borrow from `s` and concatenate back to it.
///
/// # Examples
/// ```
/// use foldkit::transform::split_runs;
///
/// assert_eq!(
///     split_runs("aaaaabbccccdeeeeeeaaafff"),
///     vec!["aaaaa", "bb", "cccc", "d", "eeeeee", "aaa", "fff"]
/// );
/// assert!(split_runs("").is_empty());
/// ```
pub fn split_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (i, c) in s.char_indices() {
        if prev.is_some_and(|p| p != c) {
            runs.push(&s[start..i]);
            start = i;
        }
        prev = Some(c);
    }
    if start < s.len() {
        runs.push(&s[start..]);
    }
    runs
}

/// Groups items by `key`, collecting each group into any `C: Default + Extend`.
///
/// The downstream container is the caller's choice: a `Vec` keeps encounter
/// order, a `HashSet` deduplicates, a [`Longest`](crate::Longest) keeps only
/// the longest items of each group.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
/// use foldkit::Longest;
/// use foldkit::transform::group_into;
///
/// let words = ["ant", "beetle", "bee", "antelope", "bat"];
/// let by_initial: HashMap<char, Longest<&str>> =
///     group_into(words, |w| w.chars().next().unwrap_or_default());
/// assert_eq!(by_initial[&'a'].items(), &["antelope"]);
/// assert_eq!(by_initial[&'b'].items(), &["beetle"]);
/// ```
pub fn group_into<I, K, C, F>(items: I, mut key: F) -> HashMap<K, C>
where
    I: IntoIterator,
    K: Eq + Hash,
    C: Default + Extend<I::Item>,
    F: FnMut(&I::Item) -> K,
{
    let mut groups: HashMap<K, C> = HashMap::new();
    for item in items {
        groups
            .entry(key(&item))
            .or_default()
            .extend(std::iter::once(item));
    }
    groups
}

/// Groups items by `key` into vectors, keeping encounter order inside groups.
pub fn group_by<I, K, F>(items: I, key: F) -> HashMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    group_into(items, key)
}

/// Splits items in two containers: `(matching, rest)`.
///
/// Both containers are always returned, even when one is empty.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use foldkit::transform::partition_into;
///
/// let (even, odd): (BTreeSet<_>, BTreeSet<_>) = partition_into([3, 1, 2, 2, 4], |x| x % 2 == 0);
/// assert_eq!(even, BTreeSet::from([2, 4]));
/// assert_eq!(odd, BTreeSet::from([1, 3]));
/// ```
pub fn partition_into<I, C, P>(items: I, mut pred: P) -> (C, C)
where
    I: IntoIterator,
    C: Default + Extend<I::Item>,
    P: FnMut(&I::Item) -> bool,
{
    let mut yes = C::default();
    let mut no = C::default();
    for item in items {
        if pred(&item) {
            yes.extend(std::iter::once(item));
        } else {
            no.extend(std::iter::once(item));
        }
    }
    (yes, no)
}

/// Binds `arg` to `f`, returning a zero-argument factory.
///
/// Every call runs `f` again on a clone of `arg`, so each call yields a new
/// value.
///
/// # Examples
/// ```
/// use foldkit::transform::supplier;
///
/// #[derive(Debug, PartialEq)]
/// struct Shoe(u32);
///
/// let nines = supplier(Shoe, 9);
/// assert_eq!(nines(), Shoe(9));
/// assert_eq!(nines(), nines());
/// ```
pub fn supplier<A, T, F>(f: F, arg: A) -> impl Fn() -> T
where
    A: Clone,
    F: Fn(A) -> T,
{
    move || f(arg.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Longest;
    use std::collections::BTreeMap;

    #[test]
    fn denormalize_animals() {
        let input: HashMap<u32, Vec<&str>> = HashMap::from([
            (4, vec!["ibex", "hedgehog", "wombat"]),
            (6, vec!["ant", "beetle", "cricket"]),
            (8, vec!["octopus", "spider", "squid"]),
            (10, vec!["crab", "lobster", "scorpion"]),
            (750, vec!["millipede"]),
        ]);

        let result = denormalize(&input);
        assert_eq!(result.len(), 13);
        for expected in [
            "ibex:4",
            "hedgehog:4",
            "wombat:4",
            "ant:6",
            "beetle:6",
            "cricket:6",
            "octopus:8",
            "spider:8",
            "squid:8",
            "crab:10",
            "lobster:10",
            "scorpion:10",
            "millipede:750",
        ] {
            assert!(result.iter().any(|r| r == expected), "missing {expected}");
        }
    }

    #[test]
    fn denormalize_empty() {
        let input: BTreeMap<u8, Vec<&str>> = BTreeMap::new();
        assert!(denormalize(&input).is_empty());
        let input = BTreeMap::from([(1, Vec::<&str>::new())]);
        assert!(denormalize(input).is_empty());
    }

    #[test]
    fn invert_letters_and_numbers() {
        let input: HashMap<&str, HashSet<u32>> = HashMap::from([
            ("a", HashSet::from([1, 2])),
            ("b", HashSet::from([2, 3])),
            ("c", HashSet::from([1, 3])),
            ("d", HashSet::from([1, 4])),
            ("e", HashSet::from([2, 4])),
            ("f", HashSet::from([3, 4])),
        ]);

        let result = invert_multimap(input);
        assert_eq!(result.len(), 4);
        assert_eq!(result[&1], HashSet::from(["a", "c", "d"]));
        assert_eq!(result[&2], HashSet::from(["a", "b", "e"]));
        assert_eq!(result[&3], HashSet::from(["b", "c", "f"]));
        assert_eq!(result[&4], HashSet::from(["d", "e", "f"]));

        let src = HashMap::from([("z", HashSet::from([9u32]))]);
        let borrowed = invert_multimap(&src);
        assert_eq!(borrowed.len(), 1);
        assert_eq!(borrowed[&9], HashSet::from([&"z"]));
    }

    #[test]
    fn invert_twice_round_trips_nonempty_sets() {
        let input = HashMap::from([("x", HashSet::from([1])), ("y", HashSet::from([1, 2]))]);
        let back = invert_multimap(invert_multimap(input.clone()));
        assert_eq!(back, input);
    }

    #[test]
    fn split_runs_edge_cases() {
        assert_eq!(split_runs("a"), vec!["a"]);
        assert_eq!(split_runs("abc"), vec!["a", "b", "c"]);
        assert_eq!(split_runs("ééa"), vec!["éé", "a"]);
        let s = "aaaaabbccccdeeeeeeaaafff";
        assert_eq!(split_runs(s).concat(), s);
    }

    #[test]
    fn group_by_keeps_order_in_groups() {
        let groups = group_by(["alfa", "bravo", "echo", "golf", "hotel"], |w| w.len());
        assert_eq!(groups[&4], vec!["alfa", "echo", "golf"]);
        assert_eq!(groups[&5], vec!["bravo", "hotel"]);
    }

    #[test]
    fn group_into_longest_per_key() {
        let groups: HashMap<bool, Longest<&str>> = group_into(
            ["alfa", "bravo", "charlie", "delta", "echo", "foxtrot"],
            |w| w.len() % 2 == 0,
        );
        assert_eq!(groups[&true].items(), &["alfa", "echo"]);
        assert_eq!(groups[&false].items(), &["charlie", "foxtrot"]);
    }

    #[test]
    fn partition_keeps_both_sides() {
        let (yes, no): (Vec<u32>, Vec<u32>) = partition_into([1, 3, 5], |x| x % 2 == 0);
        assert!(yes.is_empty());
        assert_eq!(no, vec![1, 3, 5]);
    }

    #[test]
    fn supplier_creates_fresh_values() {
        let make = supplier(|n: u32| Box::new(n), 13);
        let a = make();
        let b = make();
        assert_eq!(a, b);
        assert!(!std::ptr::eq(&*a, &*b));
    }
}
