//! Random inputs for tests and benchmarks.
use rand::Rng;
use rand::seq::SliceRandom;

/// Generates `n` random lowercase words, each with length in [0, `max_len`].
///
/// ## Examples
/// ```
/// use foldkit::gen_sequences::gen_words;
///
/// let words = gen_words(5, 10);
/// assert_eq!(words.len(), 5);
/// assert!(words.iter().all(|w| w.len() <= 10));
/// ```
pub fn gen_words(n: usize, max_len: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| {
            let len = rng.random_range(0..=max_len);
            (0..len).map(|_| rng.random_range('a'..='z')).collect()
        })
        .collect()
}

/// Distributes `items` over `k` partitions uniformly at random.
///
/// Every item lands in exactly one partition and keeps its relative order
/// inside it. Some partitions may be empty.
///
/// ## Examples
/// ```
/// use foldkit::gen_sequences::random_partitions;
///
/// let parts = random_partitions((0..20).collect::<Vec<u32>>(), 4);
/// assert_eq!(parts.len(), 4);
/// assert_eq!(parts.iter().map(Vec::len).sum::<usize>(), 20);
/// ```
///
/// # Panics
/// Panics if `k` is zero.
pub fn random_partitions<T>(items: Vec<T>, k: usize) -> Vec<Vec<T>> {
    assert!(k > 0, "need at least one partition");

    let mut rng = rand::rng();
    let mut parts: Vec<Vec<T>> = (0..k).map(|_| Vec::new()).collect();
    for item in items {
        parts[rng.random_range(0..k)].push(item);
    }
    parts
}

/// Returns the items in a random order.
pub fn shuffled<T>(mut items: Vec<T>) -> Vec<T> {
    items.shuffle(&mut rand::rng());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Longest;

    #[test]
    fn words_are_lowercase_ascii() {
        let words = gen_words(200, 6);
        assert!(
            words
                .iter()
                .all(|w| w.len() <= 6 && w.bytes().all(|b| b.is_ascii_lowercase()))
        );
    }

    #[test]
    fn random_partitions_merge_to_the_same_set() {
        let words = gen_words(500, 12);
        let mut expected = words.iter().cloned().collect::<Longest<String>>().finish();
        expected.sort();

        for k in [1, 2, 5, 17] {
            let parts: Vec<Longest<String>> = random_partitions(words.clone(), k)
                .into_iter()
                .map(|p| p.into_iter().collect())
                .collect();
            let mut got = shuffled(parts)
                .into_iter()
                .fold(Longest::new(), Longest::merge)
                .finish();
            got.sort();
            assert_eq!(got, expected, "k={k}");
        }
    }

    #[test]
    #[should_panic]
    fn zero_partitions_panics() {
        random_partitions(vec![1, 2, 3], 0);
    }
}
