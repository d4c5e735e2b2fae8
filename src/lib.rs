//! Single-pass reducers whose partial results can be combined, and the fold
//! drivers that run them sequentially, over explicit partitions, or on a
//! rayon thread pool.
//!
//! The central piece is [`Longest`], which keeps the longest elements of a
//! sequence in one pass. Around it sit a few other mergeable reducers
//! ([`Reversed`], [`algorithms::MajorityVote`]) and a handful of collection
//! transformations in [`transform`] and [`hierarchy`].
//!
//! ```
//! use foldkit::fold::{Parallel, ParallelConfig, Strategy};
//! use foldkit::{LongestReducer, reduce_seq};
//!
//! let words = ["alfa", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel"];
//! assert_eq!(reduce_seq(&LongestReducer::new(), words), vec!["charlie", "foxtrot"]);
//!
//! let parallel = Parallel::new(ParallelConfig::default()).unwrap();
//! let mut out = parallel.fold(&LongestReducer::new(), words).unwrap();
//! out.sort();
//! assert_eq!(out, vec!["charlie", "foxtrot"]);
//! ```

pub mod measure;
pub use measure::Measure;

pub mod reducer;
pub use reducer::{Reducer, reduce_seq};

pub mod longest;
pub use longest::{InvalidLongest, Longest, LongestReducer};

pub mod reverse;
pub use reverse::{ReverseReducer, Reversed};

pub mod fold;
pub use fold::{FoldError, Strategy};

pub mod algorithms;

pub mod transform;

pub mod hierarchy;

pub mod gen_sequences;

pub mod utils;
