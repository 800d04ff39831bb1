//! Round-robin sharding of the route list.
//!
//! Item `i` goes to shard `i % n`, where `n` is the requested shard count
//! clamped to the number of items. Interleaving (rather than contiguous
//! blocks) keeps shard sizes within one of each other and spreads routes that
//! sit next to each other in the list, which tend to cost about the same to
//! render, across workers.
//!
//! ```text
//! shard([1, 2, 3, 4, 5], 2) → [[1, 3, 5], [2, 4]]
//! ```

use std::num::NonZeroUsize;

/// Default shard count: one less than the available cores, at least one.
///
/// One core is left for the process driving the workers.
pub fn default_shard_count() -> NonZeroUsize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    NonZeroUsize::new(cores.saturating_sub(1)).unwrap_or(NonZeroUsize::MIN)
}

/// Split `items` into at most `shard_count` interleaved shards.
///
/// Returns exactly `min(shard_count, items.len())` shards, each nonempty and
/// in original relative order. An empty input yields no shards.
pub fn shard<T: Clone>(items: &[T], shard_count: NonZeroUsize) -> Vec<Vec<T>> {
    let shards = shard_count.get().min(items.len());
    let mut out: Vec<Vec<T>> = (0..shards)
        .map(|_| Vec::with_capacity(items.len().div_ceil(shards)))
        .collect();
    for (index, item) in items.iter().enumerate() {
        out[index % shards].push(item.clone());
    }
    out
}
