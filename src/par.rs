// src/par.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::revision::Revision;
use crate::rng::Mx3Rng;

/// Parallel map over a slice, keeping output order deterministic.
/// Spawns `threads` workers; with `threads <= 1` it runs serially.
pub fn parallel_map_indexed<I, T, F>(items: &[I], threads: usize, f: F) -> Vec<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I, usize) -> T + Sync,
{
    let n = items.len();
    if n == 0 || threads <= 1 {
        return items.iter().enumerate().map(|(i, item)| f(item, i)).collect();
    }
    let threads = threads.min(n);
    tracing::debug!(items = n, threads, "parallel map");

    let out: Mutex<Vec<Option<T>>> = Mutex::new(std::iter::repeat_with(|| None).take(n).collect());
    let next = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= n { break; }
                let res = f(&items[i], i);
                // a poisoned lock means another worker panicked; the scope re-raises that panic
                if let Ok(mut guard) = out.lock() { guard[i] = Some(res); }
            });
        }
    });

    out.into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .into_iter()
        .map(|x| x.expect("every index is claimed by exactly one worker"))
        .collect()
}

/// Digest every buffer with the same seed; results are in input order.
pub fn hash_all<B: AsRef<[u8]> + Sync>(buffers: &[B], seed: u64, threads: usize) -> Vec<u64> {
    hash_all_with(Revision::default(), buffers, seed, threads)
}

pub fn hash_all_with<B: AsRef<[u8]> + Sync>(revision: Revision, buffers: &[B], seed: u64, threads: usize) -> Vec<u64> {
    parallel_map_indexed(buffers, threads, |b, _| revision.hash(b.as_ref(), seed))
}

/// `draws` outputs from each of `streams` independent generators derived from `base_seed`.
pub fn draw_streams(base_seed: u64, streams: usize, draws: usize, threads: usize) -> Vec<Vec<u64>> {
    let ids: Vec<u64> = (0..streams as u64).collect();
    parallel_map_indexed(&ids, threads, |&id, _| {
        let mut rng = Mx3Rng::for_stream(base_seed, id);
        (0..draws).map(|_| rng.next_u64()).collect()
    })
}
