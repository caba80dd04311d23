use std::thread;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::arena::{BufferPool, STACK_THRESHOLD, with_scratch_in};

/// Many threads renting randomly sized scratch buffers from one pool: every
/// rental is returned exactly once and no two live rentals share memory.
#[test]
fn concurrent_rentals_balance() {
    const THREADS: u64 = 8;
    #[cfg(not(miri))]
    let rounds = if is_ci::cached() { 2_000 } else { 500 };
    #[cfg(miri)]
    let rounds = 5;

    let pool = BufferPool::<u64>::new();

    thread::scope(|scope| {
        for id in 0..THREADS {
            let pool = &pool;
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(id);
                for _ in 0..rounds {
                    let len = rng.random_range(1..=STACK_THRESHOLD * 8);
                    let clear = rng.random_bool(0.5);
                    let exclusive = with_scratch_in(pool, len, clear, |buf: &mut [u64]| {
                        assert_eq!(buf.len(), len);
                        buf.fill(id);
                        thread::yield_now();
                        buf.iter().all(|&v| v == id)
                    });
                    assert!(exclusive, "scratch buffer shared between threads");
                }
            });
        }
    });

    let stats = pool.stats();
    assert_eq!(stats.rented, stats.returned);
    assert_eq!(stats.outstanding(), 0);
    assert!(stats.allocated <= stats.rented);
    assert!(stats.retained <= stats.allocated);
}
