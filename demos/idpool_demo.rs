use ringpool_rs::{IdPool, IdPoolConfig};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("ringpool-rs IdPool example");
    println!("============================\n");

    const N_THREADS: u32 = 4;
    const ALLOCS_PER_THREAD: u32 = 200_000;

    let pool = Arc::new(
        IdPool::create(IdPoolConfig::new(N_THREADS, 0, N_THREADS * 64, true)).unwrap(),
    );

    let mut handles = vec![];
    for uid in 0..N_THREADS {
        let pool = Arc::clone(&pool);
        handles.push(thread::spawn(move || {
            let mut held = Vec::new();
            for _ in 0..ALLOCS_PER_THREAD {
                match pool.alloc(uid) {
                    Some(id) => {
                        held.push(id);
                        if held.len() > 8 {
                            pool.free(uid, held.remove(0));
                        }
                    }
                    None => thread::yield_now(),
                }
            }
            for id in held {
                pool.free(uid, id);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = pool.metrics();
    println!("Allocation path breakdown:");
    println!("  fast hits:    {}", snapshot.alloc_fast_hit);
    println!("  refill hits:  {}", snapshot.alloc_refill_hit);
    println!("  steal hits:   {}", snapshot.alloc_steal_hit);
    println!("  exhausted:    {}", snapshot.alloc_exhausted);
    println!("  free (fast):  {}", snapshot.free_fast);
    println!("  free (spill): {}", snapshot.free_overflow);
}
