use ringpool_rs::Ring;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn main() {
    println!("ringpool-rs Ring example");
    println!("=========================\n");

    let ring = Arc::new(Ring::new(4096).unwrap());

    const N_PRODUCERS: u32 = 4;
    const ITEMS_PER_PRODUCER: u32 = 1_000_000;

    println!("Configuration:");
    println!("  Producers: {N_PRODUCERS}");
    println!("  Items per producer: {ITEMS_PER_PRODUCER}");
    println!("  Total items: {}\n", N_PRODUCERS * ITEMS_PER_PRODUCER);

    let start = Instant::now();

    let mut handles = vec![];
    for id in 0..N_PRODUCERS {
        let ring = Arc::clone(&ring);
        let handle = thread::spawn(move || {
            for i in 0..ITEMS_PER_PRODUCER {
                let value = id * ITEMS_PER_PRODUCER + i;
                while !ring.try_enqueue(value) {
                    thread::yield_now();
                }
            }
            println!("Producer {id} finished");
        });
        handles.push(handle);
    }

    let consumer_ring = Arc::clone(&ring);
    let total_items = u64::from(N_PRODUCERS) * u64::from(ITEMS_PER_PRODUCER);
    let consumer_handle = thread::spawn(move || {
        let mut total = 0u64;
        let mut sum = 0u64;
        while total < total_items {
            match consumer_ring.try_dequeue() {
                Some(v) => {
                    sum += u64::from(v);
                    total += 1;
                }
                None => thread::yield_now(),
            }
        }
        (total, sum)
    });

    for handle in handles {
        handle.join().unwrap();
    }

    let (total, sum) = consumer_handle.join().unwrap();
    let duration = start.elapsed();

    println!("\nResults:");
    println!("  Items consumed: {total}");
    println!("  Sum: {sum}");
    println!("  Duration: {duration:.2?}");
    println!(
        "  Throughput: {:.2} million items/sec",
        total as f64 / duration.as_secs_f64() / 1_000_000.0
    );
}
