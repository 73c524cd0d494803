use array_queue::ArrayQueue;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn array_queue_enqueue_benchmark(c: &mut Criterion) {
    c.bench_function("array_queue_enqueue_grow", |b| {
        b.iter(
            #[inline(never)]
            || {
                let mut queue = ArrayQueue::new();
                for item in 0..black_box(4096u32) {
                    queue.enqueue(item);
                }
                queue
            },
        );
    });
}

fn array_queue_churn_benchmark(c: &mut Criterion) {
    // steady state: capacity is reached once, then the ring just wraps
    c.bench_function("array_queue_churn", |b| {
        b.iter_batched_ref(
            || ArrayQueue::<u32>::from_iter(0..64),
            |queue| {
                for item in 0..black_box(2048u32) {
                    let first = queue.dequeue().unwrap();
                    queue.enqueue(first.wrapping_add(item));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn array_queue_export_benchmark(c: &mut Criterion) {
    let mut queue = ArrayQueue::<u32>::from_iter(0..1024);
    for item in 0..512 {
        queue.dequeue().unwrap();
        queue.enqueue(item);
    }

    c.bench_function("array_queue_to_vec_wrapped", |b| {
        b.iter(
            #[inline(never)]
            || black_box(&queue).to_vec(),
        );
    });
}

criterion_group!(
    benches,
    array_queue_enqueue_benchmark,
    array_queue_churn_benchmark,
    array_queue_export_benchmark
);
criterion_main!(benches);
