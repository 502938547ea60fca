use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use offset_heap::benchmark::InputOrder;
use offset_heap::OffsetHeap;
use std::time::Duration;

const SIZES: &[usize] = &[5000, 65536];
const OFFSETS: &[usize] = &[0, 1, 2, 3, 4, 7, 8, 15, 16];

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    for &size in SIZES {
        let values = InputOrder::Descending.generate(size);
        group.throughput(Throughput::Elements(size as u64));

        for &offset in OFFSETS {
            group.bench_with_input(
                BenchmarkId::new(format!("offset_{}", offset), size),
                &values,
                |b, values| {
                    b.iter(|| OffsetHeap::from_slice_with_offset(values, offset).unwrap());
                },
            );
        }
    }
    group.finish();
}

fn bench_set_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_offset");

    for &size in SIZES {
        let values = InputOrder::Shuffled { seed: 1 }.generate(size);
        let heap = OffsetHeap::from_slice_with_offset(&values, 16).unwrap();

        group.bench_with_input(BenchmarkId::new("reheapify", size), &heap, |b, heap| {
            b.iter(|| {
                let mut heap = heap.clone();
                heap.set_offset(8).unwrap();
                heap
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_set_offset);
criterion_main!(benches);
