use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use spill::hashing::Murmur3;
use spill::table::BucketedHashTable;
use spill::{HashMap, SpillError, StreamHasher};
use std::hint::black_box;

const NUM_KEYS: usize = 10_000;

/// Sends every key into the same bucket.
#[derive(Default)]
struct ConstantHasher;

impl StreamHasher for ConstantHasher {
    type Digest = [u8; 1];

    fn write(&mut self, _bytes: &[u8]) -> Result<(), SpillError> {
        Ok(())
    }

    fn sum(&self) -> Self::Digest {
        [1]
    }

    fn reset(&mut self) {}

    fn digest_size(&self) -> usize {
        1
    }

    fn block_size(&self) -> usize {
        4
    }
}

fn keys(num_keys: usize) -> Vec<String> {
    (0..num_keys).map(|i| format!("key{i}")).collect()
}

fn insert(c: &mut Criterion) {
    let keys = keys(NUM_KEYS);

    c.bench_function("table insert 10k keys", |b| {
        b.iter_batched(
            || BucketedHashTable::new(Murmur3::default(), 8, 0.75).unwrap(),
            |mut table| {
                for (i, key) in keys.iter().enumerate() {
                    table.insert(key.as_str(), i).unwrap();
                }
                table
            },
            BatchSize::LargeInput,
        );
    });
}

fn insert_with_collisions(c: &mut Criterion) {
    let keys = keys(1_000);

    c.bench_function("table insert 1k colliding keys", |b| {
        b.iter_batched(
            || BucketedHashTable::new(ConstantHasher, 8, 0.75).unwrap(),
            |mut table| {
                for (i, key) in keys.iter().enumerate() {
                    table.insert(key.as_str(), i).unwrap();
                }
                table
            },
            BatchSize::LargeInput,
        );
    });
}

fn get(c: &mut Criterion) {
    let keys = keys(NUM_KEYS);
    let mut table = BucketedHashTable::new(Murmur3::default(), 8, 0.75).unwrap();
    for (i, key) in keys.iter().enumerate() {
        table.insert(key.as_str(), i).unwrap();
    }

    c.bench_function("table get existing key", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % NUM_KEYS;
            black_box(table.get(&keys[i]).unwrap())
        });
    });

    c.bench_function("table get missing key", |b| {
        b.iter(|| black_box(table.get(black_box("missing")).unwrap()));
    });
}

criterion_group!(benches, insert, insert_with_collisions, get);
criterion_main!(benches);
