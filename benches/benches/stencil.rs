// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_stencil::{Region, RegionBuffer, Stencil};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_below(&mut self, upper_exclusive: u32) -> u32 {
        if upper_exclusive == 0 {
            return 0;
        }
        self.next_u32() % upper_exclusive
    }
}

/// Small damage rectangles scattered over a `size x size` buffer.
fn damage_regions(size: u32, count: usize, seed: u64) -> Vec<Region> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let w = rng.gen_below(size / 8) + 1;
            let h = rng.gen_below(size / 8) + 1;
            let x = rng.gen_below(size - w + 1);
            let y = rng.gen_below(size - h + 1);
            Region::new(x as i32, y as i32, w as i32, h as i32)
        })
        .collect()
}

fn scattered_buffer(size: u32, seed: u64) -> RegionBuffer {
    let mut buf = RegionBuffer::new(size, size).expect("valid size");
    for region in damage_regions(size, 16, seed) {
        buf.merge_region(region).expect("region in range");
    }
    buf
}

fn bench_stencil(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_stencil");
    group.sample_size(50);

    for &size in &[64_u32, 256_u32, 1_024_u32] {
        let regions = damage_regions(size, 64, 0x57E0_0000_0000_0001);

        group.bench_function(format!("merge_then_take_bounds(size={size})"), |b| {
            b.iter_batched(
                || RegionBuffer::new(size, size).expect("valid size"),
                |mut buf| {
                    for &region in &regions {
                        buf.merge_region(region).expect("region in range");
                    }
                    black_box(buf.take_bounding_region());
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("bounding_region_sparse(size={size})"), |b| {
            let mut buf = RegionBuffer::new(size, size).expect("valid size");
            buf.set(size / 2, size / 2, true).expect("cell in range");
            b.iter(|| black_box(buf.bounding_region()));
        });

        group.bench_function(format!("active_in_every_row(size={size})"), |b| {
            let buf = scattered_buffer(size, 0x57E0_0000_0000_0002);
            b.iter(|| {
                let total: usize = (0..size)
                    .map(|row| buf.active_in_row(row).expect("row in range"))
                    .sum();
                black_box(total);
            });
        });

        group.bench_function(format!("union_and_complement(size={size})"), |b| {
            let a = scattered_buffer(size, 0x57E0_0000_0000_0003);
            let other = scattered_buffer(size, 0x57E0_0000_0000_0004);
            b.iter(|| {
                let merged = a.union(&other).expect("same shape");
                black_box(!merged);
            });
        });

        group.bench_function(format!("iter_active_sum(size={size})"), |b| {
            let buf = scattered_buffer(size, 0x57E0_0000_0000_0005);
            b.iter(|| {
                let sum: u64 = buf
                    .iter_active()
                    .fold(0_u64, |acc, (x, y)| acc + u64::from(x) + u64::from(y));
                black_box(sum);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stencil);
criterion_main!(benches);
