#![allow(dead_code)]

use fluxbench::{Bencher, flux};
use std::hint::black_box;

use sparsr::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> (CpuDevice, CpuClient) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (device, client)
}

/// Banded n×n matrix with `width` entries per column
fn banded(n: usize, width: usize) -> HostCscMatrix<f64> {
    let mut rows = Vec::with_capacity(n * width);
    let mut cols = Vec::with_capacity(n * width);
    let mut vals = Vec::with_capacity(n * width);
    for j in 0..n {
        for k in 0..width {
            rows.push((j + k * 7) % n);
            cols.push(j);
            vals.push((k + 1) as f64);
        }
    }
    HostCscMatrix::from_triplets(n, n, &rows, &cols, &vals).unwrap()
}

fn csc(n: usize, width: usize, device: &CpuDevice) -> CscData<CpuRuntime, f64> {
    CscData::from_host(&banded(n, width), IndexBase::One, device).unwrap()
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

#[flux::bench(group = "get_f64")]
fn sparsr_get_1k(b: &mut Bencher) {
    let (device, _client) = setup();
    let m = csc(1_000, 16, &device);
    b.iter(|| black_box(m.get(497, 500).unwrap()));
}

#[flux::bench(group = "get_f64")]
fn sparsr_get_100k(b: &mut Bencher) {
    let (device, _client) = setup();
    let m = csc(100_000, 16, &device);
    b.iter(|| black_box(m.get(49_997, 50_000).unwrap()));
}

// ---------------------------------------------------------------------------
// native vs cross slices
// ---------------------------------------------------------------------------

#[flux::bench(group = "slice_f64")]
fn sparsr_column_10k(b: &mut Bencher) {
    let (device, _client) = setup();
    let m = csc(10_000, 32, &device);
    b.iter(|| black_box(m.column(5_000).unwrap()));
}

#[flux::bench(group = "slice_f64")]
fn sparsr_row_10k(b: &mut Bencher) {
    let (device, client) = setup();
    let m = csc(10_000, 32, &device);
    b.iter(|| black_box(m.row(5_000, &client).unwrap()));
}

fn main() {
    fluxbench::run().unwrap();
}
