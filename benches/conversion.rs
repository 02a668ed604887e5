#![allow(dead_code)]

use fluxbench::{Bencher, flux};
use std::hint::black_box;

use sparsr::prelude::*;

fn setup() -> (CpuDevice, CpuClient) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (device, client)
}

/// Block-diagonal-ish n×n matrix, dense 4×4 tiles along the diagonal
fn tiled(n: usize) -> HostCscMatrix<f32> {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut vals = Vec::new();
    for t in 0..n / 4 {
        for r in 0..4 {
            for c in 0..4 {
                rows.push(t * 4 + r);
                cols.push(t * 4 + c);
                vals.push((r * 4 + c + 1) as f32);
            }
        }
    }
    HostCscMatrix::from_triplets(n, n, &rows, &cols, &vals).unwrap()
}

// ---------------------------------------------------------------------------
// host <-> device
// ---------------------------------------------------------------------------

#[flux::bench(group = "host_transfer_f32")]
fn sparsr_from_host_64k(b: &mut Bencher) {
    let (device, _client) = setup();
    let host = tiled(65_536);
    b.iter(|| black_box(CscData::<CpuRuntime, f32>::from_host(&host, IndexBase::One, &device).unwrap()));
}

#[flux::bench(group = "host_transfer_f32")]
fn sparsr_to_host_64k(b: &mut Bencher) {
    let (device, _client) = setup();
    let m = CscData::<CpuRuntime, f32>::from_host(&tiled(65_536), IndexBase::One, &device).unwrap();
    b.iter(|| black_box(m.to_host().unwrap()));
}

// ---------------------------------------------------------------------------
// format switches
// ---------------------------------------------------------------------------

#[flux::bench(group = "format_f32")]
fn sparsr_csc_to_csr_64k(b: &mut Bencher) {
    let (device, client) = setup();
    let m = CscData::<CpuRuntime, f32>::from_host(&tiled(65_536), IndexBase::Zero, &device).unwrap();
    b.iter(|| black_box(m.to_csr(&client).unwrap()));
}

#[flux::bench(group = "format_f32")]
fn sparsr_csr_to_bsr4_64k(b: &mut Bencher) {
    let (device, client) = setup();
    let csr = CsrData::<CpuRuntime, f32>::from_host(&tiled(65_536), IndexBase::Zero, &device, &client)
        .unwrap();
    b.iter(|| black_box(csr.to_bsr(4, BlockDirection::Row, &client).unwrap()));
}

fn main() {
    fluxbench::run().unwrap();
}
