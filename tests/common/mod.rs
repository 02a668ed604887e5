//! Common test utilities
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparsr::host::HostCscMatrix;
use sparsr::runtime::Runtime;
use sparsr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Seeded generator so failures reproduce
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random host matrix where each element is stored with probability `density`
///
/// Values are small nonzero integers cast to f64, so sums stay exact.
pub fn random_host_matrix(
    rng: &mut StdRng,
    nrows: usize,
    ncols: usize,
    density: f64,
) -> HostCscMatrix<f64> {
    let mut dense = vec![0.0; nrows * ncols];
    for v in dense.iter_mut() {
        if rng.random_bool(density) {
            let magnitude = rng.random_range(1..=9) as f64;
            *v = if rng.random_bool(0.5) { magnitude } else { -magnitude };
        }
    }
    HostCscMatrix::from_dense(nrows, ncols, &dense).unwrap()
}

/// Random shape in `1..=max` on both axes
pub fn random_shape(rng: &mut StdRng, max: usize) -> [usize; 2] {
    [rng.random_range(1..=max), rng.random_range(1..=max)]
}
