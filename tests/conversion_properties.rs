//! Randomized checks that conversions preserve the represented matrix

mod common;

use common::{create_cpu_client, random_host_matrix, random_shape, seeded_rng};
use sparsr::prelude::*;

const CASES: u64 = 32;

#[test]
fn test_csc_csr_conversions_preserve_values() {
    let (client, device) = create_cpu_client();
    for seed in 0..CASES {
        let mut rng = seeded_rng(seed);
        let [m, n] = random_shape(&mut rng, 12);
        let host = random_host_matrix(&mut rng, m, n, 0.3);
        let base = if seed % 2 == 0 { IndexBase::Zero } else { IndexBase::One };

        let csc = CscData::<CpuRuntime, f64>::from_host(&host, base, &device).unwrap();
        let csr = csc.to_csr(&client).unwrap();
        csr.validate().unwrap();
        assert_eq!(csr.index_base(), base, "seed {}", seed);
        assert_eq!(csr.nnz(), host.nnz(), "seed {}", seed);
        assert_eq!(csr.to_host().unwrap(), host, "seed {}", seed);

        let back = csr.to_csc(&HostFallback).unwrap();
        assert_eq!(back.to_host().unwrap(), host, "seed {}", seed);
    }
}

#[test]
fn test_bsr_conversions_preserve_values() {
    let (client, device) = create_cpu_client();
    for seed in 0..CASES {
        let mut rng = seeded_rng(1000 + seed);
        let [m, n] = random_shape(&mut rng, 10);
        let host = random_host_matrix(&mut rng, m, n, 0.2);
        let dense = host.to_dense();
        let block_dim = 1 + (seed as usize % 4);
        let direction = if seed % 3 == 0 {
            BlockDirection::Column
        } else {
            BlockDirection::Row
        };

        let csr = CsrData::<CpuRuntime, f64>::from_host(&host, IndexBase::One, &device, &client)
            .unwrap();
        let bsr = csr.to_bsr(block_dim, direction, &client).unwrap();
        bsr.validate().unwrap();
        assert_eq!(bsr.nnz(), bsr.nnzb() * block_dim * block_dim);
        assert_eq!(bsr.to_dense().unwrap(), dense, "seed {}", seed);

        for i in 0..m {
            for j in 0..n {
                assert_eq!(bsr.get(i, j).unwrap(), dense[i * n + j], "seed {} at ({}, {})", seed, i, j);
            }
        }

        let back = bsr.to_csr(&client).unwrap();
        assert_eq!(back.to_dense().unwrap(), dense, "seed {}", seed);
    }
}

#[test]
fn test_slices_match_dense() {
    let (client, device) = create_cpu_client();
    for seed in 0..CASES {
        let mut rng = seeded_rng(2000 + seed);
        let [m, n] = random_shape(&mut rng, 8);
        let host = random_host_matrix(&mut rng, m, n, 0.4);
        let dense = host.to_dense();

        let csc = CscData::<CpuRuntime, f64>::from_host(&host, IndexBase::One, &device).unwrap();
        let csr = csc.to_csr(&client).unwrap();

        for j in 0..n {
            let expected: Vec<f64> = (0..m).map(|i| dense[i * n + j]).collect();
            assert_eq!(csc.column(j).unwrap().to_dense().unwrap(), expected);
            assert_eq!(csr.column(j, &client).unwrap().to_dense().unwrap(), expected);
        }
        for i in 0..m {
            let expected = dense[i * n..(i + 1) * n].to_vec();
            assert_eq!(csr.row(i).unwrap().to_dense().unwrap(), expected);
            assert_eq!(csc.row(i, &client).unwrap().to_dense().unwrap(), expected);
        }
    }
}

#[test]
fn test_index_base_rebasing_keeps_values() {
    let (client, device) = create_cpu_client();
    for seed in 0..CASES {
        let mut rng = seeded_rng(3000 + seed);
        let [m, n] = random_shape(&mut rng, 9);
        let host = random_host_matrix(&mut rng, m, n, 0.3);

        let zero = CscData::<CpuRuntime, f64>::from_host(&host, IndexBase::Zero, &device).unwrap();
        let one = zero.with_index_base(IndexBase::One).unwrap();
        let shifted: Vec<i32> = zero.row_indices().to_vec().unwrap().iter().map(|r| r + 1).collect();
        assert_eq!(one.row_indices().to_vec().unwrap(), shifted);
        assert_eq!(one.to_host().unwrap(), host);

        let csr = one.to_csr(&client).unwrap().with_index_base(IndexBase::Zero).unwrap();
        assert_eq!(csr.to_host().unwrap(), host);
    }
}
