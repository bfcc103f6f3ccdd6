//! Shared helpers for unit tests.

use std::collections::HashSet;

use common::{Buffer2, NEIGHBORS_4};
use rand::prelude::*;

use crate::raster::Planes;

/// Initialize tracing for tests. Safe to call more than once.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Uniform noise in `[0, 255)` on every channel.
pub fn random_planes(rng: &mut StdRng, width: usize, height: usize, channels: usize) -> Planes {
    let data: Vec<f64> = (0..width * height * channels)
        .map(|_| rng.random_range(0.0..255.0))
        .collect();
    Planes::from_interleaved(width, height, channels, &data).unwrap()
}

/// Single channel that is 0 left of `split` and 255 from `split` on,
/// duplicated into `channels` planes.
pub fn vertical_step(width: usize, height: usize, split: usize, channels: usize) -> Planes {
    let mut plane = Buffer2::new_filled(width, height, 0.0);
    for y in 0..height {
        for x in split..width {
            plane[(x, y)] = 255.0;
        }
    }
    Planes::new(vec![plane; channels]).unwrap()
}

/// Panics unless `labels` uses exactly the ids `0..num_regions` and every id
/// forms a single 4-connected region.
pub fn assert_dense_connected(labels: &Buffer2<u32>, num_regions: usize) {
    let used: HashSet<u32> = labels.iter().copied().collect();
    assert_eq!(used.len(), num_regions, "region count mismatch");
    for &label in &used {
        assert!(
            (label as usize) < num_regions,
            "label {label} out of range 0..{num_regions}"
        );
    }

    let mut visited = vec![false; labels.len()];
    let mut seen = HashSet::new();
    let mut stack = Vec::new();
    for start in 0..labels.len() {
        if visited[start] {
            continue;
        }
        let label = labels[start];
        assert!(seen.insert(label), "label {label} is split into pieces");

        visited[start] = true;
        stack.push(start);
        while let Some(idx) = stack.pop() {
            let (x, y) = labels.coords(idx);
            for (nx, ny) in labels.neighbors(x, y, &NEIGHBORS_4) {
                let n = labels.index(nx, ny);
                if !visited[n] && labels[n] == label {
                    visited[n] = true;
                    stack.push(n);
                }
            }
        }
    }
}
