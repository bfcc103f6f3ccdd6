//! Connectivity repair for raw cluster labels.
//!
//! Clustering can leave a label split across several disconnected pieces, and
//! can produce slivers too small to be useful. A single raster scan flood-fills
//! every 4-connected run of equal raw labels and gives it a fresh dense id.
//! Pieces of at most `(area / K) / 4` pixels instead take the id of a region
//! touching their first pixel.


use common::{Buffer2, NEIGHBORS_4};

use crate::clustering::UNASSIGNED;
use crate::config::min_region_size;

/// Dense, connected labeling: ids in `0..num_regions`, each id one
/// 4-connected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Buffer2<u32>,
    num_regions: usize,
}

impl LabelMap {
    pub fn labels(&self) -> &Buffer2<u32> {
        &self.labels
    }

    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    pub fn into_labels(self) -> Buffer2<u32> {
        self.labels
    }
}

/// Relabel `raw` into connected regions, merging undersized pieces.
///
/// `k` is the requested region count; it only sets the size threshold.
/// [`UNASSIGNED`] pixels in `raw` are never grouped with each other and are
/// always merged into a neighboring region.
///
/// # Panics
///
/// Panics if `k` is zero.
pub fn enforce_connectivity(raw: &Buffer2<u32>, k: usize) -> LabelMap {
    assert!(k > 0, "requested region count must be positive");
    let (width, height) = raw.size();
    let threshold = min_region_size(width, height, k);

    let mut labels = Buffer2::new_filled(width, height, UNASSIGNED);
    let mut component: Vec<usize> = Vec::with_capacity(raw.len());
    let mut next_label = 0u32;
    // Merge target; carried over between components, starts at 0.
    let mut adjacent = 0u32;
    let mut merged = 0usize;

    for start in 0..raw.len() {
        if labels[start] != UNASSIGNED {
            continue;
        }
        let (x, y) = raw.coords(start);

        for (nx, ny) in raw.neighbors(x, y, &NEIGHBORS_4) {
            let neighbor = labels[(nx, ny)];
            if neighbor != UNASSIGNED {
                adjacent = neighbor;
            }
        }

        let original = raw[start];
        labels[start] = next_label;
        component.clear();
        component.push(start);

        if original != UNASSIGNED {
            let mut head = 0;
            while head < component.len() {
                let (cx, cy) = raw.coords(component[head]);
                for (nx, ny) in raw.neighbors(cx, cy, &NEIGHBORS_4) {
                    let n = raw.index(nx, ny);
                    if labels[n] == UNASSIGNED && raw[n] == original {
                        labels[n] = next_label;
                        component.push(n);
                    }
                }
                head += 1;
            }
        }

        if original == UNASSIGNED || component.len() <= threshold {
            for &idx in &component {
                labels[idx] = adjacent;
            }
            merged += 1;
        } else {
            next_label += 1;
        }
    }

    // Every piece merged only happens when all of them landed on id 0.
    let num_regions = if raw.is_empty() {
        0
    } else {
        (next_label as usize).max(1)
    };

    tracing::debug!(
        regions = num_regions,
        merged,
        threshold,
        "Connectivity enforced"
    );

    LabelMap {
        labels,
        num_regions,
    }
}
