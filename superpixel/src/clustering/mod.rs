//! Iterative local k-means with per-cluster adaptive color normalization.
//!
//! Each iteration has three passes:
//!
//! 1. **Assignment**: every seed scans a square window around its position.
//!    A pixel takes the label of the seed with the smallest combined distance
//!    `color / max_color[seed] + spatial / S²`. The best distance per pixel is
//!    shared by all windows of the iteration, so overlapping windows compete
//!    for the pixel; it is reset only when the next iteration starts.
//! 2. **Scale update**: each cluster's `max_color`/`max_spatial` grows to the
//!    largest distance among the pixels it won. Scales never shrink.
//! 3. **Centroid update**: seeds move to the mean color and position of
//!    their pixels. A seed that won nothing keeps its previous centroid.
//!
//! The loop runs a fixed number of iterations; there is no convergence test.


use common::Buffer2;
use glam::DVec2;

use crate::config::{window_offset, INITIAL_COLOR_SCALE};
use crate::raster::Planes;
use crate::seeds::Seed;

/// Label of a pixel that no seed window has reached yet.
pub const UNASSIGNED: u32 = u32::MAX;

/// Adaptive normalization factors, one entry per seed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterScales {
    /// Largest squared color distance seen for each cluster.
    pub color: Vec<f64>,
    /// Largest squared spatial distance seen for each cluster.
    pub spatial: Vec<f64>,
}

impl ClusterScales {
    fn new(num_seeds: usize, step: usize) -> Self {
        Self {
            color: vec![INITIAL_COLOR_SCALE; num_seeds],
            spatial: vec![(step * step) as f64; num_seeds],
        }
    }
}

/// Output of the clustering stage.
#[derive(Debug, Clone)]
pub struct ClusterResult {
    /// Seed index per pixel, or [`UNASSIGNED`].
    pub labels: Buffer2<u32>,
    pub seeds: Vec<Seed>,
    pub scales: ClusterScales,
}

/// Clustering state for one segmentation run.
#[derive(Debug)]
pub struct Clusterer<'a> {
    planes: &'a Planes,
    seeds: Vec<Seed>,
    scales: ClusterScales,
    labels: Buffer2<u32>,
    // Per-pixel state of the current iteration's assignment.
    best_distance: Vec<f64>,
    assigned_color: Vec<f64>,
    assigned_spatial: Vec<f64>,
    inv_spatial_norm: f64,
    window: f64,
    iteration: usize,
}

impl<'a> Clusterer<'a> {
    /// `step` is the integer clustering step `S`; it fixes both the spatial
    /// normalization `1 / S²` and the search window.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn new(planes: &'a Planes, seeds: Vec<Seed>, step: usize) -> Self {
        assert!(step > 0, "clustering step must be positive");
        let area = planes.area();
        let window = window_offset(step);

        tracing::debug!(
            seeds = seeds.len(),
            step,
            window,
            "Clusterer initialized"
        );

        Self {
            planes,
            scales: ClusterScales::new(seeds.len(), step),
            seeds,
            labels: Buffer2::new_filled(planes.width(), planes.height(), UNASSIGNED),
            best_distance: vec![f64::INFINITY; area],
            assigned_color: vec![0.0; area],
            assigned_spatial: vec![0.0; area],
            inv_spatial_norm: 1.0 / (step * step) as f64,
            window: window as f64,
            iteration: 0,
        }
    }

    /// Run `iterations` rounds and hand back labels, seeds and scales.
    pub fn run(mut self, iterations: usize) -> ClusterResult {
        for _ in 0..iterations {
            self.iterate();
        }
        self.into_result()
    }

    /// One assignment, scale update and centroid update round.
    pub fn iterate(&mut self) {
        self.iteration += 1;
        self.assign();
        self.update_scales();
        self.update_centroids();
    }

    pub fn into_result(self) -> ClusterResult {
        ClusterResult {
            labels: self.labels,
            seeds: self.seeds,
            scales: self.scales,
        }
    }

    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    pub fn scales(&self) -> &ClusterScales {
        &self.scales
    }

    pub fn labels(&self) -> &Buffer2<u32> {
        &self.labels
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    fn assign(&mut self) {
        self.best_distance.fill(f64::INFINITY);

        let (width, height) = (self.planes.width() as f64, self.planes.height() as f64);

        for (n, seed) in self.seeds.iter().enumerate() {
            let x1 = (seed.position.x - self.window).max(0.0) as usize;
            let x2 = (seed.position.x + self.window).min(width) as usize;
            let y1 = (seed.position.y - self.window).max(0.0) as usize;
            let y2 = (seed.position.y + self.window).min(height) as usize;
            let color_norm = self.scales.color[n];

            for y in y1..y2 {
                for x in x1..x2 {
                    let idx = self.labels.index(x, y);

                    let color = self.planes.color_distance(idx, &seed.color);
                    let spatial = seed.position.distance_squared(DVec2::new(x as f64, y as f64));
                    let distance = color / color_norm + spatial * self.inv_spatial_norm;

                    if distance < self.best_distance[idx] {
                        self.best_distance[idx] = distance;
                        self.labels[idx] = n as u32;
                        self.assigned_color[idx] = color;
                        self.assigned_spatial[idx] = spatial;
                    }
                }
            }
        }
    }

    fn update_scales(&mut self) {
        for (idx, &label) in self.labels.iter().enumerate() {
            // Pixels no window reached this round keep their old label but
            // carry no fresh distance.
            if label == UNASSIGNED || self.best_distance[idx].is_infinite() {
                continue;
            }
            let k = label as usize;
            self.scales.color[k] = self.scales.color[k].max(self.assigned_color[idx]);
            self.scales.spatial[k] = self.scales.spatial[k].max(self.assigned_spatial[idx]);
        }
    }

    fn update_centroids(&mut self) {
        let channels = self.planes.channels();
        let num_seeds = self.seeds.len();

        let mut color_sums = vec![0.0; num_seeds * channels];
        let mut position_sums = vec![DVec2::ZERO; num_seeds];
        let mut counts = vec![0usize; num_seeds];

        for (idx, &label) in self.labels.iter().enumerate() {
            if label == UNASSIGNED {
                continue;
            }
            let k = label as usize;
            let (x, y) = self.labels.coords(idx);

            let sums = &mut color_sums[k * channels..(k + 1) * channels];
            for (c, sum) in sums.iter_mut().enumerate() {
                *sum += self.planes.plane(c)[idx];
            }
            position_sums[k] += DVec2::new(x as f64, y as f64);
            counts[k] += 1;
        }

        for (k, seed) in self.seeds.iter_mut().enumerate() {
            if counts[k] == 0 {
                tracing::trace!(
                    seed = k,
                    iteration = self.iteration,
                    "Empty cluster, centroid kept"
                );
                continue;
            }

            let inv = 1.0 / counts[k] as f64;
            let sums = &color_sums[k * channels..(k + 1) * channels];
            for (value, sum) in seed.color.iter_mut().zip(sums) {
                *value = sum * inv;
            }
            seed.position = position_sums[k] * inv;
        }
    }
}
