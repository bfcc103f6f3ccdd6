//! Segmentation entry point.
//!
//! Stages run strictly in order, each consuming the previous one's output:
//! edge map, seed grid, clustering, connectivity repair. Nothing is kept
//! between calls.


use common::Buffer2;

use crate::clustering::Clusterer;
use crate::config::{cluster_step, Config};
use crate::connectivity::enforce_connectivity;
use crate::edges::EdgeMap;
use crate::error::{Error, Result};
use crate::raster::Planes;
use crate::seeds::initialize_seeds;

/// Final dense labeling of an image.
#[derive(Debug, Clone)]
pub struct Segmentation {
    labels: Buffer2<u32>,
    num_regions: usize,
    num_seeds: usize,
}

impl Segmentation {
    /// Region id per pixel, in `0..num_regions`.
    pub fn labels(&self) -> &Buffer2<u32> {
        &self.labels
    }

    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    /// Number of seeds the grid actually placed (the effective K).
    pub fn num_seeds(&self) -> usize {
        self.num_seeds
    }

    pub fn into_labels(self) -> Buffer2<u32> {
        self.labels
    }

    /// Pixel count of every region, indexed by region id.
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_regions];
        for &label in self.labels.iter() {
            sizes[label as usize] += 1;
        }
        sizes
    }

    /// Mean channel values of every region, indexed by region id.
    pub fn region_mean_colors(&self, planes: &Planes) -> Vec<Vec<f64>> {
        assert_eq!(
            self.labels.size(),
            (planes.width(), planes.height()),
            "planes must match the segmented image"
        );

        let mut sums = vec![vec![0.0; planes.channels()]; self.num_regions];
        for (idx, &label) in self.labels.iter().enumerate() {
            for (c, sum) in sums[label as usize].iter_mut().enumerate() {
                *sum += planes.plane(c)[idx];
            }
        }

        for (sum, size) in sums.iter_mut().zip(self.region_sizes()) {
            let inv = 1.0 / size.max(1) as f64;
            sum.iter_mut().for_each(|v| *v *= inv);
        }
        sums
    }
}

#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: Config,
}

impl Segmenter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Partition `planes` into roughly `k` compact, connected regions.
    pub fn segment(&self, planes: &Planes, k: usize) -> Result<Segmentation> {
        self.config.validate()?;
        if k == 0 {
            return Err(Error::ZeroRegions);
        }

        let (width, height) = (planes.width(), planes.height());

        let edges = EdgeMap::compute(planes);
        let seeds = initialize_seeds(planes, &edges, k, &self.config);
        let num_seeds = seeds.len();

        let step = cluster_step(width, height, k);
        let clusters = Clusterer::new(planes, seeds, step).run(self.config.iterations);

        let label_map = enforce_connectivity(&clusters.labels, k);

        tracing::debug!(
            width,
            height,
            requested = k,
            seeds = num_seeds,
            regions = label_map.num_regions(),
            "Segmentation finished"
        );

        Ok(Segmentation {
            num_regions: label_map.num_regions(),
            labels: label_map.into_labels(),
            num_seeds,
        })
    }
}

/// [`Segmenter::segment`] with the default configuration.
pub fn segment(planes: &Planes, k: usize) -> Result<Segmentation> {
    Segmenter::default().segment(planes, k)
}
