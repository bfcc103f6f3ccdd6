//! Configuration and fixed constants for superpixel segmentation.
//!
//! The algorithm is parameter-free apart from the requested region count, so
//! [`Config`] only carries the iteration budget and seeding choices. The
//! ratios the algorithm depends on are named constants rather than knobs.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Starting value of every cluster's color normalization (10²).
///
/// Must stay positive: the first assignment pass divides by it.
pub const INITIAL_COLOR_SCALE: f64 = 100.0;

/// Added to `sqrt(area / K)` before truncation to get the clustering step.
pub const STEP_PADDING: f64 = 2.0;

/// Clustering steps below this value get an enlarged search window.
pub const SMALL_STEP_LIMIT: usize = 10;

/// Window offset multiplier applied to steps below [`SMALL_STEP_LIMIT`].
pub const SMALL_STEP_WINDOW_SCALE: f64 = 1.5;

/// Components with at most `(area / K) / MIN_REGION_SIZE_DIVISOR` pixels are
/// merged into a neighbor.
pub const MIN_REGION_SIZE_DIVISOR: usize = 4;

/// Default number of assignment/update rounds.
pub const DEFAULT_ITERATIONS: usize = 10;

// ============================================================================
// Enums
// ============================================================================

/// Layout of the initial seed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeedLayout {
    /// Odd rows are shifted by half a step, which evens out seed-to-seed
    /// distances compared to a square grid.
    #[default]
    Hexagonal,
    /// Every row uses the same half-step offset.
    Square,
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed number of clustering iterations. There is no convergence check.
    pub iterations: usize,
    pub seed_layout: SeedLayout,
    /// Move every seed to the lowest-gradient pixel of its 3x3 neighborhood.
    pub perturb_seeds: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed_layout: SeedLayout::Hexagonal,
            perturb_seeds: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        Ok(())
    }
}

// ============================================================================
// Step sizes
// ============================================================================

/// Grid spacing used to lay out seeds: `sqrt(area / K)`.
///
/// A strip thinner than half that spacing holds a single row (or column) of
/// seeds, so the spacing along it becomes `width / K` (or `height / K`) to
/// keep roughly `K` of them.
pub fn seed_step(width: usize, height: usize, k: usize) -> f64 {
    let step = ((width * height) as f64 / k as f64).sqrt();
    let half = (step / 2.0) as usize;
    if half >= height {
        width as f64 / k as f64
    } else if half >= width {
        height as f64 / k as f64
    } else {
        step
    }
}

/// Integer step used by the clustering pass: the seed spacing plus
/// [`STEP_PADDING`], truncated. Never below 2.
pub fn cluster_step(width: usize, height: usize, k: usize) -> usize {
    (seed_step(width, height, k) + STEP_PADDING) as usize
}

/// Half-width of the square search window around each seed.
///
/// Small steps are scaled by [`SMALL_STEP_WINDOW_SCALE`], larger ones are used
/// as is.
pub fn window_offset(step: usize) -> usize {
    if step < SMALL_STEP_LIMIT {
        (step as f64 * SMALL_STEP_WINDOW_SCALE) as usize
    } else {
        step
    }
}

/// Pixel-count threshold at or below which a connected component is merged.
pub fn min_region_size(width: usize, height: usize, k: usize) -> usize {
    (width * height / k) / MIN_REGION_SIZE_DIVISOR
}
