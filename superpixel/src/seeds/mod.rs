//! Initial cluster centers.
//!
//! Seeds are laid out on a grid with spacing `sqrt(area / K)` and then nudged
//! to the lowest-gradient pixel of their 3x3 neighborhood so no cluster starts
//! on an edge or a noisy pixel.

#[cfg(test)]
mod tests;

use common::NEIGHBORS_8;
use glam::DVec2;

use crate::config::{seed_step, Config, SeedLayout};
use crate::edges::EdgeMap;
use crate::raster::Planes;

/// A cluster center: mean color plus mean position.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub color: Vec<f64>,
    pub position: DVec2,
}

impl Seed {
    pub fn at_pixel(planes: &Planes, x: usize, y: usize) -> Self {
        Self {
            color: planes.color_at(x, y),
            position: DVec2::new(x as f64, y as f64),
        }
    }
}

/// Lay out seeds on the grid and optionally perturb them.
///
/// The returned count can fall short of `k`: grid points past the right or
/// bottom edge are dropped, and for `k > area` the grid collapses onto far
/// fewer distinct pixels. Callers use the returned length as the real K.
pub fn initialize_seeds(planes: &Planes, edges: &EdgeMap, k: usize, config: &Config) -> Vec<Seed> {
    let mut seeds = grid_seeds(planes, k, config.seed_layout);
    if config.perturb_seeds {
        perturb_seeds(&mut seeds, planes, edges);
    }

    tracing::debug!(
        requested = k,
        placed = seeds.len(),
        layout = ?config.seed_layout,
        "Seeds initialized"
    );

    seeds
}

/// Seeds at the grid points that fall inside the image, row by row.
///
/// When even the first row (or the first point of a row) lands past the
/// image, it is pulled to the middle of that axis instead, so a thin strip
/// still gets a full line of seeds and the result is never empty.
pub fn grid_seeds(planes: &Planes, k: usize, layout: SeedLayout) -> Vec<Seed> {
    let (width, height) = (planes.width(), planes.height());
    let step = seed_step(width, height, k);
    let half = (step / 2.0) as usize;

    let mut seeds = Vec::new();
    for row in 0..height {
        let mut y = (row as f64 * step + half as f64) as usize;
        if y > height - 1 {
            if row > 0 {
                break;
            }
            y = height / 2;
        }

        let row_offset = match layout {
            SeedLayout::Hexagonal => half << (row & 1),
            SeedLayout::Square => half,
        };

        for col in 0..width {
            let mut x = (col as f64 * step + row_offset as f64) as usize;
            if x > width - 1 {
                if col > 0 {
                    break;
                }
                x = width / 2;
            }
            seeds.push(Seed::at_pixel(planes, x, y));
        }
    }

    seeds
}

/// Move each seed to whichever pixel of its 3x3 neighborhood has the smallest
/// edge magnitude. The center wins ties, then the earlier neighbor in
/// W, NW, N, NE, E, SE, S, SW order.
pub fn perturb_seeds(seeds: &mut [Seed], planes: &Planes, edges: &EdgeMap) {
    let magnitude = edges.magnitude();

    for seed in seeds.iter_mut() {
        let origin = (seed.position.x as usize, seed.position.y as usize);

        let mut best = origin;
        let mut best_edge = edges.get(origin.0, origin.1);
        for (nx, ny) in magnitude.neighbors(origin.0, origin.1, &NEIGHBORS_8) {
            let edge = edges.get(nx, ny);
            if edge < best_edge {
                best = (nx, ny);
                best_edge = edge;
            }
        }

        if best != origin {
            *seed = Seed::at_pixel(planes, best.0, best.1);
        }
    }
}
