//! Superpixel - zero-parameter SLIC superpixel segmentation.
//!
//! Partitions a multi-channel raster into roughly `K` compact, connected
//! regions. The only input besides the image is `K`: color distances are
//! normalized per cluster from the largest distance each cluster has seen,
//! so no compactness weight has to be tuned.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use superpixel::{segment, Planes};
//!
//! let image = image::open("photo.png")?.to_rgb8();
//! let planes = Planes::from_rgb8(&image)?;
//! let segmentation = segment(&planes, 400)?;
//!
//! println!("{} regions", segmentation.num_regions());
//! ```

pub mod clustering;
pub mod config;
pub mod connectivity;
pub mod edges;
mod error;
pub mod raster;
pub mod render;
pub mod seeds;
mod segmenter;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Main API
// ============================================================================

pub use config::{Config, SeedLayout};
pub use error::{Error, Result};
pub use raster::Planes;
pub use segmenter::{segment, Segmentation, Segmenter};

// ============================================================================
// Pipeline stages
// ============================================================================

pub use clustering::{ClusterResult, ClusterScales, Clusterer, UNASSIGNED};
pub use connectivity::{enforce_connectivity, LabelMap};
pub use edges::EdgeMap;
pub use seeds::{initialize_seeds, Seed};

// ============================================================================
// Visualization
// ============================================================================

pub use render::{draw_label_contours, paint_label, paint_labels, paint_mean_colors};

pub use common::Buffer2;
