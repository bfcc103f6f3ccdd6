//! Multi-channel raster input.
//!
//! Distances are computed directly on the stored channel values, so callers
//! convert to whatever color space they want distances measured in before
//! building [`Planes`].

use common::Buffer2;
use image_lib::{GrayImage, RgbImage};

use crate::error::{Error, Result};

/// One `f64` plane per channel, all of the same size.
#[derive(Debug, Clone)]
pub struct Planes {
    planes: Vec<Buffer2<f64>>,
}

impl Planes {
    pub fn new(planes: Vec<Buffer2<f64>>) -> Result<Self> {
        let first = planes.first().ok_or(Error::NoChannels)?;
        let (width, height) = first.size();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }

        for (channel, plane) in planes.iter().enumerate().skip(1) {
            if plane.size() != (width, height) {
                return Err(Error::PlaneSizeMismatch {
                    channel,
                    expected_width: width,
                    expected_height: height,
                    actual_width: plane.width(),
                    actual_height: plane.height(),
                });
            }
        }

        Ok(Self { planes })
    }

    /// Split pixel-interleaved data (`c0 c1 .. cN c0 c1 ..`) into planes.
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channels: usize,
        data: &[f64],
    ) -> Result<Self> {
        if channels == 0 {
            return Err(Error::NoChannels);
        }
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(Error::InterleavedLengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        let planes = (0..channels)
            .map(|c| {
                let values = data.iter().skip(c).step_by(channels).copied().collect();
                Buffer2::new(width, height, values)
            })
            .collect();

        Self::new(planes)
    }

    pub fn from_rgb8(image: &RgbImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let data: Vec<f64> = image.as_raw().iter().map(|&v| f64::from(v)).collect();
        Self::from_interleaved(width, height, 3, &data)
    }

    pub fn from_luma8(image: &GrayImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let data: Vec<f64> = image.as_raw().iter().map(|&v| f64::from(v)).collect();
        Self::from_interleaved(width, height, 1, &data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.planes[0].width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.planes[0].height()
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.planes.len()
    }

    #[inline]
    pub fn plane(&self, channel: usize) -> &Buffer2<f64> {
        &self.planes[channel]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buffer2<f64>> {
        self.planes.iter()
    }

    #[inline]
    pub fn value(&self, channel: usize, x: usize, y: usize) -> f64 {
        self.planes[channel][(x, y)]
    }

    /// Channel vector of pixel `(x, y)`.
    pub fn color_at(&self, x: usize, y: usize) -> Vec<f64> {
        self.planes.iter().map(|p| p[(x, y)]).collect()
    }

    /// Sum over channels of the squared difference between the pixel at linear
    /// index `idx` and `color`.
    #[inline]
    pub fn color_distance(&self, idx: usize, color: &[f64]) -> f64 {
        debug_assert_eq!(color.len(), self.planes.len());
        self.planes
            .iter()
            .zip(color)
            .map(|(plane, &c)| {
                let d = plane[idx] - c;
                d * d
            })
            .sum()
    }
}
