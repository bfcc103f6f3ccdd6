//! Gradient magnitude used to steer seed placement.

use common::Buffer2;

use crate::raster::Planes;

/// Per-pixel squared central-difference gradient, summed over channels.
///
/// Only interior pixels carry a value. The one-pixel border is held at
/// `f64::INFINITY` so a seed is never pulled onto it.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    magnitude: Buffer2<f64>,
}

impl EdgeMap {
    pub fn compute(planes: &Planes) -> Self {
        let (width, height) = (planes.width(), planes.height());
        let mut magnitude = Buffer2::new_filled(width, height, f64::INFINITY);

        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let mut sum = 0.0;
                for plane in planes.iter() {
                    let dx = plane[(x - 1, y)] - plane[(x + 1, y)];
                    let dy = plane[(x, y - 1)] - plane[(x, y + 1)];
                    sum += dx * dx + dy * dy;
                }
                magnitude[(x, y)] = sum;
            }
        }

        Self { magnitude }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.magnitude[(x, y)]
    }

    pub fn magnitude(&self) -> &Buffer2<f64> {
        &self.magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_sums_channels() {
        // 3x3, channel 0 ramps along x, channel 1 ramps along y.
        #[rustfmt::skip]
        let c0 = vec![
            0.0, 1.0, 2.0,
            0.0, 1.0, 2.0,
            0.0, 1.0, 2.0,
        ];
        #[rustfmt::skip]
        let c1 = vec![
            0.0, 0.0, 0.0,
            3.0, 3.0, 3.0,
            6.0, 6.0, 6.0,
        ];
        let planes = Planes::new(vec![Buffer2::new(3, 3, c0), Buffer2::new(3, 3, c1)]).unwrap();
        let edges = EdgeMap::compute(&planes);

        // c0: dx = 0 - 2 = -2, dy = 0. c1: dx = 0, dy = 0 - 6 = -6.
        assert_eq!(edges.get(1, 1), 4.0 + 36.0);
    }

    #[test]
    fn test_border_is_never_attractive() {
        let planes = Planes::new(vec![Buffer2::new_filled(4, 3, 5.0)]).unwrap();
        let edges = EdgeMap::compute(&planes);

        for y in 0..3 {
            for x in 0..4 {
                if edges.magnitude().is_border(x, y) {
                    assert_eq!(edges.get(x, y), f64::INFINITY);
                } else {
                    assert_eq!(edges.get(x, y), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_tiny_images_have_no_interior() {
        let planes = Planes::new(vec![Buffer2::new_filled(2, 1, 1.0)]).unwrap();
        let edges = EdgeMap::compute(&planes);
        assert!(edges.magnitude().iter().all(|v| v.is_infinite()));
    }

    #[test]
    fn test_vertical_step_edge() {
        // Step between x=2 and x=3 on a 6x3 image.
        let mut plane = Buffer2::new_filled(6, 3, 0.0);
        for x in 3..6 {
            for y in 0..3 {
                plane[(x, y)] = 10.0;
            }
        }
        let edges = EdgeMap::compute(&Planes::new(vec![plane]).unwrap());

        assert_eq!(edges.get(1, 1), 0.0);
        assert_eq!(edges.get(2, 1), 100.0);
        assert_eq!(edges.get(3, 1), 100.0);
        assert_eq!(edges.get(4, 1), 0.0);
    }
}
