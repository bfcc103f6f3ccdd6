//! Visualization of label maps.
//!
//! These helpers only read a label map; they work on any `u32` labeling, not
//! just the output of [`crate::segment`].

use std::collections::HashMap;

use common::{Buffer2, NEIGHBORS_8};
use image_lib::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::raster::Planes;

/// Seed of the palette generator, fixed so renders are reproducible.
const PALETTE_SEED: u64 = 12345;

fn assert_same_size(image: &RgbImage, labels: &Buffer2<u32>) {
    assert_eq!(
        (image.width() as usize, image.height() as usize),
        labels.size(),
        "image and labels must have the same size"
    );
}

/// Draw region boundaries over a copy of `image`.
///
/// A pixel is painted when more than one of its 8 neighbors carries another
/// label. Neighbors that were already painted are ignored, which keeps the
/// lines one pixel wide.
pub fn draw_label_contours(image: &RgbImage, labels: &Buffer2<u32>, color: Rgb<u8>) -> RgbImage {
    assert_same_size(image, labels);

    let mut output = image.clone();
    let mut taken = Buffer2::new_filled(labels.width(), labels.height(), false);

    for y in 0..labels.height() {
        for x in 0..labels.width() {
            let label = labels[(x, y)];
            let differing = labels
                .neighbors(x, y, &NEIGHBORS_8)
                .filter(|&(nx, ny)| !taken[(nx, ny)] && labels[(nx, ny)] != label)
                .count();

            if differing > 1 {
                output.put_pixel(x as u32, y as u32, color);
                taken[(x, y)] = true;
            }
        }
    }

    output
}

/// Fill every label with its own pseudo-random color.
pub fn paint_labels(labels: &Buffer2<u32>) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(PALETTE_SEED);
    let mut palette: HashMap<u32, Rgb<u8>> = HashMap::new();

    let mut output = RgbImage::new(labels.width() as u32, labels.height() as u32);
    for (idx, &label) in labels.iter().enumerate() {
        let color = *palette.entry(label).or_insert_with(|| {
            Rgb([
                rng.random_range(0..255),
                rng.random_range(0..255),
                rng.random_range(0..255),
            ])
        });
        let (x, y) = labels.coords(idx);
        output.put_pixel(x as u32, y as u32, color);
    }

    output
}

/// Black image with only `label` painted in `color`.
pub fn paint_label(labels: &Buffer2<u32>, label: u32, color: Rgb<u8>) -> RgbImage {
    let mut output = RgbImage::new(labels.width() as u32, labels.height() as u32);
    for (idx, &l) in labels.iter().enumerate() {
        if l == label {
            let (x, y) = labels.coords(idx);
            output.put_pixel(x as u32, y as u32, color);
        }
    }
    output
}

/// Fill every region with its mean color.
///
/// Single-channel planes render as gray; otherwise the first three channels
/// map to red, green and blue (a missing third channel stays 0). Values are
/// rounded and clamped to `0..=255`.
pub fn paint_mean_colors(labels: &Buffer2<u32>, planes: &Planes) -> RgbImage {
    assert_eq!(
        labels.size(),
        (planes.width(), planes.height()),
        "planes and labels must have the same size"
    );

    let channels = planes.channels();
    let mut sums: HashMap<u32, (Vec<f64>, usize)> = HashMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        let (sum, count) = sums
            .entry(label)
            .or_insert_with(|| (vec![0.0; channels], 0));
        for (c, value) in sum.iter_mut().enumerate() {
            *value += planes.plane(c)[idx];
        }
        *count += 1;
    }

    let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    let palette: HashMap<u32, Rgb<u8>> = sums
        .into_iter()
        .map(|(label, (sum, count))| {
            let mean: Vec<f64> = sum.iter().map(|s| s / count as f64).collect();
            let rgb = if channels == 1 {
                let v = to_u8(mean[0]);
                [v, v, v]
            } else {
                let channel = |c: usize| mean.get(c).copied().map_or(0, to_u8);
                [channel(0), channel(1), channel(2)]
            };
            (label, Rgb(rgb))
        })
        .collect();

    let mut output = RgbImage::new(labels.width() as u32, labels.height() as u32);
    for (idx, label) in labels.iter().enumerate() {
        let (x, y) = labels.coords(idx);
        output.put_pixel(x as u32, y as u32, palette[label]);
    }
    output
}
