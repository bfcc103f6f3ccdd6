use super::*;
use common::Buffer2;

use crate::testing::vertical_step;

fn flat(width: usize, height: usize, value: f64) -> Planes {
    Planes::new(vec![Buffer2::new_filled(width, height, value)]).unwrap()
}

fn positions(seeds: &[Seed]) -> Vec<(f64, f64)> {
    seeds.iter().map(|s| (s.position.x, s.position.y)).collect()
}

#[test]
fn test_hexagonal_grid_shifts_odd_rows() {
    // step = sqrt(8) = 2.83, half step = 1. Row 0 at y=1 starts at x=1,
    // row 1 at y=3 starts at x=2 (doubled offset) and fits one point.
    let seeds = grid_seeds(&flat(4, 4, 0.0), 2, SeedLayout::Hexagonal);
    assert_eq!(positions(&seeds), vec![(1.0, 1.0), (3.0, 1.0), (2.0, 3.0)]);
}

#[test]
fn test_square_grid_keeps_offset() {
    let seeds = grid_seeds(&flat(4, 4, 0.0), 2, SeedLayout::Square);
    assert_eq!(
        positions(&seeds),
        vec![(1.0, 1.0), (3.0, 1.0), (1.0, 3.0), (3.0, 3.0)]
    );
}

#[test]
fn test_grid_on_large_image() {
    // step 50: rows at y=25 and y=75; the second row is shifted by 50.
    let seeds = grid_seeds(&vertical_step(100, 100, 50, 2), 4, SeedLayout::Hexagonal);
    assert_eq!(
        positions(&seeds),
        vec![(25.0, 25.0), (75.0, 25.0), (50.0, 75.0)]
    );
    assert_eq!(seeds[0].color, vec![0.0, 0.0]);
    assert_eq!(seeds[1].color, vec![255.0, 255.0]);
}

#[test]
fn test_more_regions_than_pixels() {
    // Sub-pixel step: every grid point truncates onto (0, 0).
    let seeds = grid_seeds(&flat(3, 3, 1.0), 100, SeedLayout::Hexagonal);
    assert_eq!(seeds.len(), 9);
    assert!(seeds.iter().all(|s| s.position == DVec2::ZERO));
}

#[test]
fn test_single_pixel_image() {
    let planes = Planes::new(vec![Buffer2::new(1, 1, vec![7.0])]).unwrap();
    let seeds = grid_seeds(&planes, 1, SeedLayout::Hexagonal);
    assert_eq!(seeds, vec![Seed {
        color: vec![7.0],
        position: DVec2::ZERO,
    }]);
}

#[test]
fn test_narrow_image_centers_short_axis() {
    // 3 wide: the column start would be x=8, so the seed moves to x=1.
    let seeds = grid_seeds(&flat(3, 17, 0.0), 1, SeedLayout::Hexagonal);
    assert_eq!(positions(&seeds), vec![(1.0, 8.0)]);
}

#[test]
fn test_wide_strip_gets_one_row_of_k_seeds() {
    let seeds = grid_seeds(&flat(1000, 10, 0.0), 10, SeedLayout::Hexagonal);
    let expected: Vec<(f64, f64)> = (0..10).map(|c| (50.0 + 100.0 * c as f64, 5.0)).collect();
    assert_eq!(positions(&seeds), expected);
}

#[test]
fn test_tall_strip_gets_one_column_of_k_seeds() {
    // Odd rows shift past the edge as well and are centered the same way.
    let seeds = grid_seeds(&flat(10, 1000, 0.0), 10, SeedLayout::Hexagonal);
    let expected: Vec<(f64, f64)> = (0..10).map(|r| (5.0, 50.0 + 100.0 * r as f64)).collect();
    assert_eq!(positions(&seeds), expected);
}

#[test]
fn test_shifted_row_past_edge_keeps_one_seed() {
    // step 15.1, half step 7: row 1 starts at x=14, past the last column.
    let seeds = grid_seeds(&flat(13, 35, 0.0), 2, SeedLayout::Hexagonal);
    assert_eq!(positions(&seeds), vec![(7.0, 7.0), (6.0, 22.0)]);
}

#[test]
fn test_perturb_moves_off_border() {
    // Border pixels never win, so seeds on the last column/row step inward.
    let planes = flat(4, 4, 0.0);
    let edges = EdgeMap::compute(&planes);
    let mut seeds = grid_seeds(&planes, 2, SeedLayout::Hexagonal);
    perturb_seeds(&mut seeds, &planes, &edges);
    assert_eq!(positions(&seeds), vec![(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)]);
}

#[test]
fn test_perturb_leaves_strong_edge() {
    let planes = vertical_step(100, 100, 50, 2);
    let edges = EdgeMap::compute(&planes);
    let mut seeds = grid_seeds(&planes, 4, SeedLayout::Hexagonal);
    perturb_seeds(&mut seeds, &planes, &edges);

    // (50, 75) sits on the step. x=49 ties with it, so the first strictly
    // lower neighbor in scan order (north-east) wins, and the color follows.
    assert_eq!(seeds[2].position, DVec2::new(51.0, 74.0));
    assert_eq!(seeds[2].color, vec![255.0, 255.0]);
    // Seeds in flat areas stay put.
    assert_eq!(seeds[0].position, DVec2::new(25.0, 25.0));
    assert_eq!(seeds[1].position, DVec2::new(75.0, 25.0));
}

#[test]
fn test_perturb_picks_lowest_neighbor() {
    // Paraboloid centered on (3, 3): the gradient vanishes there and grows
    // with the distance from it.
    let mut plane = Buffer2::new_filled(6, 6, 0.0);
    for y in 0..6 {
        for x in 0..6 {
            let (dx, dy) = (x as f64 - 3.0, y as f64 - 3.0);
            plane[(x, y)] = 10.0 * (dx * dx + dy * dy);
        }
    }
    let planes = Planes::new(vec![plane]).unwrap();
    let edges = EdgeMap::compute(&planes);
    assert_eq!(edges.get(3, 3), 0.0);
    assert_eq!(edges.get(2, 2), 3200.0);

    let mut seeds = vec![Seed::at_pixel(&planes, 2, 2)];
    perturb_seeds(&mut seeds, &planes, &edges);
    assert_eq!(seeds[0].position, DVec2::new(3.0, 3.0));
    assert_eq!(seeds[0].color, vec![0.0]);
}

#[test]
fn test_initialize_respects_config() {
    let planes = flat(4, 4, 0.0);
    let edges = EdgeMap::compute(&planes);

    let perturbed = initialize_seeds(&planes, &edges, 2, &Config::default());
    assert_eq!(positions(&perturbed), vec![(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)]);

    let config = Config {
        perturb_seeds: false,
        ..Default::default()
    };
    let raw = initialize_seeds(&planes, &edges, 2, &config);
    assert_eq!(positions(&raw), vec![(1.0, 1.0), (3.0, 1.0), (2.0, 3.0)]);
}
