use image::{Rgba, RgbaImage};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::icon::{IconLayout, LIGHT_GREEN};
use crate::raster::{Rect, ellipse_contains, fill_ellipse};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Number of candidate spots drawn before rejection.
const SPOT_ATTEMPTS: usize = 20;

/// One translucent skin spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pub opacity: u8,
}

impl Spot {
    pub fn rect(&self) -> Rect {
        Rect::at(self.x, self.y, self.size, self.size)
    }
}

fn near_eye(layout: &IconLayout, eye: &Rect, x: i32, y: i32) -> bool {
    let cx = eye.x0 as f32 + layout.eye_w as f32 / 2.0;
    let cy = eye.y0 as f32 + layout.eye_h as f32 / 2.0;
    (x as f32 - cx).abs() < layout.eye_w as f32 && (y as f32 - cy).abs() < layout.eye_h as f32
}

/// Places the decorative spots for `layout`, fully determined by `seed`.
pub fn scatter_spots(layout: &IconLayout, seed: u64) -> Vec<Spot> {
    let mut rng = StdRng::seed_from_u64(seed);
    let head = layout.head;
    let s = layout.size as f32;
    let mut spots = Vec::with_capacity(SPOT_ATTEMPTS);

    for i in 0..SPOT_ATTEMPTS {
        let x = head.x0 + (rng.gen_range(0.1..0.9f32) * head.width() as f32) as i32;
        let y = head.y0 + (rng.gen_range(0.15..0.85f32) * head.height() as f32) as i32;
        // Size and opacity are drawn before rejection so each candidate
        // consumes the same amount of randomness.
        let size = ((s * rng.gen_range(0.02..0.04f32)) as i32).max(1);
        let opacity = rng.gen_range(80..=150u8);

        if near_eye(layout, &layout.left_eye, x, y) || near_eye(layout, &layout.right_eye, x, y) {
            debug!("spot {i} at ({x}, {y}) overlaps an eye, skipped");
            continue;
        }
        if !ellipse_contains(&head, x, y) {
            warn!("spot {i} at ({x}, {y}) falls outside the head, skipped");
            continue;
        }
        spots.push(Spot { x, y, size, opacity });
    }
    spots
}

pub fn draw_spots(img: &mut RgbaImage, spots: &[Spot]) {
    for spot in spots {
        let [r, g, b] = LIGHT_GREEN;
        fill_ellipse(img, &spot.rect(), Rgba([r, g, b, spot.opacity]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_spots() {
        let layout = IconLayout::new(1024);
        assert_eq!(scatter_spots(&layout, 42), scatter_spots(&layout, 42));
    }

    #[test]
    fn different_seed_moves_spots() {
        let layout = IconLayout::new(1024);
        assert_ne!(scatter_spots(&layout, 42), scatter_spots(&layout, 7));
    }

    #[test]
    fn spots_avoid_eyes_and_stay_on_head() {
        for size in [64, 256, 1024] {
            let layout = IconLayout::new(size);
            for seed in 0..16 {
                let spots = scatter_spots(&layout, seed);
                assert!(spots.len() <= SPOT_ATTEMPTS);
                for spot in spots {
                    assert!(ellipse_contains(&layout.head, spot.x, spot.y));
                    assert!(!near_eye(&layout, &layout.left_eye, spot.x, spot.y));
                    assert!(!near_eye(&layout, &layout.right_eye, spot.x, spot.y));
                    assert!((80..=150).contains(&spot.opacity));
                    assert!(spot.size >= 1);
                }
            }
        }
    }
}
