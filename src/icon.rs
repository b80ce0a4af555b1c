use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::debug;

use crate::glow;
use crate::raster::{Rect, draw_ellipse, fill_ellipse, stroke_arc};
use crate::sizes::IconSize;
use crate::texture::{draw_spots, scatter_spots};

pub const ALIEN_GREEN: [u8; 3] = [147, 250, 165];
pub const ALIEN_BLUE: [u8; 3] = [64, 224, 208];
pub const DARK_GREEN: [u8; 3] = [34, 139, 34];
pub const LIGHT_GREEN: [u8; 3] = [144, 238, 144];

/// Canvas size the stroke widths and offsets were designed at.
const DESIGN_SIZE: u32 = 1024;
const HALO_RINGS: u32 = 10;

#[inline]
fn opaque(c: [u8; 3]) -> Rgba<u8> { Rgba([c[0], c[1], c[2], 255]) }

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 { a + (b - a) * t }

#[inline]
fn ratio(v: i32, r: f64) -> i32 { (v as f64 * r) as i32 }

/// Pixel length `px` at the design size, rescaled to `size`.
#[inline]
fn scaled(size: u32, px: u32) -> i32 { (px as u64 * size as u64 / DESIGN_SIZE as u64) as i32 }

/// All geometry of the face for one canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct IconLayout {
    pub size: u32,
    pub head: Rect,
    pub eye_w: i32,
    pub eye_h: i32,
    pub left_eye: Rect,
    pub right_eye: Rect,
    pub highlights: [Rect; 2],
    pub pupils: [Rect; 2],
    pub nose: [Rect; 2],
    pub mouth: Rect,
    pub head_stroke: u32,
    pub eye_stroke: u32,
    pub mouth_stroke: u32,
    pub glow_inset: i32,
    pub glow_sigma: f32,
}

impl IconLayout {
    pub fn new(size: u32) -> Self {
        let s = size as i32;

        let head_w = ratio(s, 0.65);
        let head_h = ratio(s, 0.8);
        let head_x = (s - head_w) / 2;
        let head_y = ratio(s, 0.1);
        let head = Rect::at(head_x, head_y, head_w, head_h);

        let eye_w = ratio(s, 0.22);
        let eye_h = ratio(s, 0.26);
        let eye_y = head_y + ratio(head_h, 0.22);
        let left_x = head_x + ratio(head_w, 0.15);
        let right_x = head_x + ratio(head_w, 0.63);

        let highlight = ratio(eye_w, 0.3);
        let pupil = ratio(eye_w, 0.4);
        let highlight_at = |ex: i32| {
            Rect::at(ex + ratio(eye_w, 0.15), eye_y + ratio(eye_h, 0.15), highlight, highlight)
        };
        let pupil_at = |ex: i32| {
            Rect::new(
                ex + (eye_w - pupil) / 2,
                eye_y + (eye_h - pupil) / 2,
                ex + (eye_w + pupil) / 2,
                eye_y + (eye_h + pupil) / 2,
            )
        };

        let nose_y = eye_y + eye_h + ratio(s, 0.06);
        let nose_x = head_x + head_w / 2;
        let dot = ratio(s, 0.025).max(1);

        let mouth_y = nose_y + ratio(s, 0.08);
        let mouth_w = ratio(s, 0.2);
        let mouth_x = head_x + (head_w - mouth_w) / 2;

        Self {
            size,
            head,
            eye_w,
            eye_h,
            left_eye: Rect::at(left_x, eye_y, eye_w, eye_h),
            right_eye: Rect::at(right_x, eye_y, eye_w, eye_h),
            highlights: [highlight_at(left_x), highlight_at(right_x)],
            pupils: [pupil_at(left_x), pupil_at(right_x)],
            nose: [
                Rect::new(nose_x - dot * 3, nose_y, nose_x - dot * 2, nose_y + dot),
                Rect::new(nose_x + dot * 2, nose_y, nose_x + dot * 3, nose_y + dot),
            ],
            mouth: Rect::new(
                mouth_x,
                mouth_y - ratio(s, 0.03),
                mouth_x + mouth_w,
                mouth_y + ratio(s, 0.08),
            ),
            head_stroke: scaled(size, 8).max(1) as u32,
            eye_stroke: scaled(size, 4).max(1) as u32,
            mouth_stroke: scaled(size, 8).max(1) as u32,
            glow_inset: scaled(size, 20).max(1),
            glow_sigma: scaled(size, 20).max(1) as f32,
        }
    }

    /// Boxes of every facial feature drawn on top of the head.
    pub fn features(&self) -> Vec<Rect> {
        let mut out = vec![self.left_eye, self.right_eye, self.mouth];
        out.extend(self.highlights);
        out.extend(self.pupils);
        out.extend(self.nose);
        out
    }
}

fn draw_halo(img: &mut RgbaImage, layout: &IconLayout) {
    for i in 0..HALO_RINGS {
        let offset = scaled(layout.size, 2 * i);
        let t = i as f32 / 20.0;
        let c = ALIEN_GREEN.map(|c| lerp(c as f32, 255.0, t) as u8);
        let alpha = 255 - (i * 10) as u8;
        fill_ellipse(img, &layout.head.grow(offset), Rgba([c[0], c[1], c[2], alpha]));
    }
}

/// Draws the face layer (no glow) on a transparent canvas.
pub fn render_face(layout: &IconLayout, seed: u64) -> RgbaImage {
    let mut img = RgbaImage::new(layout.size, layout.size);
    let outline = opaque(DARK_GREEN);

    draw_halo(&mut img, layout);
    draw_ellipse(&mut img, &layout.head, Some(opaque(ALIEN_GREEN)), Some((outline, layout.head_stroke)));

    for eye in [&layout.left_eye, &layout.right_eye] {
        draw_ellipse(&mut img, eye, Some(opaque(ALIEN_BLUE)), Some((outline, layout.eye_stroke)));
    }
    for highlight in &layout.highlights {
        fill_ellipse(&mut img, highlight, Rgba([255, 255, 255, 200]));
    }
    for pupil in &layout.pupils {
        fill_ellipse(&mut img, pupil, Rgba([0, 0, 0, 255]));
    }
    for dot in &layout.nose {
        fill_ellipse(&mut img, dot, outline);
    }
    stroke_arc(&mut img, &layout.mouth, 0.0, 180.0, outline, layout.mouth_stroke);

    let spots = scatter_spots(layout, seed);
    debug!("drawing {} spots (seed {seed})", spots.len());
    draw_spots(&mut img, &spots);
    img
}

/// Renders the complete icon, glow included, at `size` x `size`.
pub fn generate_icon(size: u32, seed: u64) -> RgbaImage {
    let layout = IconLayout::new(size);
    debug!("layout for {size}px: {layout:?}");
    let face = render_face(&layout, seed);
    let glow = glow::glow_layer(&layout);
    glow::compose(&glow, &face)
}

/// Lanczos resample to `size`; a same-size request returns a copy.
pub fn resize_to(img: &RgbaImage, size: IconSize) -> RgbaImage {
    let px = size.pixels();
    if img.width() == px && img.height() == px {
        img.clone()
    } else {
        imageops::resize(img, px, px, FilterType::Lanczos3)
    }
}
