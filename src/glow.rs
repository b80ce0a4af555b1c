use image::imageops;
use image::{Rgba, RgbaImage};

use crate::icon::{ALIEN_GREEN, IconLayout};
use crate::raster::{blend, fill_ellipse};

const GLOW_ALPHA: u8 = 30;

/// Soft green halo that sits behind the head.
pub fn glow_layer(layout: &IconLayout) -> RgbaImage {
    let [r, g, b] = ALIEN_GREEN;
    // Transparent pixels carry the glow colour so the blur fades alpha
    // without pulling the edge towards black.
    let mut glow = RgbaImage::from_pixel(layout.size, layout.size, Rgba([r, g, b, 0]));
    fill_ellipse(&mut glow, &layout.head.grow(layout.glow_inset), Rgba([r, g, b, GLOW_ALPHA]));
    imageops::blur(&glow, layout.glow_sigma)
}

/// Composites `face` over `glow` onto a fresh transparent canvas.
pub fn compose(glow: &RgbaImage, face: &RgbaImage) -> RgbaImage {
    let mut out = RgbaImage::new(face.width(), face.height());
    for layer in [glow, face] {
        for (dst, src) in out.pixels_mut().zip(layer.pixels()) {
            blend(dst, *src);
        }
    }
    out
}
