use image::{Rgba, RgbaImage};

/// Axis-aligned box in pixel coordinates, both corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box starting at `(x, y)` spanning `w` by `h`.
    pub fn at(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    pub fn grow(&self, d: i32) -> Self {
        Self::new(self.x0 - d, self.y0 - d, self.x1 + d, self.y1 + d)
    }

    pub fn width(&self) -> i32 { self.x1 - self.x0 }
    pub fn height(&self) -> i32 { self.y1 - self.y0 }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }
}

/// Ellipse inscribed in a `Rect`, evaluated at pixel centres.
#[derive(Debug, Clone, Copy)]
struct Ellipse {
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
}

impl Ellipse {
    fn inscribed(r: &Rect) -> Self {
        // The far edge is inclusive, so the shape covers x1 + 1 - x0 pixels.
        let rx = (r.x1 + 1 - r.x0) as f32 * 0.5;
        let ry = (r.y1 + 1 - r.y0) as f32 * 0.5;
        Self { cx: r.x0 as f32 + rx, cy: r.y0 as f32 + ry, rx, ry }
    }

    fn shrink(&self, w: f32) -> Option<Self> {
        let (rx, ry) = (self.rx - w, self.ry - w);
        (rx > 0.0 && ry > 0.0).then_some(Self { rx, ry, ..*self })
    }

    #[inline]
    fn norm(&self, px: f32, py: f32) -> (f32, f32) {
        ((px - self.cx) / self.rx, (py - self.cy) / self.ry)
    }

    #[inline]
    fn contains(&self, px: f32, py: f32) -> bool {
        let (nx, ny) = self.norm(px, py);
        nx * nx + ny * ny <= 1.0
    }
}

/// True when the centre of pixel `(x, y)` lies in the ellipse inscribed in `r`.
pub fn ellipse_contains(r: &Rect, x: i32, y: i32) -> bool {
    Ellipse::inscribed(r).contains(x as f32 + 0.5, y as f32 + 0.5)
}

/// Source-over blend of a straight-alpha colour onto a straight-alpha pixel.
#[inline]
pub fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    if sa >= 1.0 {
        *dst = src;
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let oa = sa + da * (1.0 - sa);
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / oa;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (oa * 255.0).round() as u8;
}

/// Visits every in-bounds pixel of `r` whose centre passes `inside`.
fn for_each_pixel<F, G>(img: &mut RgbaImage, r: &Rect, mut inside: F, mut paint: G)
where
    F: FnMut(f32, f32) -> bool,
    G: FnMut(&mut Rgba<u8>, f32, f32),
{
    let (w, h) = (img.width() as i32, img.height() as i32);
    let (xa, xb) = (r.x0.max(0), r.x1.min(w - 1));
    let (ya, yb) = (r.y0.max(0), r.y1.min(h - 1));
    for y in ya..=yb {
        for x in xa..=xb {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if inside(px, py) {
                paint(img.get_pixel_mut(x as u32, y as u32), px, py);
            }
        }
    }
}

/// Draws an ellipse with an optional fill and an optional inner outline.
pub fn draw_ellipse(
    img: &mut RgbaImage,
    r: &Rect,
    fill: Option<Rgba<u8>>,
    outline: Option<(Rgba<u8>, u32)>,
) {
    let outer = Ellipse::inscribed(r);
    let inner = outline.and_then(|(_, w)| outer.shrink(w as f32));
    for_each_pixel(img, r, |px, py| outer.contains(px, py), |pixel, px, py| {
        let in_ring = match (outline, inner) {
            (Some(_), Some(inner)) => !inner.contains(px, py),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if in_ring {
            if let Some((color, _)) = outline {
                blend(pixel, color);
            }
        } else if let Some(color) = fill {
            blend(pixel, color);
        }
    });
}

pub fn fill_ellipse(img: &mut RgbaImage, r: &Rect, color: Rgba<u8>) {
    draw_ellipse(img, r, Some(color), None);
}

/// Strokes the part of the ellipse outline swept from `start` to `end` degrees.
///
/// Angles run clockwise from 3 o'clock in image space, so `0..180` is the
/// lower half.
pub fn stroke_arc(img: &mut RgbaImage, r: &Rect, start: f32, end: f32, color: Rgba<u8>, width: u32) {
    let outer = Ellipse::inscribed(r);
    let inner = outer.shrink(width as f32);
    let in_sweep = |px: f32, py: f32| {
        let (nx, ny) = outer.norm(px, py);
        let deg = ny.atan2(nx).to_degrees().rem_euclid(360.0);
        deg >= start && deg <= end
    };
    for_each_pixel(
        img,
        r,
        |px, py| {
            outer.contains(px, py)
                && inner.is_none_or(|i| !i.contains(px, py))
                && in_sweep(px, py)
        },
        |pixel, _, _| blend(pixel, color),
    );
}
