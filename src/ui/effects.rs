/// CRT post-processing over a composed frame.
///
///   1. glow: brighten lit glyphs, tint blank cells next to them
///   2. scanlines: dim every odd row
///   3. vignette: darken toward the corners (mask cached per size)

use crate::config::DisplayConfig;
use crate::domain::layout::CELL_ASPECT;
use crate::ui::frame::{Cell, FrameBuffer};

const GLOW_GAIN: f32 = 1.15;
const GLOW_SPILL: f32 = 0.12;
const SCANLINE_DIM: f32 = 0.78;
/// Edge darkening: 255 at the center down to 90 at the corners.
const VIGNETTE_DEPTH: f32 = 165.0 / 255.0;
const VIGNETTE_POWER: f32 = 1.6;

pub struct Effects {
    glow: bool,
    scanlines: bool,
    vignette: bool,
    mask: Vec<f32>,
    mask_size: (usize, usize),
}

impl Effects {
    pub fn new(cfg: &DisplayConfig) -> Self {
        Effects {
            glow: cfg.use_glow,
            scanlines: cfg.use_scanlines,
            vignette: cfg.use_vignette,
            mask: Vec::new(),
            mask_size: (0, 0),
        }
    }

    pub fn apply(&mut self, fb: &mut FrameBuffer) {
        if self.glow {
            glow(fb);
        }
        if self.scanlines {
            scanlines(fb);
        }
        if self.vignette {
            let size = (fb.width(), fb.height());
            if self.mask_size != size {
                self.mask = vignette_mask(size.0, size.1);
                self.mask_size = size;
            }
            for y in 0..size.1 {
                for x in 0..size.0 {
                    let k = self.mask[y * size.0 + x];
                    if let Some(c) = fb.get_mut(x, y) {
                        *c = Cell::new(c.ch, c.fg.scale(k), c.bg.scale(k));
                    }
                }
            }
        }
    }
}

fn glow(fb: &mut FrameBuffer) {
    let (w, h) = (fb.width(), fb.height());
    // Spill is computed from the unmodified frame so tints never cascade.
    let mut spill = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let cell = fb.get(x, y);
            if !cell.is_blank() {
                continue;
            }
            let lit = [(0, -1), (0, 1), (-1, 0), (1, 0)]
                .iter()
                .filter_map(|&(dx, dy): &(isize, isize)| {
                    let nx = x.checked_add_signed(dx)?;
                    let ny = y.checked_add_signed(dy)?;
                    (nx < w && ny < h).then(|| fb.get(nx, ny))
                })
                .find(|n| !n.is_blank());
            if let Some(n) = lit {
                spill.push((x, y, n.fg.scale(GLOW_SPILL)));
            }
        }
    }

    for y in 0..h {
        for x in 0..w {
            if let Some(c) = fb.get_mut(x, y) {
                if !c.is_blank() {
                    c.fg = c.fg.scale(GLOW_GAIN);
                }
            }
        }
    }
    for (x, y, tint) in spill {
        if let Some(c) = fb.get_mut(x, y) {
            c.bg = c.bg.add(tint);
        }
    }
}

fn scanlines(fb: &mut FrameBuffer) {
    for y in (1..fb.height()).step_by(2) {
        for x in 0..fb.width() {
            if let Some(c) = fb.get_mut(x, y) {
                *c = Cell::new(c.ch, c.fg.scale(SCANLINE_DIM), c.bg.scale(SCANLINE_DIM));
            }
        }
    }
}

/// Brightness factor per cell. Rows count `CELL_ASPECT` times a column so
/// the falloff is round on screen.
fn vignette_mask(w: usize, h: usize) -> Vec<f32> {
    let cx = (w / 2) as f32;
    let cy = (h / 2) as f32;
    let aspect = CELL_ASPECT as f32;
    let r_max = cx.hypot(cy * aspect).max(1.0);
    let mut mask = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let r = (x as f32 - cx).hypot((y as f32 - cy) * aspect);
            mask.push(1.0 - VIGNETTE_DEPTH * (r / r_max).powf(VIGNETTE_POWER));
        }
    }
    mask
}
