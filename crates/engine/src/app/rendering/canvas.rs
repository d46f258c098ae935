use super::font::{self, GLYPH_ADVANCE, GLYPH_WIDTH, TEXT_SCALE};

/// RGBA8 color.
pub type Color = [u8; 4];

/// Axis-aligned rectangle in field pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Drawing surface handed to `Scene::render`.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
    fn text_width(&self, text: &str) -> i32 {
        font::text_width(text)
    }
}

/// `Canvas` over a tightly packed RGBA8 frame. All writes are clipped.
pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn fill_pixels(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(w).min(self.width as i32);
        let end_y = y.saturating_add(h).min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }

        let row_stride = self.width as usize * 4;
        for py in start_y..end_y {
            let row_start = py as usize * row_stride;
            let from = row_start + start_x as usize * 4;
            let to = row_start + end_x as usize * 4;
            let Some(row) = self.frame.get_mut(from..to) else {
                return;
            };
            for pixel in row.chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn clear(&mut self, color: Color) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x = rect.x.round() as i32;
        let y = rect.y.round() as i32;
        let w = rect.w.round() as i32;
        let h = rect.h.round() as i32;
        self.fill_pixels(x, y, w, h, color);
    }

    fn draw_text(&mut self, text: &str, mut x: i32, y: i32, color: Color) {
        for ch in text.chars() {
            if let Some(rows) = font::glyph_rows(ch) {
                for (row_index, row_bits) in rows.iter().enumerate() {
                    let glyph_y = y + row_index as i32 * TEXT_SCALE;
                    for col in 0..GLYPH_WIDTH {
                        if row_bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        let glyph_x = x + col * TEXT_SCALE;
                        self.fill_pixels(glyph_x, glyph_y, TEXT_SCALE, TEXT_SCALE, color);
                    }
                }
            }
            x += GLYPH_ADVANCE;
        }
    }
}
