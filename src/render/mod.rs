use crate::{
    config,
    types::{ColorId, StarSnapshot},
};

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub intensity: f32,
    pub color: ColorId,
}

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        self.cells.resize(
            len,
            RenderCell {
                intensity: 0.0,
                color: ColorId::White,
            },
        );
        self.clear();
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.intensity = 0.0;
            cell.color = ColorId::White;
        }
    }

    /// Decays every cell instead of clearing it, leaving dimming remnants of
    /// earlier frames. Remnants below the blank cutoff are dropped outright.
    pub fn fade(&mut self, retain: f32) {
        for cell in &mut self.cells {
            cell.intensity *= retain;
            if cell.intensity < config::INTENSITY_BLANK {
                cell.intensity = 0.0;
            }
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn set(&mut self, x: u16, y: u16, intensity: f32, color: ColorId) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if intensity >= cell.intensity {
            cell.intensity = intensity;
            cell.color = color;
        }
    }
}

pub fn draw(snapshot: &[StarSnapshot], viewport: Viewport, frame: &mut FrameBuffer) {
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.fade(config::TRAIL_RETAIN);
    }

    for star in snapshot {
        let sx = star.pos.x.round() as i32;
        let sy = star.pos.y.round() as i32;
        if sx < 0 || sy < 0 || sx >= viewport.width as i32 || sy >= viewport.height as i32 {
            continue;
        }
        frame.set(sx as u16, sy as u16, star.alpha * star.size, star.color);
    }
}

pub fn glyph_for(intensity: f32) -> char {
    if intensity < config::INTENSITY_BLANK {
        ' '
    } else if intensity < 0.35 {
        '.'
    } else if intensity < 0.75 {
        '·'
    } else if intensity < 1.15 {
        '*'
    } else if intensity < 1.55 {
        'o'
    } else {
        '●'
    }
}
