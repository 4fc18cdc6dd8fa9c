use crate::constants::POINTER_DIVISOR;

/// Last pointer position relative to the viewport centre, in world-ish units.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerOffset {
    pub x: f32,
    pub y: f32,
}

impl PointerOffset {
    /// `client_*` and `viewport_*` are in CSS pixels.
    #[inline]
    pub fn from_client(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            x: (client_x - viewport_w / 2.0) / POINTER_DIVISOR,
            y: (client_y - viewport_h / 2.0) / POINTER_DIVISOR,
        }
    }
}

/// Render-surface size in physical pixels, never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
