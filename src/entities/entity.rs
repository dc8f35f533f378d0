/// Axis-aligned box shared by every game object.
///
/// `(x, y)` is the top-left corner in playfield pixels, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Entity {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
