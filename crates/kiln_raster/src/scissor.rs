use serde::{Deserialize, Serialize};

/// A scissor rectangle in frame buffer pixels, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScissorRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScissorRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width
            && (y - self.y) < self.height
    }
}

/// Active scissor rectangles, pushed and popped around draws.
///
/// A fragment passes if the stack is empty or it lies inside any rectangle.
#[derive(Debug, Clone, Default)]
pub struct ScissorStack {
    rects: Vec<ScissorRect>,
}

impl ScissorStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: ScissorRect) {
        self.rects.push(rect);
    }

    pub fn pop(&mut self) -> Option<ScissorRect> {
        self.rects.pop()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn passes(&self, x: u32, y: u32) -> bool {
        self.rects.is_empty() || self.rects.iter().any(|r| r.contains(x, y))
    }
}
