//! Percentage-of-canvas layout helpers.

/// Inclusive pixel rectangle `[x0, y0] ..= [x1, y1]`.
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

    /// Rectangle spanning `width` x `height` pixels from a corner,
    /// counted like `[x, y, x + width, y + height]`.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: i32) -> Self {
        Self::new(
            self.x0 + amount,
            self.y0 + amount,
            self.x1 - amount,
            self.y1 - amount,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// `floor(dim * fraction)`, the position of an element placed at a fraction of the canvas.
pub fn frac(dim: u32, fraction: f64) -> i32 {
    (dim as f64 * fraction) as i32
}

/// Offset that centers a span of `span` pixels inside `total` pixels.
pub fn centered_start(total: u32, span: i32) -> i32 {
    (total as i32 - span) / 2
}

/// Start offsets for `count` items of width `item` separated by `gap`,
/// centered as a group inside `total`.
pub fn row_starts(total: u32, count: usize, item: i32, gap: i32) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }

    let span = count as i32 * item + (count as i32 - 1) * gap;
    let start = centered_start(total, span);

    (0..count as i32).map(|i| start + i * (item + gap)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frac_truncates() {
        assert_eq!(frac(800, 0.12), 96);
        assert_eq!(frac(400, 0.025), 10);
        assert_eq!(frac(280, 0.35), 98);
    }

    #[test]
    fn test_row_starts_are_centered() {
        // Three 320px boxes with 51px gaps on a 1280px canvas
        let starts = row_starts(1280, 3, 320, 51);
        assert_eq!(starts, vec![109, 480, 851]);

        let right_margin = 1280 - (starts[2] + 320);
        assert!((right_margin - starts[0]).abs() <= 1);
    }

    #[test]
    fn test_row_starts_empty() {
        assert!(row_starts(100, 0, 10, 5).is_empty());
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::from_origin_size(10, 10, 100, 50);
        assert_eq!(rect, Rect::new(10, 10, 110, 60));
        assert_eq!(rect.inset(2), Rect::new(12, 12, 108, 58));
        assert!(Rect::new(5, 5, 4, 10).is_empty());
    }
}
