use crate::circle::{Circle, Point};
use serde::{Deserialize, Serialize};

/// Cursor radius relative to the fixed dot radius.
pub const CURSOR_SCALE: f32 = 1.4;
/// Center-to-center distance between dots, in cursor radii.
pub const SPACING_FACTOR: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Size of the drawing surface plus its padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub padding: Insets,
}

impl Bounds {
    pub const fn new(width: f32, height: f32, padding: Insets) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }
}

pub fn cursor_radius(dot_radius: f32) -> f32 {
    dot_radius * CURSOR_SCALE
}

pub fn spacing(dot_radius: f32) -> f32 {
    cursor_radius(dot_radius) * SPACING_FACTOR
}

/// Positions of the fixed dots, centered as a row within the padded bounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DotLayout {
    pub spacing: f32,
    pub cursor_radius: f32,
    /// Where the cursor sits at progress 0. Coincides with the first dot.
    pub baseline: Point,
    pub dots: Vec<Circle>,
}

impl DotLayout {
    pub fn compute(bounds: &Bounds, dot_count: usize, dot_radius: f32) -> Self {
        let mut layout = Self::default();
        layout.update(bounds, dot_count, dot_radius);
        layout
    }

    /// Recomputes every position, reusing the existing dot storage.
    pub fn update(&mut self, bounds: &Bounds, dot_count: usize, dot_radius: f32) {
        let pad = &bounds.padding;
        self.cursor_radius = cursor_radius(dot_radius);
        self.spacing = spacing(dot_radius);
        self.baseline = Point::new(
            (bounds.width - pad.right + pad.left - self.spacing * (dot_count as f32 - 1.0)) / 2.0,
            (bounds.height - pad.bottom + pad.top) / 2.0,
        );

        // grow at the end, shrink from the front
        if self.dots.len() > dot_count {
            self.dots.drain(..self.dots.len() - dot_count);
        }
        self.dots.resize(dot_count, Circle::default());

        for (i, dot) in self.dots.iter_mut().enumerate() {
            *dot = Circle::new(
                self.spacing * i as f32 + self.baseline.x,
                self.baseline.y,
                dot_radius,
            );
        }
    }

    /// Cursor center for a continuous `progress` (dot index plus fraction).
    /// Not clamped: values past either end extrapolate along the row.
    pub fn cursor_center(&self, progress: f32) -> Point {
        let origin = self.dots.first().map_or(self.baseline.x, |d| d.x);
        Point::new(self.spacing * progress + origin, self.baseline.y)
    }

    /// Natural size of the widget: room for every dot and a swollen cursor.
    pub fn preferred_size(dot_count: usize, dot_radius: f32) -> (f32, f32) {
        let cursor = cursor_radius(dot_radius);
        (
            dot_count as f32 * (cursor * 2.0 + spacing(dot_radius)),
            2.0 * cursor * CURSOR_SCALE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(400.0, 100.0, Insets::default())
    }

    #[test]
    fn test_row_is_centered() {
        let layout = DotLayout::compute(&bounds(), 4, 10.0);

        assert!((layout.cursor_radius - 14.0).abs() < 1e-4);
        assert!((layout.spacing - 56.0).abs() < 1e-4);

        let expected = [116.0, 172.0, 228.0, 284.0];
        assert_eq!(layout.dots.len(), expected.len());
        for (dot, x) in layout.dots.iter().zip(expected) {
            assert!((dot.x - x).abs() < 1e-4, "dot at {} expected {}", dot.x, x);
            assert!((dot.y - 50.0).abs() < 1e-4);
            assert_eq!(dot.radius, 10.0);
        }
    }

    #[test]
    fn test_padding_shifts_baseline() {
        let padded = Bounds::new(
            400.0,
            100.0,
            Insets {
                left: 20.0,
                top: 10.0,
                right: 0.0,
                bottom: 0.0,
            },
        );
        let plain = DotLayout::compute(&bounds(), 3, 10.0);
        let layout = DotLayout::compute(&padded, 3, 10.0);

        assert!((layout.baseline.x - plain.baseline.x - 10.0).abs() < 1e-4);
        assert!((layout.baseline.y - plain.baseline.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let a = DotLayout::compute(&bounds(), 5, 7.5);
        let b = DotLayout::compute(&bounds(), 5, 7.5);
        assert_eq!(a, b);

        let mut c = a.clone();
        c.update(&bounds(), 5, 7.5);
        assert_eq!(a, c);
    }

    #[test]
    fn test_resize_matches_fresh_layout() {
        let mut layout = DotLayout::compute(&bounds(), 6, 10.0);
        layout.update(&bounds(), 2, 10.0);
        assert_eq!(layout, DotLayout::compute(&bounds(), 2, 10.0));

        layout.update(&bounds(), 4, 10.0);
        assert_eq!(layout, DotLayout::compute(&bounds(), 4, 10.0));
    }

    #[test]
    fn test_empty_layout() {
        let layout = DotLayout::compute(&bounds(), 0, 10.0);
        assert!(layout.dots.is_empty());
        assert_eq!(layout.cursor_center(0.0), layout.baseline);
    }

    #[test]
    fn test_cursor_lands_exactly_on_dots() {
        let layout = DotLayout::compute(&bounds(), 4, 10.0);
        for (k, dot) in layout.dots.iter().enumerate() {
            let c = layout.cursor_center(k as f32);
            assert_eq!(c.x, dot.x);
            assert_eq!(c.y, dot.y);
        }
    }

    #[test]
    fn test_cursor_mapping_is_linear_and_unclamped() {
        let layout = DotLayout::compute(&bounds(), 4, 10.0);
        let step = layout.cursor_center(1.0).x - layout.cursor_center(0.0).x;

        let at = |p: f32| layout.cursor_center(p).x;
        assert!((at(1.35) - at(1.0) - 0.35 * step).abs() < 1e-3);
        assert!((at(2.5) - at(0.5) - 2.0 * step).abs() < 1e-3);
        assert!((at(-1.0) - (layout.dots[0].x - step)).abs() < 1e-3);
        assert!((at(5.0) - (layout.dots[3].x + 2.0 * step)).abs() < 1e-3);
    }

    #[test]
    fn test_preferred_size() {
        let (w, h) = DotLayout::preferred_size(4, 10.0);
        assert!((w - 4.0 * (28.0 + 56.0)).abs() < 1e-3);
        assert!((h - 39.2).abs() < 1e-3);
    }
}
