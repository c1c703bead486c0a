/// Axis-aligned rectangle in canvas units, top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// Strict interior overlap. Touching edges and zero-area rectangles never intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn symmetric_over_a_grid_of_offsets() {
        let a = Rect::new(20.0, 20.0, 30.0, 15.0);
        for dx in -6..=6 {
            for dy in -6..=6 {
                let b = Rect::new(20.0 + dx as f64 * 7.5, 20.0 + dy as f64 * 5.0, 12.0, 9.0);
                assert_eq!(intersects(&a, &b), intersects(&b, &a), "dx={dx} dy={dy}");
            }
        }
    }

    #[test]
    fn zero_area_never_intersects() {
        let big = Rect::new(-50.0, -50.0, 200.0, 200.0);
        let flat = Rect::new(10.0, 10.0, 30.0, 0.0);
        let thin = Rect::new(10.0, 10.0, 0.0, 30.0);
        let point = Rect::new(10.0, 10.0, 0.0, 0.0);
        for r in [flat, thin, point] {
            assert!(!intersects(&big, &r));
            assert!(!intersects(&r, &big));
            assert!(!intersects(&r, &r));
        }
        // A zero-width and a zero-height segment that cross still do not overlap.
        assert!(!intersects(&Rect::new(5.0, 0.0, 0.0, 10.0), &Rect::new(0.0, 5.0, 10.0, 0.0)));
    }
}
