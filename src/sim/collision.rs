//! Pairwise overlap tests
//!
//! Stateless predicates over rectangles and circles. They never read or
//! write a `Body`; pairing entities up and reacting to hits is left to the
//! caller.

use super::geom::{Circle, Rectangle};

/// Check whether two axis-aligned rectangles overlap.
///
/// Rectangles that only share an edge do not overlap.
pub fn intersect_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

/// Check whether two circles overlap.
///
/// Circles that only touch do not overlap.
pub fn intersect_circle(a: &Circle, b: &Circle) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let r = a.radius + b.radius;
    dx * dx + dy * dy < r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_overlap() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersect_rectangle(&a, &b));
        assert!(intersect_rectangle(&b, &a));
    }

    #[test]
    fn test_rectangle_contained() {
        let outer = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rectangle::new(40.0, 40.0, 5.0, 5.0);
        assert!(intersect_rectangle(&outer, &inner));
        assert!(intersect_rectangle(&inner, &outer));
    }

    #[test]
    fn test_rectangle_separated_on_one_axis() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        // Overlapping vertically, apart horizontally
        assert!(!intersect_rectangle(&a, &Rectangle::new(20.0, 0.0, 10.0, 10.0)));
        // Overlapping horizontally, apart vertically
        assert!(!intersect_rectangle(&a, &Rectangle::new(0.0, -30.0, 10.0, 10.0)));
    }

    #[test]
    fn test_rectangle_shared_edge_is_not_overlap() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(10.0, 0.0, 10.0, 10.0);
        assert!(!intersect_rectangle(&a, &b));
    }

    #[test]
    fn test_circle_overlap() {
        let a = Circle::new(0.0, 0.0, 10.0);
        assert!(intersect_circle(&a, &Circle::new(8.0, 0.0, 10.0)));
        assert!(intersect_circle(&a, &Circle::new(3.0, 4.0, 2.0)));
    }

    #[test]
    fn test_circle_touching_is_not_overlap() {
        let a = Circle::new(0.0, 0.0, 10.0);
        let b = Circle::new(10.0, 0.0, 10.0);
        assert!(!intersect_circle(&a, &b));
        assert!(!intersect_circle(&a, &Circle::new(30.0, 30.0, 10.0)));
    }
}
