//! Segment intersection tests used for line-of-sight checks
//!
//! Blockers are modeled as axis-aligned squares; a sight line is a segment
//! from the observer to the watched unit.

use glam::Vec2;

/// Intersection point of segments `p1..p2` and `q1..q2`
///
/// Returns `None` for parallel segments (zero denominator, compared exactly)
/// or when the crossing lies outside either segment.
pub fn segment_intersection(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> Option<Vec2> {
    let p = p2 - p1;
    let q = q2 - q1;

    let denom = q.y * p.x - q.x * p.y;
    if denom == 0.0 {
        return None;
    }

    let offset = p1 - q1;
    let t1 = (q.x * offset.y - q.y * offset.x) / denom;
    let t2 = (p.x * offset.y - p.y * offset.x) / denom;

    if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
        Some(p1 + p * t1)
    } else {
        None
    }
}

/// Does the segment `start..end` cross the outline of a square?
///
/// The square has side `size` and is centered on `center`. Each side is
/// tested separately and the hit must fall within that side's span.
pub fn segment_intersects_square(start: Vec2, end: Vec2, center: Vec2, size: f32) -> bool {
    let half = size / 2.0;
    let top_left = Vec2::new(center.x - half, center.y - half);
    let top_right = Vec2::new(center.x + half, center.y - half);
    let bottom_left = Vec2::new(center.x - half, center.y + half);
    let bottom_right = Vec2::new(center.x + half, center.y + half);

    // Horizontal sides are bounded in x, vertical sides in y
    let horizontal = [(top_left, top_right), (bottom_left, bottom_right)];
    let vertical = [(top_right, bottom_right), (top_left, bottom_left)];

    let hits_horizontal = horizontal.iter().any(|&(a, b)| {
        segment_intersection(start, end, a, b)
            .is_some_and(|hit| hit.x >= a.x && hit.x <= b.x)
    });
    if hits_horizontal {
        return true;
    }

    vertical.iter().any(|&(a, b)| {
        segment_intersection(start, end, a, b)
            .is_some_and(|hit| hit.y >= a.y && hit.y <= b.y)
    })
}
