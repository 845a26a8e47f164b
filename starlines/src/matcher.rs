//! # Constellation matching
//!
//! A trace matches a pattern when both are the same set of stars once they've been slid into the top-left corner. Where the shape was drawn doesn't matter, and neither does the order the stars were connected in. Rotating or scaling a shape does make it a different shape.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::library::{Pattern, PatternLibrary};
use crate::point::Point;

/// Slides `points` so the smallest x and the smallest y are both 0. The two axes are shifted independently.
///
/// A span wider than `i32::MAX` wraps around to a negative coordinate. The offsets stay distinct, so two sets are still equal after normalizing exactly when they were translations of each other.
pub fn normalize(points: &[Point]) -> Vec<Point> {
    let min_x = points.iter().map(|p| p.x).min();
    let min_y = points.iter().map(|p| p.y).min();
    match (min_x, min_y) {
        (Some(min_x), Some(min_y)) => points
            .iter()
            .map(|p| Point::new(p.x.wrapping_sub(min_x), p.y.wrapping_sub(min_y)))
            .collect(),
        _ => Vec::new(),
    }
}

/// If `trace` is the same shape as `pattern`.
///
/// Checks that every star of the normalized pattern shows up in the normalized trace. Since the lengths have to agree and neither side repeats a star, that's the same as the two sets being equal.
pub fn matches(trace: &[Point], pattern: &Pattern) -> bool {
    // cheap rejection, and keeps empty patterns from matching anything
    if trace.is_empty() || trace.len() != pattern.len() {
        return false;
    }

    let traced: BTreeSet<Point> = normalize(trace).into_iter().collect();
    normalize(pattern.points())
        .iter()
        .all(|point| traced.contains(point))
}

/// The first pattern in `library` that `trace` matches, if any.
///
/// Nothing is cached; the same trace and library always give the same answer.
pub fn evaluate<'a>(trace: &[Point], library: &'a PatternLibrary) -> Option<&'a Pattern> {
    if trace.is_empty() {
        return None;
    }
    trace!("checking a {}-star trace against {} patterns", trace.len(), library.len());
    let found = library.iter().find(|pattern| matches(trace, pattern));
    if let Some(pattern) = found {
        debug!("trace matches {}", pattern.name());
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn normalize_each_axis_separately() {
        assert_eq!(
            normalize(&points(&[(3, 4), (4, 3), (5, 4)])),
            points(&[(0, 1), (1, 0), (2, 1)])
        );
        assert!(normalize(&[]).is_empty());
        assert_eq!(normalize(&points(&[(-2, 7)])), points(&[(0, 0)]));
    }

    #[test]
    fn huge_spans_do_not_overflow() {
        let wide = points(&[(i32::MIN, 0), (i32::MAX, 0)]);
        assert_eq!(normalize(&wide), points(&[(0, 0), (-1, 0)]));

        let line = Pattern::new("Line", points(&[(0, 0), (1, 0)]), "").unwrap();
        let library = PatternLibrary::new(vec![line]).unwrap();
        assert!(evaluate(&wide, &library).is_none());
        let far = points(&[(i32::MAX - 1, i32::MIN), (i32::MAX, i32::MIN)]);
        assert_eq!(evaluate(&far, &library).map(Pattern::name), Some("Line"));
    }

    #[test]
    fn cassiopeia_scenarios() {
        let library = PatternLibrary::constellations();
        let name = |trace: &[(i32, i32)]| evaluate(&points(trace), &library).map(Pattern::name);

        assert_eq!(
            name(&[(1, 3), (2, 2), (3, 3), (4, 2), (5, 3)]),
            Some("Cassiopeia")
        );
        assert_eq!(
            name(&[(4, 2), (5, 3), (1, 3), (3, 3), (2, 2)]),
            Some("Cassiopeia")
        );
        assert_eq!(
            name(&[(3, 4), (4, 3), (5, 4), (6, 3), (7, 4)]),
            Some("Cassiopeia")
        );
        assert_eq!(name(&[(1, 3), (2, 2), (3, 3)]), None);
    }

    #[test]
    fn mirrored_shape_is_a_different_shape() {
        let library = PatternLibrary::constellations();
        // Cassiopeia flipped upside down
        let flipped = points(&[(1, 2), (2, 3), (3, 2), (4, 3), (5, 2)]);
        assert!(evaluate(&flipped, &library).is_none());
    }

    #[test]
    fn too_long_never_matches() {
        let library = PatternLibrary::constellations();
        let trace: Vec<Point> = (0..9).map(|x| Point::new(x, 0)).collect();
        assert!(evaluate(&trace, &library).is_none());
    }

    #[test]
    fn empty_trace_never_matches() {
        let empty = Pattern::new("Void", Vec::new(), "").unwrap();
        let library = PatternLibrary::new(vec![empty.clone()]).unwrap();
        assert!(!matches(&[], &empty));
        assert!(evaluate(&[], &library).is_none());
        assert!(!matches(&[Point::new(0, 0)], &empty));
    }

    #[test]
    fn library_order_breaks_ties() {
        let a = Pattern::new("A", points(&[(0, 0), (1, 0)]), "").unwrap();
        let b = Pattern::new("B", points(&[(5, 5), (6, 5)]), "").unwrap();
        let library = PatternLibrary::new(vec![a, b.clone()]).unwrap();
        let trace = points(&[(3, 3), (4, 3)]);
        assert_eq!(evaluate(&trace, &library).map(Pattern::name), Some("A"));

        let library = PatternLibrary::new(vec![b]).unwrap();
        assert_eq!(evaluate(&trace, &library).map(Pattern::name), Some("B"));
    }

    #[test]
    fn same_input_same_answer() {
        let library = PatternLibrary::constellations();
        let trace = points(&[(2, 2), (3, 3), (4, 4), (5, 3), (6, 2), (5, 1)]);
        let first = evaluate(&trace, &library).map(Pattern::name);
        assert_eq!(first, Some("Leo"));
        assert_eq!(evaluate(&trace, &library).map(Pattern::name), first);
    }
}
