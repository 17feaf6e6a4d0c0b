use core::fmt;
use std::f64::consts::SQRT_2;
use std::str::FromStr;

use grid_util::point::Point;

use crate::error::ConfigurationError;

#[inline]
fn deltas(a: Point, b: Point) -> (f64, f64) {
    (((a.x - b.x).abs()) as f64, ((a.y - b.y).abs()) as f64)
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx + dy
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx.hypot(dy)
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx.max(dy)
}

/// Octile distance: the cost of taking as many diagonal steps as possible before going straight.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let (dx, dy) = deltas(a, b);
    dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
}

/// Constant zero estimate, degrading A* into Dijkstra.
#[inline]
pub fn null(_: Point, _: Point) -> f64 {
    0.0
}

/// Distance estimate used to order a search. Whether a heuristic is admissible for the chosen
/// navigator is up to the caller: manhattan overestimates under diagonal movement, which only
/// costs A* its optimality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    Chebyshev,
    Octile,
    Null,
}

impl Heuristic {
    pub const ALL: &'static [Heuristic] = &[
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::Chebyshev,
        Heuristic::Octile,
        Heuristic::Null,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Chebyshev => "chebyshev",
            Heuristic::Octile => "octile",
            Heuristic::Null => "null",
        }
    }

    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(a, b),
            Heuristic::Euclidean => euclidean(a, b),
            Heuristic::Chebyshev => chebyshev(a, b),
            Heuristic::Octile => octile(a, b),
            Heuristic::Null => null(a, b),
        }
    }
}

impl FromStr for Heuristic {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase();
        Heuristic::ALL
            .iter()
            .copied()
            .find(|h| h.as_str() == key)
            .ok_or_else(|| ConfigurationError::UnknownHeuristic(s.to_owned()))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn distances() {
        let a = Point::new(1, 2);
        let b = Point::new(4, -2);
        assert_eq!(manhattan(a, b), 7.0);
        assert!((euclidean(a, b) - 5.0).abs() < EPS);
        assert_eq!(chebyshev(a, b), 4.0);
        assert!((octile(a, b) - (4.0 + 3.0 * (SQRT_2 - 1.0))).abs() < EPS);
        assert_eq!(null(a, b), 0.0);
    }

    #[test]
    fn symmetric_and_non_negative() {
        let pts = [Point::new(0, 0), Point::new(-3, 5), Point::new(7, 1)];
        for h in Heuristic::ALL {
            for a in pts {
                for b in pts {
                    let d = h.distance(a, b);
                    assert!(d >= 0.0);
                    assert!((d - h.distance(b, a)).abs() < EPS);
                }
                assert_eq!(h.distance(a, a), 0.0);
            }
        }
    }

    /// Octile and chebyshev never exceed the true cost of an open eight-directional grid.
    #[test]
    fn ordering_between_heuristics() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 7);
        let true_cost = 4.0 + 3.0 * SQRT_2;
        assert!(chebyshev(a, b) <= octile(a, b));
        assert!((octile(a, b) - true_cost).abs() < EPS);
        assert!(euclidean(a, b) <= true_cost);
        assert!(manhattan(a, b) >= octile(a, b));
    }

    #[test]
    fn parses_keys() {
        for h in Heuristic::ALL {
            assert_eq!(h.as_str().to_uppercase().parse::<Heuristic>(), Ok(*h));
        }
        assert!("diagonal".parse::<Heuristic>().is_err());
    }
}
