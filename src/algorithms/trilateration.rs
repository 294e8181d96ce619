//! Three-beacon 2D trilateration
//!
//! Each beacon gives a circle `(x - x_i)^2 + (y - y_i)^2 = d_i^2`. Subtracting
//! circle 2 from circle 1 and circle 3 from circle 2 cancels the quadratic
//! terms and leaves a 2x2 linear system, solved here by Cramer's rule.

use nalgebra::{Matrix2, Vector2};
use thiserror::Error;

use crate::core::Point;

/// Distance estimate to a beacon at a known position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: Point::new(x, y),
            radius,
        }
    }
}

/// Beacon considered for a fix, with its current distance estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub distance: f64,
    pub position: Point,
}

impl Candidate {
    pub fn circle(&self) -> Circle {
        Circle {
            center: self.position,
            radius: self.distance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrilaterationError {
    /// Beacons are collinear or coincident; the linear system has no unique solution
    #[error("indeterminate geometry: determinant {determinant:e} within tolerance")]
    Indeterminate { determinant: f64 },
    #[error("trilateration produced a non-finite coordinate")]
    NonFinite,
}

/// Closed-form three-circle solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrilaterationSolver {
    /// Relative tolerance: the determinant is treated as zero when its
    /// magnitude is below `degenerate_epsilon` times the product of the
    /// system's row magnitudes
    pub degenerate_epsilon: f64,
}

impl Default for TrilaterationSolver {
    fn default() -> Self {
        Self {
            degenerate_epsilon: 1e-9,
        }
    }
}

impl TrilaterationSolver {
    pub fn new(degenerate_epsilon: f64) -> Self {
        Self { degenerate_epsilon }
    }

    pub fn solve(&self, circles: &[Circle; 3]) -> Result<Point, TrilaterationError> {
        let coeff = |c: &Circle| {
            let (x, y, d) = (c.center.x, c.center.y, c.radius);
            (-2.0 * x, -2.0 * y, x * x + y * y - d * d)
        };
        let (a1, b1, c1) = coeff(&circles[0]);
        let (a2, b2, c2) = coeff(&circles[1]);
        let (a3, b3, c3) = coeff(&circles[2]);

        let system = Matrix2::new(a1 - a2, b1 - b2, a2 - a3, b2 - b3);
        let rhs = Vector2::new(c2 - c1, c3 - c2);

        let determinant = system.determinant();
        let scale = ((a1 - a2).abs() + (b1 - b2).abs()) * ((a2 - a3).abs() + (b2 - b3).abs());
        if !determinant.is_finite() || determinant.abs() <= self.degenerate_epsilon * scale {
            return Err(TrilaterationError::Indeterminate { determinant });
        }

        let mut x_system = system;
        x_system.set_column(0, &rhs);
        let mut y_system = system;
        y_system.set_column(1, &rhs);

        let point = Point::new(
            x_system.determinant() / determinant,
            y_system.determinant() / determinant,
        );
        if point.is_finite() {
            Ok(point)
        } else {
            Err(TrilaterationError::NonFinite)
        }
    }
}

/// Pick the three closest candidates, ties broken by beacon index.
///
/// Returns `None` when fewer than three candidates are available.
pub fn select_candidates(mut candidates: Vec<Candidate>) -> Option<[Candidate; 3]> {
    if candidates.len() < 3 {
        return None;
    }
    candidates.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.index.cmp(&b.index))
    });
    Some([candidates[0], candidates[1], candidates[2]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn exact_circles(beacons: &[(f64, f64); 3], target: Point) -> [Circle; 3] {
        beacons.map(|(x, y)| Circle::new(x, y, target.distance_to(&Point::new(x, y))))
    }

    #[test]
    fn test_square_corner_layout() {
        let solver = TrilaterationSolver::default();
        let circles = exact_circles(&[(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)], Point::new(5.0, 5.0));
        let point = solver.solve(&circles).unwrap();
        assert_relative_eq!(point.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(point.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_asymmetric_layout_recovers_both_axes() {
        let solver = TrilaterationSolver::default();
        let circles = exact_circles(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], Point::new(3.0, 4.0));
        let point = solver.solve(&circles).unwrap();
        assert_relative_eq!(point.x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(point.y, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inconsistent_radii_resolve_by_pairwise_differences() {
        // 5, 5 and 7.07 m share no common point; the linear system lands
        // on (3.75, 5) rather than the square's center
        let solver = TrilaterationSolver::default();
        let circles = [
            Circle::new(0.0, 0.0, 5.0),
            Circle::new(0.0, 10.0, 5.0),
            Circle::new(10.0, 0.0, 50f64.sqrt()),
        ];
        let point = solver.solve(&circles).unwrap();
        assert_relative_eq!(point.x, 3.75, epsilon = 1e-9);
        assert_relative_eq!(point.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_collinear_beacons_are_indeterminate() {
        let solver = TrilaterationSolver::default();
        let circles = [
            Circle::new(0.0, 0.0, 1.0),
            Circle::new(1.0, 0.0, 1.0),
            Circle::new(2.0, 0.0, 1.0),
        ];
        assert!(matches!(
            solver.solve(&circles),
            Err(TrilaterationError::Indeterminate { .. })
        ));
    }

    #[test]
    fn test_coincident_beacons_are_indeterminate() {
        let solver = TrilaterationSolver::new(0.0);
        let circles = [
            Circle::new(4.0, 4.0, 1.0),
            Circle::new(4.0, 4.0, 2.0),
            Circle::new(4.0, 4.0, 3.0),
        ];
        assert!(solver.solve(&circles).is_err());
    }

    #[test]
    fn test_near_collinear_within_tolerance() {
        let solver = TrilaterationSolver::new(1e-6);
        let circles = [
            Circle::new(0.0, 0.0, 5.0),
            Circle::new(10.0, 1e-9, 5.0),
            Circle::new(20.0, 0.0, 5.0),
        ];
        assert!(solver.solve(&circles).is_err());
    }

    #[test]
    fn test_select_candidates_orders_by_distance_then_index() {
        let c = |index, distance| Candidate {
            index,
            distance,
            position: Point::new(index as f64, 0.0),
        };
        let picked = select_candidates(vec![c(4, 2.0), c(0, 9.0), c(3, 1.0), c(1, 2.0)]).unwrap();
        let order: Vec<usize> = picked.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![3, 1, 4]);

        assert!(select_candidates(vec![c(0, 1.0), c(1, 1.0)]).is_none());
    }

    proptest! {
        #[test]
        fn prop_exact_distances_round_trip(x in -25.0f64..35.0, y in -25.0f64..35.0) {
            let solver = TrilaterationSolver::default();
            let target = Point::new(x, y);
            let circles = exact_circles(&[(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)], target);
            let point = solver.solve(&circles).unwrap();
            prop_assert!((point.x - x).abs() < 1e-6);
            prop_assert!((point.y - y).abs() < 1e-6);
        }

        #[test]
        fn prop_collinear_always_indeterminate(
            d1 in 0.0f64..50.0,
            d2 in 0.0f64..50.0,
            d3 in 0.0f64..50.0,
        ) {
            let solver = TrilaterationSolver::default();
            let circles = [
                Circle::new(0.0, 0.0, d1),
                Circle::new(1.0, 0.0, d2),
                Circle::new(2.0, 0.0, d3),
            ];
            let is_indeterminate = matches!(
                solver.solve(&circles),
                Err(TrilaterationError::Indeterminate { .. })
            );
            prop_assert!(is_indeterminate);
        }
    }
}
