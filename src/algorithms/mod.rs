//! Positioning algorithms: distance estimation, trilateration, proximity voting

pub mod distance;
pub mod trilateration;
pub mod proximity;

pub use distance::{DistanceEstimator, DistanceModel, RatioFit};
pub use trilateration::{select_candidates, Candidate, Circle, TrilaterationError, TrilaterationSolver};
pub use proximity::{reduce_mode, EpochResult, ProximityVoter};
