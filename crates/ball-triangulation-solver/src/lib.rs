//! Observer position and heading from three reference balls.
//!
//! ## Quickstart
//!
//! ```
//! use ball_triangulation_core::{BallRecord, FrameContext};
//! use ball_triangulation_solver::{SolverParams, TriangulationSolver};
//! use nalgebra::Point2;
//!
//! let ball = |x: f64, label: &str| {
//!     BallRecord::new(Point2::new(x, 300.0), Point2::new(x, 300.0), 20.0, label, None)
//! };
//! let balls = vec![ball(100.0, "Green")?, ball(300.0, "Red")?, ball(500.0, "Blue")?];
//! let ctx = FrameContext::new(0.0, 0.825, 0.0189634, 1640.0)?;
//!
//! let solver = TriangulationSolver::new(SolverParams::default());
//! let pose = solver.solve(&balls, &ctx)?;
//! assert!(pose.is_finite());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Pipeline:
//! 1. Require exactly three balls and a valid calibration.
//! 2. Reject coincident balls.
//! 3. Pick the geometry order (input order or left to right, see
//!    [`BallOrdering`]).
//! 4. Convert the two adjacent pixel distances into subtended angles.
//! 5. Recover the observer direction `alpha` and distance to the baseline.
//! 6. Project into `x`/`y` relative to the last ball and compute the heading.

mod error;
mod params;
mod result;
mod solver;

pub use error::{Degeneracy, SolveError};
pub use params::{BallOrdering, SolverParams};
pub use result::{ObserverPose, Triangulation};
pub use solver::{solve, TriangulationSolver};
