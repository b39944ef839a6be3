//! High-level facade for the `ball-triangulation-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core value types and the solver
//! - a JSON frame-input format ([`FrameInput`]) and report ([`FrameReport`])
//! - (feature `cli`) the `ball-triangulation` command-line tool
//!
//! ## Quickstart
//!
//! ```
//! use ball_triangulation::FrameInput;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = FrameInput::demo()?;
//! let pose = input.solve()?.pose;
//! println!("x={:.3} y={:.3} rotation={:.2}", pose.x, pose.y, pose.rotation);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `ball_triangulation::core`: balls, calibration, color ranges.
//! - `ball_triangulation::solver`: the triangulation solver.
//! - `ball_triangulation::frame`: JSON inputs and reports.

pub use ball_triangulation_core as core;
pub use ball_triangulation_solver as solver;

pub use ball_triangulation_core::{BallRecord, ColorRanges, FrameContext, HsvRange};
pub use ball_triangulation_solver::{
    BallOrdering, ObserverPose, SolveError, SolverParams, Triangulation, TriangulationSolver,
};

pub mod frame;

pub use frame::{BallSummary, FrameInput, FrameInputError, FrameReport};
