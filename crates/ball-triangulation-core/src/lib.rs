//! Core value types for three-ball observer triangulation.
//!
//! This crate only holds frame-scoped data: detected balls, the calibration
//! bundle for one frame, and the color ranges the upstream detector used.
//! It does no image processing and no I/O.

mod ball;
mod color;
mod context;

pub use ball::{order_by_x, BallRecord, BallRecordError};
pub use color::{ColorRanges, HsvRange};
pub use context::{CalibrationError, FrameContext};
