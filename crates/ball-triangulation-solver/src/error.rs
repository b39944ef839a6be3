use ball_triangulation_core::CalibrationError;

/// Why a frame's ball layout admits no unique solution.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Degeneracy {
    #[error("balls {first} and {second} share the same pixel position")]
    CoincidentBalls { first: usize, second: usize },
    #[error("first subtended angle has zero sine (angle1={angle1})")]
    ZeroSubtendedAngle { angle1: f64 },
    #[error("observer direction is undefined (denominator={denominator})")]
    UndefinedDirection { denominator: f64 },
    #[error("{0} is not finite")]
    NonFinite(&'static str),
}

/// Errors returned by [`crate::TriangulationSolver`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("wrong ball count: expected 3, got {got}")]
    WrongBallCount { got: usize },
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] Degeneracy),
    #[error(transparent)]
    InvalidCalibration(#[from] CalibrationError),
}
