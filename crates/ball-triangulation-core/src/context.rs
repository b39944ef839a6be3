use serde::{Deserialize, Serialize};

/// Errors returned when a calibration bundle is unusable.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("target spacing must be positive (got {0})")]
    NonPositiveSpacing(f64),
    #[error("camera ratio must be positive (got {0})")]
    NonPositiveCameraRatio(f64),
    #[error("calibration field `{0}` is not finite")]
    NonFinite(&'static str),
}

/// Per-frame calibration passed explicitly to the solver.
///
/// Angles: `servo_angle` is in degrees, `camera_ratio` is radians per
/// pixel. `target_spacing` sets the length unit of the solved position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    /// Camera/servo yaw offset in degrees.
    #[serde(default)]
    pub servo_angle: f64,
    /// Physical distance between adjacent balls.
    pub target_spacing: f64,
    /// Radians subtended by one pixel.
    pub camera_ratio: f64,
    /// Pixel column that counts as straight ahead.
    pub reference_column: f64,
    /// Frame counter for log correlation only.
    #[serde(default)]
    pub frame_index: u64,
}

impl FrameContext {
    pub fn new(
        servo_angle: f64,
        target_spacing: f64,
        camera_ratio: f64,
        reference_column: f64,
    ) -> Result<Self, CalibrationError> {
        let ctx = Self {
            servo_angle,
            target_spacing,
            camera_ratio,
            reference_column,
            frame_index: 0,
        };
        ctx.validate()?;
        Ok(ctx)
    }

    pub fn with_frame_index(mut self, frame_index: u64) -> Self {
        self.frame_index = frame_index;
        self
    }

    /// Check the invariants; needed after deserialization or direct field edits.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        let fields = [
            ("servo_angle", self.servo_angle),
            ("target_spacing", self.target_spacing),
            ("camera_ratio", self.camera_ratio),
            ("reference_column", self.reference_column),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CalibrationError::NonFinite(name));
            }
        }
        if self.target_spacing <= 0.0 {
            return Err(CalibrationError::NonPositiveSpacing(self.target_spacing));
        }
        if self.camera_ratio <= 0.0 {
            return Err(CalibrationError::NonPositiveCameraRatio(self.camera_ratio));
        }
        Ok(())
    }
}
