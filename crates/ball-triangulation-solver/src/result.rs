use serde::{Deserialize, Serialize};

/// Observer position relative to the right-hand reference ball, and its
/// heading.
///
/// `x`/`y` are in the length unit of the frame's target spacing;
/// `rotation` is in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserverPose {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

impl ObserverPose {
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.rotation)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.rotation.is_finite()
    }
}

impl From<ObserverPose> for (f64, f64, f64) {
    fn from(pose: ObserverPose) -> Self {
        pose.as_tuple()
    }
}

/// Full solve output with the intermediate geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    pub pose: ObserverPose,
    /// Angle subtended by the first ball pair (radians).
    pub angle1: f64,
    /// Angle subtended by the second ball pair (radians).
    pub angle2: f64,
    /// Direction of the observer from the baseline (radians).
    pub alpha: f64,
    /// Observer distance used for `x`/`y`.
    pub distance: f64,
    /// Input indices in the order the geometry read them.
    pub geometry_order: [usize; 3],
    /// Input indices sorted left to right.
    pub left_to_right: [usize; 3],
}
